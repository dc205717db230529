//! Masonry layout for the records page.

use think_core::defaults::{CARD_CHROME, LIST_COLUMN_COUNT};

/// Fixed column count masonry: each item goes to the currently shortest
/// column, so input order is kept within every column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Masonry {
    columns: usize,
}

impl Masonry {
    /// At least one column.
    pub fn new(columns: usize) -> Self {
        Self {
            columns: columns.max(1),
        }
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Width of one column inside a container `total_width` wide.
    pub fn column_width(&self, total_width: u32) -> u32 {
        total_width / self.columns as u32
    }

    /// Width available to card content inside a column.
    pub fn content_width(&self, total_width: u32) -> u32 {
        self.column_width(total_width).saturating_sub(CARD_CHROME)
    }

    /// Distribute `items` over the columns using `height` as the size
    /// estimate. Ties go to the leftmost column.
    pub fn place<T, F>(&self, items: Vec<T>, height: F) -> Vec<Vec<T>>
    where
        F: Fn(&T) -> u64,
    {
        let mut columns: Vec<Vec<T>> = (0..self.columns).map(|_| Vec::new()).collect();
        let mut heights = vec![0u64; self.columns];

        for item in items {
            let shortest = heights
                .iter()
                .enumerate()
                .min_by_key(|(i, h)| (**h, *i))
                .map(|(i, _)| i)
                .unwrap_or(0);
            heights[shortest] += height(&item);
            columns[shortest].push(item);
        }

        columns
    }
}

impl Default for Masonry {
    fn default() -> Self {
        Self::new(LIST_COLUMN_COUNT)
    }
}
