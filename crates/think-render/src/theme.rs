//! Class names emitted on materialized HTML.

/// CSS class names per node and text format. Empty strings emit no class.
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub paragraph: String,
    pub quote: String,
    /// Indexed by heading level - 1.
    pub heading: [String; 6],
    pub list_ul: String,
    pub list_ol: String,
    pub list_check: String,
    pub list_item: String,
    pub list_item_checked: String,
    pub list_item_unchecked: String,
    pub code: String,
    pub code_highlight_prefix: String,
    pub link: String,
    pub image: String,
    pub hr: String,
    pub table: String,
    pub table_row: String,
    pub table_cell: String,
    pub table_cell_header: String,
    pub hashtag: String,
    pub mention: String,
    pub keyword: String,
    pub mark: String,
    pub overflow: String,
    pub equation: String,
    pub embed_block: String,
    pub sticky: String,
    pub collapsible_container: String,
    pub collapsible_title: String,
    pub collapsible_content: String,
    pub text_bold: String,
    pub text_italic: String,
    pub text_strikethrough: String,
    pub text_underline: String,
    pub text_code: String,
    pub text_subscript: String,
    pub text_superscript: String,
    pub text_highlight: String,
}

impl Theme {
    /// Theme without any class names.
    pub fn plain() -> Self {
        Self {
            paragraph: String::new(),
            quote: String::new(),
            heading: Default::default(),
            list_ul: String::new(),
            list_ol: String::new(),
            list_check: String::new(),
            list_item: String::new(),
            list_item_checked: String::new(),
            list_item_unchecked: String::new(),
            code: String::new(),
            code_highlight_prefix: String::new(),
            link: String::new(),
            image: String::new(),
            hr: String::new(),
            table: String::new(),
            table_row: String::new(),
            table_cell: String::new(),
            table_cell_header: String::new(),
            hashtag: String::new(),
            mention: String::new(),
            keyword: String::new(),
            mark: String::new(),
            overflow: String::new(),
            equation: String::new(),
            embed_block: String::new(),
            sticky: String::new(),
            collapsible_container: String::new(),
            collapsible_title: String::new(),
            collapsible_content: String::new(),
            text_bold: String::new(),
            text_italic: String::new(),
            text_strikethrough: String::new(),
            text_underline: String::new(),
            text_code: String::new(),
            text_subscript: String::new(),
            text_superscript: String::new(),
            text_highlight: String::new(),
        }
    }

    /// Class name for heading `h1`..`h6`.
    pub fn heading_class(&self, tag: &str) -> &str {
        tag.strip_prefix('h')
            .and_then(|n| n.parse::<usize>().ok())
            .filter(|n| (1..=6).contains(n))
            .map(|n| self.heading[n - 1].as_str())
            .unwrap_or("")
    }
}

impl Default for Theme {
    fn default() -> Self {
        let class = |name: &str| format!("ThinkTheme__{}", name);
        Self {
            paragraph: class("paragraph"),
            quote: class("quote"),
            heading: [
                class("h1"),
                class("h2"),
                class("h3"),
                class("h4"),
                class("h5"),
                class("h6"),
            ],
            list_ul: class("ul"),
            list_ol: class("ol1"),
            list_check: class("ul"),
            list_item: class("listItem"),
            list_item_checked: class("listItemChecked"),
            list_item_unchecked: class("listItemUnchecked"),
            code: class("code"),
            code_highlight_prefix: "ThinkTheme__token".to_string(),
            link: class("link"),
            image: "editor-image".to_string(),
            hr: String::new(),
            table: class("table"),
            table_row: String::new(),
            table_cell: class("tableCell"),
            table_cell_header: class("tableCellHeader"),
            hashtag: class("hashtag"),
            mention: "mention".to_string(),
            keyword: "keyword".to_string(),
            mark: class("mark"),
            overflow: class("overflowed"),
            equation: "editor-equation".to_string(),
            embed_block: class("embedBlock"),
            sticky: "sticky-note-container".to_string(),
            collapsible_container: "Collapsible__container".to_string(),
            collapsible_title: "Collapsible__title".to_string(),
            collapsible_content: "Collapsible__content".to_string(),
            text_bold: class("textBold"),
            text_italic: class("textItalic"),
            text_strikethrough: class("textStrikethrough"),
            text_underline: class("textUnderline"),
            text_code: class("textCode"),
            text_subscript: class("textSubscript"),
            text_superscript: class("textSuperscript"),
            text_highlight: class("textHighlight"),
        }
    }
}
