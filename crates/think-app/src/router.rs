//! Route table.

use std::fmt;

/// A page of the application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// `/`: navigation only.
    Root,
    /// `/r`: every record as a card.
    Records,
    /// `/n/new`: editor for a fresh note.
    NewNote,
    /// `/n/{id}`: one note. The id is validated by the page, not here.
    Note(String),
    Unknown(String),
}

impl Route {
    /// Resolve a path. Query strings, fragments and trailing slashes are
    /// ignored.
    pub fn parse(path: &str) -> Self {
        let path = path
            .split(['?', '#'])
            .next()
            .unwrap_or_default()
            .trim_end_matches('/');
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

        match segments.as_slice() {
            [] => Route::Root,
            ["r"] => Route::Records,
            ["n", "new"] => Route::NewNote,
            ["n", id] => Route::Note(id.to_string()),
            _ => Route::Unknown(path.to_string()),
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::Root => "/".to_string(),
            Route::Records => "/r".to_string(),
            Route::NewNote => "/n/new".to_string(),
            Route::Note(id) => format!("/n/{}", id),
            Route::Unknown(path) => path.clone(),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}
