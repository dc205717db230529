//! Page view states.

use think_core::Error;
use think_render::html_escape;

/// What a page shows while its data is in flight or once it settled.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewState<T> {
    Loading,
    /// The requested record does not exist. Holds the id.
    NotFound(String),
    /// Any other failure, as a message.
    Error(String),
    Ready(T),
}

impl<T> ViewState<T> {
    /// Settle a fetch for record `id`.
    pub fn from_result(id: &str, result: think_core::Result<T>) -> Self {
        match result {
            Ok(value) => ViewState::Ready(value),
            Err(Error::RecordNotFound(_)) => ViewState::NotFound(id.to_string()),
            Err(e) => ViewState::Error(e.to_string()),
        }
    }

    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> ViewState<U> {
        match self {
            ViewState::Loading => ViewState::Loading,
            ViewState::NotFound(id) => ViewState::NotFound(id),
            ViewState::Error(msg) => ViewState::Error(msg),
            ViewState::Ready(value) => ViewState::Ready(f(value)),
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, ViewState::Ready(_))
    }

    /// HTML for the state, with `ready` rendering the loaded value.
    pub fn to_html<F: FnOnce(&T) -> String>(&self, ready: F) -> String {
        match self {
            ViewState::Loading => "LOADING".to_string(),
            ViewState::NotFound(id) => format!("<pre>Error Not Found {}</pre>", html_escape(id)),
            ViewState::Error(msg) => format!("<pre>{}</pre>", html_escape(msg)),
            ViewState::Ready(value) => ready(value),
        }
    }
}
