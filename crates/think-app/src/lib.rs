//! # think-app
//!
//! Pages of the think front end: the route table, the records list with
//! its masonry layout, the note editor pages and the save/delete actions.
//! Everything talks to the server through [`think_core::RecordStore`], so
//! the pages run against the REST client or an in-memory store alike.

pub mod actions;
pub mod layout;
pub mod pages;
pub mod router;
pub mod shell;
pub mod view;

pub use layout::Masonry;
pub use pages::{NewNote, NoteView, RecordsView};
pub use router::Route;
pub use view::ViewState;
