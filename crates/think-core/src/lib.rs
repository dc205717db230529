//! # think-core
//!
//! Core types, traits, and abstractions for think.
//!
//! This crate provides the record data model, the identifier utilities and
//! the [`RecordStore`] trait that the client, renderer and pages depend on.

pub mod defaults;
pub mod error;
pub mod logging;
pub mod models;
pub mod traits;
pub mod uuid_utils;

// Re-export commonly used types at crate root
pub use error::{Error, Result};
pub use models::*;
pub use traits::*;
pub use uuid_utils::{generate_uuid, is_uuid, parse_v4};
