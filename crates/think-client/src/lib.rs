//! # think-client
//!
//! HTTP clients for the think server: [`RecordClient`] for `/api/records`
//! (implements [`think_core::RecordStore`]) and [`FileClient`] for the file
//! attachments under `/api/file`.

pub mod config;
pub mod files;
mod http;
pub mod records;

pub use config::{ClientConfig, ConfigError, ConfigResult};
pub use files::{FileBlob, FileClient, FileMeta};
pub use records::RecordClient;
