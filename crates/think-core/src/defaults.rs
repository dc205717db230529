//! Centralized default constants for think.
//!
//! **This module is the single source of truth** for shared default values.
//! Crates reference these constants instead of defining their own magic
//! numbers.

// =============================================================================
// API
// =============================================================================

/// Default base URL of the records server.
pub const API_URL: &str = "http://127.0.0.1:8080";

/// Collection endpoint for records.
pub const RECORDS_PATH: &str = "/api/records";

/// Collection endpoint for stored files.
pub const FILES_PATH: &str = "/api/file";

/// Request timeout in seconds.
pub const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Status the server answers a successful save with.
pub const SAVE_SUCCESS_STATUS: u16 = 201;

/// Status the server answers a successful delete with.
pub const DELETE_SUCCESS_STATUS: u16 = 200;

/// Status the server answers a successful file upload with.
pub const UPLOAD_SUCCESS_STATUS: u16 = 201;

// =============================================================================
// ENVIRONMENT
// =============================================================================

pub const ENV_API_URL: &str = "THINK_API_URL";
pub const ENV_TIMEOUT_SECS: &str = "THINK_TIMEOUT_SECS";
pub const ENV_SAVE_STATUSES: &str = "THINK_SAVE_STATUSES";
pub const ENV_DELETE_STATUSES: &str = "THINK_DELETE_STATUSES";

// =============================================================================
// RECORDS
// =============================================================================

/// Mime type discriminator of note records.
pub const NOTE_MIME_TYPE: &str = "note";

// =============================================================================
// RENDERING
// =============================================================================

/// Layout units kept free around embedded images in a preview.
pub const IMAGE_MARGIN: u32 = 20;

/// Width used when a record is embedded inside another note.
pub const EMBED_PREVIEW_WIDTH: u32 = 560;

/// Namespace prefix of the per-note headless engine.
pub const NOTE_NAMESPACE_PREFIX: &str = "note-";

// =============================================================================
// LAYOUT
// =============================================================================

/// Maximum number of masonry columns in the records list.
pub const LIST_COLUMN_COUNT: usize = 3;

/// Layout units taken by the border and padding of a list card.
pub const CARD_CHROME: u32 = 20;

/// Total width the records list lays its columns out in.
pub const LIST_WIDTH: u32 = 1200;
