//! Structured logging field names for think.
//!
//! All crates use these constants for structured `tracing` fields so the
//! client, the renderer and the binary can be queried with the same names.
//!
//! ## Log Level Contract
//!
//! | Level | Usage |
//! |-------|-------|
//! | ERROR | Operation failed and the user sees an error state |
//! | WARN  | Recoverable issue, fallback rendered |
//! | INFO  | Lifecycle events, completed writes |
//! | DEBUG | Requests sent, decisions taken |
//! | TRACE | Per-node work, engine teardown |

// ─── Identity fields ───────────────────────────────────────────────────────

/// Subsystem originating the log event.
/// Values: "client", "render", "app"
pub const SUBSYSTEM: &str = "subsystem";

/// Logical operation name.
/// Examples: "list_records", "get_record", "save_record", "generate_html"
pub const OPERATION: &str = "op";

// ─── Entity fields ─────────────────────────────────────────────────────────

/// Record id being operated on, as supplied by the caller.
pub const RECORD_ID: &str = "record_id";

/// Mime type discriminator of a record.
pub const MIME_TYPE: &str = "mime_type";

/// Headless engine namespace.
pub const NAMESPACE: &str = "namespace";

/// Route path being rendered.
pub const ROUTE: &str = "route";

// ─── Measurement fields ────────────────────────────────────────────────────

/// Wall-clock duration in milliseconds.
pub const DURATION_MS: &str = "duration_ms";

/// Number of records returned by a list call.
pub const RESULT_COUNT: &str = "result_count";

/// Target rendering width in layout units.
pub const WIDTH: &str = "width";

/// Byte length of materialized HTML.
pub const HTML_LEN: &str = "html_len";

// ─── Outcome fields ────────────────────────────────────────────────────────

/// HTTP status code of a response.
pub const STATUS: &str = "status";

/// Boolean success/failure indicator.
pub const SUCCESS: &str = "success";

/// Error message when an operation fails.
pub const ERROR_MSG: &str = "error";

/// Every field name above, for log pipelines that need the full schema.
pub const ALL_FIELDS: &[&str] = &[
    SUBSYSTEM,
    OPERATION,
    RECORD_ID,
    MIME_TYPE,
    NAMESPACE,
    ROUTE,
    DURATION_MS,
    RESULT_COUNT,
    WIDTH,
    HTML_LEN,
    STATUS,
    SUCCESS,
    ERROR_MSG,
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_field_names_are_unique() {
        let unique: HashSet<_> = ALL_FIELDS.iter().collect();
        assert_eq!(unique.len(), ALL_FIELDS.len());
    }

    #[test]
    fn test_field_names_are_snake_case() {
        for field in ALL_FIELDS {
            assert!(
                field.chars().all(|c| c.is_ascii_lowercase() || c == '_'),
                "{} is not snake_case",
                field
            );
        }
    }
}
