//! Conversation export parsing and normalization.
//!
//! - `reader`: CSV bytes into [`ConversationRow`](crate::models::ConversationRow)s
//! - `timestamp`, `metrics`, `transcript`: per-field parsers
//! - `record`: assembles a warehouse-ready [`NormalizedRecord`](crate::models::NormalizedRecord)
//!
//! Field parsers never fail a row. Bad input is logged and defaulted.

pub mod escape;
pub mod metrics;
pub mod reader;
pub mod record;
pub mod timestamp;
pub mod transcript;

/// Separates entries inside the `Transcript` and `Custom Metrics` columns.
pub const ENTRY_DELIMITER: &str = "||";

pub use escape::escape_sql;
pub use metrics::parse_custom_metrics;
pub use reader::read_rows;
pub use record::{transform_row, transform_rows};
pub use timestamp::normalize_timestamp;
pub use transcript::{parse_transcript, transcript_json};
