//! `Custom Metrics` column parser.

use tracing::warn;

use crate::models::CustomMetrics;
use crate::transform::ENTRY_DELIMITER;

/// Parse `Key=value||Key=value` into an ordered mapping.
///
/// Each entry splits on its first `=`; key and value are trimmed.
/// Entries without `=` are logged and skipped.
pub fn parse_custom_metrics(raw: Option<&str>) -> CustomMetrics {
    let mut metrics = CustomMetrics::new();
    let Some(raw) = raw.filter(|s| !s.is_empty()) else {
        return metrics;
    };

    for entry in raw.split(ENTRY_DELIMITER) {
        match entry.split_once('=') {
            Some((key, value)) => metrics.insert(key.trim(), value.trim()),
            None => warn!("Error parsing custom metric: {:?}", entry),
        }
    }

    metrics
}
