//! `Created` column normalization.

use chrono::{NaiveDateTime, Timelike};
use tracing::warn;

/// Export format without the fractional part, which is checked separately.
const INPUT_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// `YYYY-MM-DDTHH:MM:SS`: digits everywhere except these byte offsets.
const SEPARATORS: [(usize, u8); 5] = [(4, b'-'), (7, b'-'), (10, b'T'), (13, b':'), (16, b':')];

/// Format accepted by the warehouse `TIMESTAMP` column.
const OUTPUT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Normalize `YYYY-MM-DDTHH:MM:SS.ffffff[Z|[UTC]]` to `YYYY-MM-DD HH:MM:SS`.
///
/// Returns `None` for missing, empty or unparsable input; the caller loads
/// that as SQL `NULL`. The wall-clock value is kept as written, no timezone
/// conversion happens.
pub fn normalize_timestamp(raw: Option<&str>) -> Option<String> {
    let Some(raw) = raw.filter(|s| !s.is_empty()) else {
        warn!("Missing timestamp, loading NULL");
        return None;
    };

    match parse(raw) {
        Some(datetime) => Some(datetime.format(OUTPUT_FORMAT).to_string()),
        None => {
            warn!("Error converting timestamp: {:?}, loading NULL", raw);
            None
        }
    }
}

fn parse(raw: &str) -> Option<NaiveDateTime> {
    let cleaned = raw.replace("[UTC]", "").replace('Z', "");

    // Fraction is mandatory, 1 to 6 digits.
    let (whole, fraction) = cleaned.split_once('.')?;
    if fraction.is_empty() || fraction.len() > 6 || !fraction.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    if !has_fixed_shape(whole) {
        return None;
    }

    NaiveDateTime::parse_from_str(whole, INPUT_FORMAT)
        .ok()
        .filter(|datetime| datetime.nanosecond() < 1_000_000_000)
}

/// chrono alone tolerates padding, signs and leap seconds.
fn has_fixed_shape(whole: &str) -> bool {
    let bytes = whole.as_bytes();
    bytes.len() == 19
        && bytes.iter().enumerate().all(|(i, &b)| {
            match SEPARATORS.iter().find(|(offset, _)| *offset == i) {
                Some(&(_, separator)) => b == separator,
                None => b.is_ascii_digit(),
            }
        })
}
