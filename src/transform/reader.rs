//! CSV export reader.

use csv::ReaderBuilder;

use crate::error::Result;
use crate::models::ConversationRow;

/// Parse a headed CSV export into rows.
///
/// Columns are matched by header name; extra columns are ignored and empty
/// cells become `None`. A leading UTF-8 byte order mark is tolerated.
pub fn read_rows(bytes: &[u8]) -> Result<Vec<ConversationRow>> {
    let text = String::from_utf8(bytes.to_vec())?;
    let text = text.strip_prefix('\u{feff}').unwrap_or(&text);

    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut rows = Vec::new();
    for record in reader.deserialize() {
        let row: ConversationRow = record?;
        rows.push(row);
    }
    Ok(rows)
}
