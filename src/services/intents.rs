//! Intent reference CSV parser.

use csv::ReaderBuilder;

use crate::error::Result;
use crate::models::IntentCatalog;

/// Parse headerless `intent,utterance` rows into a catalog.
///
/// Rows with fewer than two cells are skipped. With `selected`, only the
/// named intents are kept.
pub fn parse_intents(bytes: &[u8], selected: Option<&[String]>) -> Result<IntentCatalog> {
    let text = String::from_utf8(bytes.to_vec())?;

    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut catalog = IntentCatalog::new();
    for record in reader.records() {
        let record = record?;
        let (Some(label), Some(utterance)) = (record.get(0), record.get(1)) else {
            continue;
        };

        let label = label.trim();
        if let Some(selected) = selected {
            if !selected.iter().any(|s| s == label) {
                continue;
            }
        }
        catalog.add_example(label, utterance.trim());
    }

    Ok(catalog)
}
