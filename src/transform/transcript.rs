//! `Transcript` column parser.

use tracing::warn;

use crate::models::TranscriptEntry;
use crate::transform::ENTRY_DELIMITER;

/// Separates the bracketed speaker from the message.
const SPEAKER_DELIMITER: &str = "]:";

/// Parse `[Speaker]: message||[Speaker]: message` into turns.
///
/// Entries without `]:` are logged and skipped.
pub fn parse_transcript(raw: Option<&str>) -> Vec<TranscriptEntry> {
    let Some(raw) = raw.filter(|s| !s.is_empty()) else {
        return Vec::new();
    };

    raw.split(ENTRY_DELIMITER).filter_map(parse_entry).collect()
}

/// Parsed transcript as a compact JSON array string (`[]` when absent).
pub fn transcript_json(raw: Option<&str>) -> String {
    let entries = parse_transcript(raw);
    serde_json::to_string(&entries).unwrap_or_else(|_| "[]".to_string())
}

fn parse_entry(entry: &str) -> Option<TranscriptEntry> {
    let Some((speaker, message)) = entry.split_once(SPEAKER_DELIMITER) else {
        warn!("Error parsing transcript entry: {:?}", entry);
        return None;
    };

    let speaker = speaker.trim();
    let speaker = speaker.strip_prefix('[').unwrap_or(speaker).trim();

    Some(TranscriptEntry {
        speaker: speaker.to_string(),
        message: message.trim().to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_two_turns_to_json() {
        assert_eq!(
            transcript_json(Some("[Bot]: Hi||[User]: Hello")),
            r#"[{"Speaker":"Bot","Message":"Hi"},{"Speaker":"User","Message":"Hello"}]"#
        );
    }

    #[test]
    fn missing_transcript_is_empty_array() {
        assert_eq!(transcript_json(None), "[]");
        assert_eq!(transcript_json(Some("")), "[]");
    }

    #[test]
    fn malformed_entries_are_skipped() {
        let entries = parse_transcript(Some("[Bot]: Hi||no speaker here||[User]: Bye"));
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].speaker, "User");
        assert_eq!(entries[1].message, "Bye");
    }

    #[test]
    fn splits_on_first_marker_only() {
        let entries = parse_transcript(Some("[User]: see [note]: attached"));
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].speaker, "User");
        assert_eq!(entries[0].message, "see [note]: attached");
    }

    #[test]
    fn speaker_and_message_are_trimmed() {
        let entries = parse_transcript(Some("  [ Virtual Agent ]:   How can I help?  "));
        assert_eq!(entries[0].speaker, "Virtual Agent");
        assert_eq!(entries[0].message, "How can I help?");
    }

    #[test]
    fn quotes_survive_into_json() {
        let json = transcript_json(Some("[User]: it's \"down\""));
        assert_eq!(json, r#"[{"Speaker":"User","Message":"it's \"down\""}]"#);
    }
}
