//! INSERT statement synthesis.

use crate::models::NormalizedRecord;

/// Destination columns, in statement order.
///
/// `custom_metrics` is not loaded; the table has no column for it.
pub const COLUMNS: [&str; 24] = [
    "conversation_id",
    "datetime",
    "channel",
    "transcript",
    "call_id",
    "escalation_reason",
    "intent",
    "agent_picked_up",
    "aiops_ticket",
    "contact_id",
    "conversation_started",
    "initial_user_utterance",
    "second_intent",
    "third_intent",
    "pre_close_started",
    "first_intent",
    "containment",
    "web_option",
    "exception_in_preclose",
    "call_escalated",
    "intent_history",
    "closed_by",
    "third_user_utterance",
    "second_user_utterance",
];

/// Single-row INSERT with values inlined as SQL literals.
///
/// Record strings are already escaped, so they are only quoted here.
pub fn insert_statement(table: &str, record: &NormalizedRecord) -> String {
    let values = [
        quoted(&record.conversation_id),
        record
            .datetime
            .as_deref()
            .map(quoted)
            .unwrap_or_else(|| "NULL".to_string()),
        quoted(&record.channel),
        quoted(&record.transcript),
        quoted(&record.call_id),
        quoted(&record.escalation_reason),
        quoted(&record.intent),
        boolean(record.agent_picked_up),
        quoted(&record.aiops_ticket),
        quoted(&record.contact_id),
        boolean(record.conversation_started),
        quoted(&record.initial_user_utterance),
        quoted(&record.second_intent),
        quoted(&record.third_intent),
        boolean(record.pre_close_started),
        quoted(&record.first_intent),
        boolean(record.containment),
        quoted(&record.web_option),
        boolean(record.exception_in_preclose),
        boolean(record.call_escalated),
        quoted(&record.intent_history),
        quoted(&record.closed_by),
        quoted(&record.third_user_utterance),
        quoted(&record.second_user_utterance),
    ];

    format!(
        "INSERT INTO {} ({}) VALUES ({});",
        table,
        COLUMNS.join(", "),
        values.join(", ")
    )
}

fn quoted(value: &str) -> String {
    format!("'{}'", value)
}

fn boolean(value: bool) -> String {
    let literal = if value { "TRUE" } else { "FALSE" };
    literal.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> NormalizedRecord {
        NormalizedRecord {
            conversation_id: "conv-1".to_string(),
            datetime: Some("2025-02-11 14:03:27".to_string()),
            channel: "voice".to_string(),
            transcript: "[]".to_string(),
            closed_by: "O''Brien".to_string(),
            containment: true,
            ..Default::default()
        }
    }

    #[test]
    fn inlines_values_in_column_order() {
        let sql = insert_statement("conversations", &record());

        assert!(sql.starts_with(
            "INSERT INTO conversations (conversation_id, datetime, channel, transcript, call_id,"
        ));
        assert!(sql.contains(
            "VALUES ('conv-1', '2025-02-11 14:03:27', 'voice', '[]', '', '', '', FALSE,"
        ));
        assert!(sql.ends_with("'O''Brien', '', '');"));
    }

    #[test]
    fn missing_datetime_is_bare_null() {
        let mut input = record();
        input.datetime = None;

        let sql = insert_statement("conversations", &input);
        assert!(sql.contains("VALUES ('conv-1', NULL, 'voice',"));
    }

    #[test]
    fn booleans_are_unquoted() {
        let sql = insert_statement("conversations", &record());
        assert!(sql.contains(", TRUE, "));
        assert!(sql.contains(", FALSE, "));
        assert!(!sql.contains("True"));
        assert!(!sql.contains("'TRUE'"));
        assert!(!sql.contains("'FALSE'"));
    }

    #[test]
    fn one_value_per_column() {
        let sql = insert_statement("conversations", &NormalizedRecord::default());
        let values = sql.split("VALUES (").nth(1).unwrap();
        assert_eq!(values.matches(", ").count() + 1, COLUMNS.len());
    }
}
