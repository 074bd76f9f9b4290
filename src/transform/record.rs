//! Row transformer: [`ConversationRow`] to [`NormalizedRecord`].

use crate::models::{ConversationRow, CustomMetrics, NormalizedRecord};
use crate::transform::{escape_sql, normalize_timestamp, parse_custom_metrics, transcript_json};

/// Custom metric keys as written by the conversation platform.
pub mod keys {
    pub const CALL_ID: &str = "CallID";
    pub const ESCALATION_REASON: &str = "EscalationReason";
    pub const INTENT: &str = "Intent";
    pub const AGENT_PICKED_UP: &str = "Agent picked up";
    pub const AIOPS_TICKET: &str = "AIOPS Ticket";
    pub const CONTACT_ID: &str = "ContactID";
    pub const CONVERSATION_STARTED: &str = "Conversation Started";
    pub const INITIAL_USER_UTTERANCE: &str = "InitialUserUtterance";
    pub const SECOND_INTENT: &str = "SecondIntent";
    pub const THIRD_INTENT: &str = "ThirdIntent";
    pub const PRE_CLOSE_STARTED: &str = "PreCloseStarted";
    pub const FIRST_INTENT: &str = "FirstIntent";
    pub const CONTAINMENT: &str = "Containment";
    pub const WEB_OPTION: &str = "WebOption";
    pub const EXCEPTION_IN_PRECLOSE: &str = "ExceptionInPreClose";
    pub const CALL_ESCALATED: &str = "CallEscalated";
    pub const INTENT_HISTORY: &str = "intentHistory";
    pub const CLOSED_BY: &str = "closed_by";
    pub const THIRD_USER_UTTERANCE: &str = "ThirdUserUtterance";
    pub const SECOND_USER_UTTERANCE: &str = "SecondUserUtterance";
}

/// Normalize one export row.
///
/// Flags are `true` only for the exact string `"True"`, which is what the
/// producer emits; `"true"` and `"1"` load as `false`.
pub fn transform_row(row: &ConversationRow) -> NormalizedRecord {
    let metrics = parse_custom_metrics(row.custom_metrics.as_deref());
    let text = |key: &str| escape_sql(metrics.text(key));

    NormalizedRecord {
        conversation_id: escape_sql(row.conversation_id.as_deref().unwrap_or_default()),
        datetime: normalize_timestamp(row.created.as_deref()),
        channel: escape_sql(row.channel.as_deref().unwrap_or_default()),
        custom_metrics: escape_sql(&metrics_json(&metrics)),
        transcript: escape_sql(&transcript_json(row.transcript.as_deref())),
        call_id: text(keys::CALL_ID),
        escalation_reason: text(keys::ESCALATION_REASON),
        intent: text(keys::INTENT),
        agent_picked_up: metrics.flag(keys::AGENT_PICKED_UP),
        aiops_ticket: text(keys::AIOPS_TICKET),
        contact_id: text(keys::CONTACT_ID),
        conversation_started: metrics.flag(keys::CONVERSATION_STARTED),
        initial_user_utterance: text(keys::INITIAL_USER_UTTERANCE),
        second_intent: text(keys::SECOND_INTENT),
        third_intent: text(keys::THIRD_INTENT),
        pre_close_started: metrics.flag(keys::PRE_CLOSE_STARTED),
        first_intent: text(keys::FIRST_INTENT),
        containment: metrics.flag(keys::CONTAINMENT),
        web_option: text(keys::WEB_OPTION),
        exception_in_preclose: metrics.flag(keys::EXCEPTION_IN_PRECLOSE),
        call_escalated: metrics.flag(keys::CALL_ESCALATED),
        intent_history: text(keys::INTENT_HISTORY),
        closed_by: text(keys::CLOSED_BY),
        third_user_utterance: text(keys::THIRD_USER_UTTERANCE),
        second_user_utterance: text(keys::SECOND_USER_UTTERANCE),
    }
}

/// Normalize every row, preserving order.
pub fn transform_rows(rows: &[ConversationRow]) -> Vec<NormalizedRecord> {
    rows.iter().map(transform_row).collect()
}

fn metrics_json(metrics: &CustomMetrics) -> String {
    serde_json::to_string(metrics).unwrap_or_else(|_| "{}".to_string())
}
