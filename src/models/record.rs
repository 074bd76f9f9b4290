//! Warehouse-ready conversation record.

use serde::Serialize;

/// One row of the `conversations` table.
///
/// String fields hold SQL-escaped text (single quotes already doubled) and
/// are never null. `datetime` is `None` when the source timestamp was empty
/// or unparsable, which loads as SQL `NULL`.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct NormalizedRecord {
    pub conversation_id: String,
    pub datetime: Option<String>,
    pub channel: String,
    /// Compact JSON object of every custom metric
    pub custom_metrics: String,
    /// Compact JSON array of `{Speaker, Message}` turns
    pub transcript: String,
    pub call_id: String,
    pub escalation_reason: String,
    pub intent: String,
    pub agent_picked_up: bool,
    pub aiops_ticket: String,
    pub contact_id: String,
    pub conversation_started: bool,
    pub initial_user_utterance: String,
    pub second_intent: String,
    pub third_intent: String,
    pub pre_close_started: bool,
    pub first_intent: String,
    pub containment: bool,
    pub web_option: String,
    pub exception_in_preclose: bool,
    pub call_escalated: bool,
    pub intent_history: String,
    pub closed_by: String,
    pub third_user_utterance: String,
    pub second_user_utterance: String,
}
