//! Warehouse query execution.
//!
//! Statements are submitted asynchronously and their status polled by id,
//! the model of the Redshift Data API.

#[cfg(feature = "aws")]
pub mod redshift;
pub mod sql;

use std::fmt;

use async_trait::async_trait;

use crate::error::Result;

#[cfg(feature = "aws")]
pub use redshift::RedshiftDataExecutor;
pub use sql::insert_statement;

/// Lifecycle state reported for a submitted statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatementState {
    Submitted,
    Picked,
    Started,
    Finished,
    Failed,
    Aborted,
    /// Anything the API reports that is not listed above
    Other(String),
}

impl StatementState {
    /// Parse the API's upper-case status string.
    pub fn from_api(status: &str) -> Self {
        match status {
            "SUBMITTED" => Self::Submitted,
            "PICKED" => Self::Picked,
            "STARTED" => Self::Started,
            "FINISHED" => Self::Finished,
            "FAILED" => Self::Failed,
            "ABORTED" => Self::Aborted,
            other => Self::Other(other.to_string()),
        }
    }

    /// The statement will not change state again.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Finished | Self::Failed | Self::Aborted)
    }
}

impl fmt::Display for StatementState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Submitted => "SUBMITTED",
            Self::Picked => "PICKED",
            Self::Started => "STARTED",
            Self::Finished => "FINISHED",
            Self::Failed => "FAILED",
            Self::Aborted => "ABORTED",
            Self::Other(other) => other,
        };
        f.write_str(s)
    }
}

/// Result of a status check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatementStatus {
    pub state: StatementState,
    /// Error detail reported with a failed statement
    pub error: Option<String>,
}

impl StatementStatus {
    pub fn new(state: StatementState) -> Self {
        Self { state, error: None }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            state: StatementState::Failed,
            error: Some(error.into()),
        }
    }
}

/// Submit-and-poll query API.
#[async_trait]
pub trait QueryExecutor: Send + Sync {
    /// Submit SQL text, returning the statement id.
    async fn execute_statement(&self, sql: &str) -> Result<String>;

    /// Current status of a submitted statement.
    async fn describe_statement(&self, statement_id: &str) -> Result<StatementStatus>;
}
