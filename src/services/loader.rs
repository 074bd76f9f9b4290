//! Sequential warehouse loader.
//!
//! Each record becomes one INSERT statement that is submitted and polled
//! to a terminal state before the next record starts. A failed row is
//! logged and skipped; nothing is retried and nothing is wrapped in a
//! transaction.

use std::time::Duration;

use serde::Serialize;
use tokio::time::Instant;
use tracing::{debug, error, info};

use crate::error::{AppError, Result};
use crate::models::{NormalizedRecord, WarehouseConfig};
use crate::warehouse::{QueryExecutor, StatementState, StatementStatus, insert_statement};

/// Per-batch counts. Logged, never returned to the invoker.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LoadSummary {
    /// Rows whose statement was accepted by the query API
    pub submitted: usize,
    /// Rows that reached `FINISHED`
    pub finished: usize,
    /// Rows rejected on submit, failed, aborted or timed out
    pub failed: usize,
}

/// Loads records one statement at a time.
pub struct BatchLoader<'a> {
    executor: &'a dyn QueryExecutor,
    table: String,
    poll_interval: Duration,
    max_wait: Option<Duration>,
}

impl<'a> BatchLoader<'a> {
    pub fn new(executor: &'a dyn QueryExecutor, config: &WarehouseConfig) -> Self {
        Self {
            executor,
            table: config.table.clone(),
            poll_interval: config.poll_interval(),
            max_wait: config.max_wait(),
        }
    }

    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    /// Bound the wait for each statement. `None` waits indefinitely.
    pub fn with_max_wait(mut self, max_wait: Option<Duration>) -> Self {
        self.max_wait = max_wait;
        self
    }

    /// Insert every record in order.
    pub async fn load(&self, records: &[NormalizedRecord]) -> LoadSummary {
        info!("Loading {} records into {}", records.len(), self.table);
        let mut summary = LoadSummary::default();

        for (index, record) in records.iter().enumerate() {
            let row = index + 1;
            let sql = insert_statement(&self.table, record);

            let statement_id = match self.executor.execute_statement(&sql).await {
                Ok(id) => id,
                Err(e) => {
                    summary.failed += 1;
                    error!(
                        "Error submitting row {} ({}): {}",
                        row, record.conversation_id, e
                    );
                    continue;
                }
            };
            summary.submitted += 1;

            match self.wait_for_completion(&statement_id).await {
                Ok(status) if status.state == StatementState::Finished => {
                    summary.finished += 1;
                    debug!("Row {} inserted ({})", row, statement_id);
                }
                Ok(status) => {
                    summary.failed += 1;
                    error!(
                        "Error inserting row {} ({}): {} {}",
                        row,
                        record.conversation_id,
                        status.state,
                        status.error.as_deref().unwrap_or("(no error detail)")
                    );
                }
                Err(e) => {
                    summary.failed += 1;
                    error!(
                        "Error inserting row {} ({}): {}",
                        row, record.conversation_id, e
                    );
                }
            }
        }

        info!(
            "Load complete: {} submitted, {} finished, {} failed",
            summary.submitted, summary.finished, summary.failed
        );
        summary
    }

    /// Poll until the statement reaches a terminal state.
    pub async fn wait_for_completion(&self, statement_id: &str) -> Result<StatementStatus> {
        let started = Instant::now();
        loop {
            let status = self.executor.describe_statement(statement_id).await?;
            if status.state.is_terminal() {
                return Ok(status);
            }

            if let Some(max_wait) = self.max_wait {
                if started.elapsed() >= max_wait {
                    return Err(AppError::query(
                        statement_id,
                        format!("still {} after {:?}", status.state, max_wait),
                    ));
                }
            }

            tokio::time::sleep(self.poll_interval).await;
        }
    }
}
