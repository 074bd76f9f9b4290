//! Redshift Data API executor (Redshift Serverless workgroup).

use async_trait::async_trait;
use aws_sdk_redshiftdata::Client;
use aws_sdk_redshiftdata::error::DisplayErrorContext;
use tracing::debug;

use crate::error::{AppError, Result};
use crate::models::WarehouseConfig;
use crate::warehouse::{QueryExecutor, StatementState, StatementStatus};

/// Submits statements to a serverless workgroup and database.
#[derive(Clone)]
pub struct RedshiftDataExecutor {
    client: Client,
    workgroup_name: String,
    database: String,
}

impl RedshiftDataExecutor {
    pub fn new(
        client: Client,
        workgroup_name: impl Into<String>,
        database: impl Into<String>,
    ) -> Self {
        Self {
            client,
            workgroup_name: workgroup_name.into(),
            database: database.into(),
        }
    }

    /// Create an executor from the ambient AWS configuration.
    pub async fn from_env(config: &WarehouseConfig) -> Self {
        let aws_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
        Self::new(
            Client::new(&aws_config),
            &config.workgroup_name,
            &config.database,
        )
    }
}

#[async_trait]
impl QueryExecutor for RedshiftDataExecutor {
    async fn execute_statement(&self, sql: &str) -> Result<String> {
        let output = self
            .client
            .execute_statement()
            .workgroup_name(&self.workgroup_name)
            .database(&self.database)
            .sql(sql)
            .send()
            .await
            .map_err(|e| AppError::query("submit", DisplayErrorContext(&e)))?;

        let id = output
            .id()
            .map(str::to_string)
            .ok_or_else(|| AppError::query("submit", "response carried no statement id"))?;
        debug!("Submitted statement {}", id);
        Ok(id)
    }

    async fn describe_statement(&self, statement_id: &str) -> Result<StatementStatus> {
        let output = self
            .client
            .describe_statement()
            .id(statement_id)
            .send()
            .await
            .map_err(|e| AppError::query(statement_id, DisplayErrorContext(&e)))?;

        let state = output
            .status()
            .map(|s| StatementState::from_api(s.as_str()))
            .unwrap_or_else(|| StatementState::Other(String::new()));

        Ok(StatementStatus {
            state,
            error: output.error().map(str::to_string),
        })
    }
}
