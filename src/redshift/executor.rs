//! Submit/poll/fetch orchestration against a `RedshiftDataApiClient`.
//!
//! Grounded on spec.md §4.C and `original_source/pkg/query_handler.go`'s
//! call into its `redshiftDataAPIService`. The naive `deallocate`
//! short-circuit and single-page fetch are carried over unchanged from
//! the original implementation — see DESIGN.md's Open Questions.

use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::config::RedshiftConnectionConfig;
use crate::error::QueryError;
use crate::translate::SqlParameter;

use super::client::RedshiftDataApiClient;
use super::model::{
    DescribeStatementOutput, ExecuteStatementInput, GetStatementResultOutput, StatementStatus,
};

const STATEMENT_NAME: &str = "execute_rdapp_query";
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Either a query produced rows, or it was a DDL/DML/no-op statement
/// with nothing to fetch — the caller (`query_handler`) decides what to
/// do with the absence of a result set.
pub enum OptionalResult {
    Empty,
    Result(GetStatementResultOutput),
}

pub struct Executor {
    client: Arc<dyn RedshiftDataApiClient>,
    config: Arc<RedshiftConnectionConfig>,
}

impl Executor {
    pub fn new(client: Arc<dyn RedshiftDataApiClient>, config: Arc<RedshiftConnectionConfig>) -> Self {
        Executor { client, config }
    }

    /// Run `sql` (already dialect-translated) with `parameters` against
    /// the configured cluster/workgroup, polling until the statement
    /// reaches a terminal status.
    pub async fn execute_query(
        &self,
        sql: &str,
        parameters: Vec<SqlParameter>,
        cancel: &CancellationToken,
    ) -> Result<OptionalResult, QueryError> {
        // `DEALLOCATE` statements have no Redshift-side counterpart — the
        // Data API has no prepared-statement concept to deallocate. The
        // original matches this with a bare substring test rather than a
        // parsed keyword check; kept as-is, false positives and all.
        if sql.contains("deallocate") {
            return Ok(OptionalResult::Empty);
        }

        let statement_id = self.submit(sql, parameters).await?;
        let described = self.poll_until_terminal(&statement_id, cancel).await?;
        if !described.has_result_set {
            return Ok(OptionalResult::Empty);
        }
        self.fetch(&statement_id).await
    }

    async fn submit(&self, sql: &str, parameters: Vec<SqlParameter>) -> Result<String, QueryError> {
        let input = ExecuteStatementInput {
            sql: sql.to_string(),
            parameters,
            database: self.config.database.clone(),
            cluster_identifier: self.config.cluster_identifier.clone(),
            db_user: self.config.db_user.clone(),
            secret_arn: self.config.secret_arn.clone(),
            workgroup_name: self.config.workgroup_name.clone(),
            statement_name: STATEMENT_NAME.to_string(),
            with_event: true,
        };

        self.client
            .execute_statement(input)
            .await
            .map(|out| out.statement_id)
            .map_err(QueryError::ExecuteFailure)
    }

    async fn poll_until_terminal(
        &self,
        statement_id: &str,
        cancel: &CancellationToken,
    ) -> Result<DescribeStatementOutput, QueryError> {
        loop {
            let described = tokio::select! {
                biased;
                _ = cancel.cancelled() => return Err(QueryError::Cancelled),
                result = self.client.describe_statement(statement_id) => result,
            };
            let described = described.map_err(QueryError::DescribeFailure)?;

            if described.status.is_terminal() {
                return match described.status {
                    StatementStatus::Finished => Ok(described),
                    // ABORTED/FAILED are remote-reported query failures,
                    // not transport failures against DescribeStatement
                    // itself — distinct from QueryError::DescribeFailure.
                    _ => Err(QueryError::QueryExecution(
                        described
                            .error
                            .unwrap_or_else(|| format!("{:?}", described.status)),
                    )),
                };
            }

            tokio::select! {
                biased;
                _ = cancel.cancelled() => return Err(QueryError::Cancelled),
                _ = tokio::time::sleep(POLL_INTERVAL) => {}
            }
        }
    }

    /// Called only once the poll loop confirms `has_result_set`; a
    /// statement with nothing to fetch (DDL, DML with no RETURNING)
    /// never reaches here.
    async fn fetch(&self, statement_id: &str) -> Result<OptionalResult, QueryError> {
        self.client
            .get_statement_result(statement_id)
            .await
            .map(OptionalResult::Result)
            .map_err(QueryError::GetResultFailure)
    }
}
