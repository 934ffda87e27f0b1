//! The Data API transport boundary, abstracted behind a trait so the
//! executor can be exercised against a fake in tests — mirroring
//! `original_source/pkg/clients.go`'s `RedshiftDataApiClient` interface.

use async_trait::async_trait;

use super::model::{
    DescribeStatementOutput, ExecuteStatementInput, ExecuteStatementOutput,
    GetStatementResultOutput,
};

#[async_trait]
pub trait RedshiftDataApiClient: Send + Sync {
    async fn execute_statement(
        &self,
        input: ExecuteStatementInput,
    ) -> Result<ExecuteStatementOutput, String>;

    async fn describe_statement(
        &self,
        statement_id: &str,
    ) -> Result<DescribeStatementOutput, String>;

    async fn get_statement_result(
        &self,
        statement_id: &str,
    ) -> Result<GetStatementResultOutput, String>;
}
