//! Production `RedshiftDataApiClient` backed by the published
//! `aws-sdk-redshiftdata` crate — the concrete counterpart of the Go
//! original's `aws-sdk-go-v2/service/redshiftdata` client.

use async_trait::async_trait;
use aws_sdk_redshiftdata::types::Field as AwsField;
use aws_sdk_redshiftdata::Client;

use crate::error::QueryError;

use super::client::RedshiftDataApiClient;
use super::model::{
    ColumnMetadata, DescribeStatementOutput, ExecuteStatementInput, ExecuteStatementOutput,
    Field, GetStatementResultOutput, StatementStatus,
};

pub struct AwsRedshiftDataApiClient {
    client: Client,
}

impl AwsRedshiftDataApiClient {
    pub fn new(client: Client) -> Self {
        AwsRedshiftDataApiClient { client }
    }
}

/// Narrow the AWS SDK's own tagged union down to our closed `Field`
/// enum. The `IsNull` tag itself (regardless of its boolean payload)
/// signals a null field — the Data API never sets it to communicate a
/// boolean value, `BooleanValue` does that. Any variant this crate does
/// not recognize (including the SDK's own unmodeled-response fallback)
/// is a `DialectUnsupported` error rather than a silent null.
fn from_aws_field(v: &AwsField) -> Result<Field, QueryError> {
    match v {
        AwsField::IsNull(_) => Ok(Field::Null),
        AwsField::BlobValue(b) => Ok(Field::Blob(b.clone().into_inner())),
        AwsField::BooleanValue(b) => Ok(Field::Boolean(*b)),
        AwsField::DoubleValue(d) => Ok(Field::Double(*d)),
        AwsField::LongValue(l) => Ok(Field::Long(*l)),
        AwsField::StringValue(s) => Ok(Field::StringValue(s.clone())),
        other => Err(QueryError::DialectUnsupported(format!(
            "unknown field variant: {other:?}"
        ))),
    }
}

#[async_trait]
impl RedshiftDataApiClient for AwsRedshiftDataApiClient {
    async fn execute_statement(
        &self,
        input: ExecuteStatementInput,
    ) -> Result<ExecuteStatementOutput, String> {
        let mut request = self
            .client
            .execute_statement()
            .database(&input.database)
            .sql(&input.sql)
            .statement_name(&input.statement_name)
            .with_event(input.with_event)
            .set_cluster_identifier(input.cluster_identifier.clone())
            .set_db_user(input.db_user.clone())
            .set_secret_arn(input.secret_arn.clone())
            .set_workgroup_name(input.workgroup_name.clone());

        for param in &input.parameters {
            let built = aws_sdk_redshiftdata::types::SqlParameter::builder()
                .name(&param.name)
                .value(&param.value)
                .build()
                .map_err(|e| e.to_string())?;
            request = request.parameters(built);
        }

        let output = request.send().await.map_err(|e| e.to_string())?;
        let statement_id = output.id().to_string();
        Ok(ExecuteStatementOutput { statement_id })
    }

    async fn describe_statement(
        &self,
        statement_id: &str,
    ) -> Result<DescribeStatementOutput, String> {
        let output = self
            .client
            .describe_statement()
            .id(statement_id)
            .send()
            .await
            .map_err(|e| e.to_string())?;

        let status = output
            .status()
            .map(|s| StatementStatus::from_raw(s.as_str()))
            .unwrap_or(StatementStatus::Other(String::new()));

        Ok(DescribeStatementOutput {
            status,
            has_result_set: output.has_result_set().unwrap_or(false),
            error: output.error().map(|s| s.to_string()),
        })
    }

    async fn get_statement_result(
        &self,
        statement_id: &str,
    ) -> Result<GetStatementResultOutput, String> {
        let output = self
            .client
            .get_statement_result()
            .id(statement_id)
            .send()
            .await
            .map_err(|e| e.to_string())?;

        let column_metadata = output
            .column_metadata()
            .iter()
            .map(|c| ColumnMetadata {
                name: c.name().unwrap_or_default().to_string(),
                type_name: c.type_name().unwrap_or_default().to_string(),
            })
            .collect();

        let records = output
            .records()
            .iter()
            .map(|row| row.iter().map(from_aws_field).collect::<Result<Vec<Field>, QueryError>>())
            .collect::<Result<Vec<Vec<Field>>, QueryError>>()
            .map_err(|e| e.to_string())?;

        Ok(GetStatementResultOutput {
            column_metadata,
            records,
        })
    }
}
