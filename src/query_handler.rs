//! The query handler: the one place that ties translation, execution,
//! and result delivery together for a single query.
//!
//! Grounded on `original_source/pkg/query_handler.go`'s `HandleQuery`.

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use crate::error::QueryError;
use crate::redshift::{Executor, OptionalResult};
use crate::translate::{rewrite_params, rewrite_sql};
use crate::types::{field_to_value, redshift_type_to_pg, Value};

/// Describes one output column: its wire name and Postgres type.
#[derive(Debug, Clone)]
pub struct ColumnDescriptor {
    pub name: String,
    pub pg_type: pgwire::api::Type,
}

/// Sink the query handler streams a result into. The Wire Session
/// provides the concrete implementation that adapts these calls to
/// `pgwire`'s `Response` types; `define` is always called before any
/// `row`, and `complete` only fires once, on success.
#[async_trait]
pub trait ResultWriter: Send {
    async fn define(&mut self, columns: Vec<ColumnDescriptor>) -> Result<(), QueryError>;
    async fn row(&mut self, values: Vec<Value>) -> Result<(), QueryError>;
    async fn complete(&mut self, tag: &str) -> Result<(), QueryError>;
}

/// Run one query end to end: mint a correlation id, translate the SQL
/// and its positional parameters, execute against the Data API, and
/// stream the result (if any) into `writer`.
#[tracing::instrument(skip(executor, parameters, writer, cancel), fields(correlation_id = %Uuid::new_v4()))]
pub async fn handle(
    executor: &Executor,
    sql: &str,
    parameters: &[String],
    writer: &mut dyn ResultWriter,
    cancel: &CancellationToken,
) -> Result<(), QueryError> {
    let redshift_sql = rewrite_sql(sql);
    let redshift_params = rewrite_params(parameters);

    tracing::debug!(sql = %redshift_sql, param_count = redshift_params.len(), "translated query");

    let result = executor
        .execute_query(&redshift_sql, redshift_params, cancel)
        .await?;

    match result {
        OptionalResult::Result(out) => {
            let columns = out
                .column_metadata
                .iter()
                .map(|c| {
                    Ok(ColumnDescriptor {
                        name: c.name.clone(),
                        pg_type: redshift_type_to_pg(&c.type_name)?,
                    })
                })
                .collect::<Result<Vec<_>, QueryError>>()?;

            writer.define(columns).await?;

            for record in &out.records {
                let row: Vec<Value> = record.iter().map(field_to_value).collect();
                writer.row(row).await?;
            }
        }
        OptionalResult::Empty => {
            writer.define(vec![]).await?;
        }
    }

    writer.complete("OK").await?;
    Ok(())
}
