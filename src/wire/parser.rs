//! Extended-protocol statement parsing.
//!
//! Grounded on `examples/singaraiona-teide/rs/src/server/handler.rs`'s
//! `TeideQueryParser`: we also have no local planner, so "parsing" is
//! just storing the raw SQL text — the Data API does its own parsing
//! remotely when the statement is finally executed.

use async_trait::async_trait;
use pgwire::api::portal::Format;
use pgwire::api::stmt::QueryParser;
use pgwire::api::results::FieldInfo;
use pgwire::api::{ClientInfo, Type};
use pgwire::error::PgWireResult;

pub struct ProxyQueryParser;

#[async_trait]
impl QueryParser for ProxyQueryParser {
    type Statement = String;

    async fn parse_sql<C>(&self, _client: &C, sql: &str, _types: &[Option<Type>]) -> PgWireResult<String>
    where
        C: ClientInfo + Unpin + Send + Sync,
    {
        Ok(sql.to_string())
    }

    fn get_parameter_types(&self, stmt: &String) -> PgWireResult<Vec<Type>> {
        // The Data API never reports parameter *types* up front — only
        // the count is knowable ahead of execution, by counting the
        // highest `$N` the statement text references. Declaring the
        // right count as `UNKNOWN` is required: extended-query clients
        // check `len(param_types) == len(params)` before ever sending
        // `Bind`, and reject the query client-side on a mismatch.
        let count = crate::translate::max_parameter_index(stmt);
        Ok(vec![Type::UNKNOWN; count])
    }

    fn get_result_schema(
        &self,
        _stmt: &String,
        _column_format: Option<&Format>,
    ) -> PgWireResult<Vec<FieldInfo>> {
        // Lazy, same reasoning as parameter types: the result schema is
        // only known after a round trip to Redshift, so Describe reports
        // no columns and the client (JDBC/tokio-postgres) falls back to
        // treating Execute's row descriptions as authoritative.
        Ok(vec![])
    }
}
