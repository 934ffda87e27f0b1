//! `ResultWriter` implementation that buffers a query's columns and
//! rows, then encodes them into a pgwire `Response` — grounded on
//! `examples/singaraiona-teide/rs/src/server/encode.rs`'s
//! `encode_wire_result`.

use std::sync::Arc;

use async_trait::async_trait;
use futures::stream;
use pgwire::api::results::{DataRowEncoder, FieldFormat, FieldInfo, QueryResponse, Response, Tag};
use pgwire::error::PgWireResult;

use crate::error::QueryError;
use crate::query_handler::{ColumnDescriptor, ResultWriter};
use crate::types::Value;

#[derive(Default)]
pub struct BufferingWriter {
    columns: Option<Vec<ColumnDescriptor>>,
    rows: Vec<Vec<Value>>,
    tag: Option<String>,
}

impl BufferingWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Consume the buffered result and encode it as a pgwire `Response`.
    ///
    /// When `all_text` is set, every column is described as `VARCHAR`
    /// regardless of its translated type — extended-protocol clients
    /// (tokio-postgres, JDBC) request binary format and decode by
    /// declared type, and VARCHAR's binary form is just its UTF-8
    /// bytes, the same trick the teacher's `encode_wire_result` uses.
    pub fn into_response(self, all_text: bool) -> PgWireResult<Response> {
        let columns = match self.columns {
            Some(c) => c,
            None => {
                return Ok(Response::Execution(
                    Tag::new(&self.tag.unwrap_or_else(|| "OK".to_string())).with_rows(0),
                ))
            }
        };

        let schema = Arc::new(
            columns
                .iter()
                .map(|c| {
                    let pg_type = if all_text {
                        pgwire::api::Type::VARCHAR
                    } else {
                        c.pg_type.clone()
                    };
                    FieldInfo::new(c.name.clone(), None, None, pg_type, FieldFormat::Text)
                })
                .collect::<Vec<_>>(),
        );

        let mut encoded = Vec::with_capacity(self.rows.len());
        let mut encoder = DataRowEncoder::new(schema.clone());
        for row in &self.rows {
            for value in row {
                encode_one(&mut encoder, value)?;
            }
            encoded.push(Ok(encoder.take_row()));
        }

        let row_stream = stream::iter(encoded);
        Ok(Response::Query(QueryResponse::new(schema, row_stream)))
    }
}

fn encode_one(encoder: &mut DataRowEncoder, value: &Value) -> PgWireResult<()> {
    match value {
        Value::Null => encoder.encode_field(&None::<String>),
        Value::Text(s) => encoder.encode_field(&Some(s.clone())),
        Value::Long(l) => encoder.encode_field(&Some(*l)),
        Value::Double(d) => encoder.encode_field(&Some(*d)),
        Value::Bool(b) => encoder.encode_field(&Some(*b)),
        Value::Bytes(b) => encoder.encode_field(&Some(b.clone())),
    }
}

#[async_trait]
impl ResultWriter for BufferingWriter {
    async fn define(&mut self, columns: Vec<ColumnDescriptor>) -> Result<(), QueryError> {
        self.columns = if columns.is_empty() { None } else { Some(columns) };
        Ok(())
    }

    async fn row(&mut self, values: Vec<Value>) -> Result<(), QueryError> {
        self.rows.push(values);
        Ok(())
    }

    async fn complete(&mut self, tag: &str) -> Result<(), QueryError> {
        self.tag = Some(tag.to_string());
        Ok(())
    }
}
