//! Per-connection pgwire handler: adapts `query_handler::handle` to the
//! `SimpleQueryHandler`/`ExtendedQueryHandler`/`StartupHandler` traits.
//!
//! Grounded on
//! `examples/singaraiona-teide/rs/src/server/handler.rs`'s `TeideHandler`
//! and `TeideStartupHandler` — same shape (one handler struct per
//! connection, `ErrorInfo::new("ERROR", "XX000", ...)` error wrapping),
//! with the engine bridge replaced by `query_handler::handle`.

use std::fmt::Debug;
use std::sync::Arc;

use async_trait::async_trait;
use futures::sink::Sink;
use pgwire::api::auth::{DefaultServerParameterProvider, StartupHandler};
use pgwire::api::portal::Portal;
use pgwire::api::query::{ExtendedQueryHandler, SimpleQueryHandler};
use pgwire::api::results::{DescribePortalResponse, DescribeStatementResponse, Response};
use pgwire::api::stmt::StoredStatement;
use pgwire::api::store::PortalStore;
use pgwire::api::{ClientInfo, ClientPortalStore, Type};
use pgwire::error::{ErrorInfo, PgWireError, PgWireResult};
use pgwire::messages::{PgWireBackendMessage, PgWireFrontendMessage};
use tokio_util::sync::CancellationToken;

use crate::error::QueryError;
use crate::query_handler;
use crate::redshift::Executor;

use super::parser::ProxyQueryParser;
use super::writer::BufferingWriter;

fn to_pgwire_error(err: QueryError) -> PgWireError {
    match err {
        QueryError::Protocol(msg) => {
            PgWireError::UserError(Box::new(ErrorInfo::new("FATAL".to_string(), "08P01".to_string(), msg)))
        }
        other => PgWireError::UserError(Box::new(ErrorInfo::new(
            "ERROR".to_string(),
            "XX000".to_string(),
            other.to_string(),
        ))),
    }
}

/// Decode every bound parameter in `portal` as a UTF-8 string,
/// regardless of the wire format the client bound it in. The Data API
/// only ever consumes string parameter values, so this is the single
/// conversion point between Postgres's typed parameters and the
/// Data API's stringly-typed ones.
fn extract_parameters(portal: &Portal<String>) -> PgWireResult<Vec<String>> {
    let mut values = Vec::with_capacity(portal.parameter_len());
    for idx in 0..portal.parameter_len() {
        let value: Option<String> = portal.parameter(idx, &Type::TEXT)?;
        values.push(value.unwrap_or_default());
    }
    Ok(values)
}

/// Per-connection query handler. Holds the shared, read-only Data API
/// executor — no per-connection mutable state, matching §5's
/// concurrency model.
pub struct ProxyHandler {
    executor: Arc<Executor>,
}

impl ProxyHandler {
    pub fn new(executor: Arc<Executor>) -> Self {
        ProxyHandler { executor }
    }

    async fn run_query(&self, sql: &str, parameters: &[String], all_text: bool) -> PgWireResult<Response> {
        let mut writer = BufferingWriter::new();
        let cancel = CancellationToken::new();
        query_handler::handle(&self.executor, sql, parameters, &mut writer, &cancel)
            .await
            .map_err(to_pgwire_error)?;
        writer.into_response(all_text)
    }
}

#[async_trait]
impl SimpleQueryHandler for ProxyHandler {
    async fn do_query<C>(&self, _client: &mut C, query: &str) -> PgWireResult<Vec<Response>>
    where
        C: ClientInfo + Unpin + Send + Sync,
    {
        tracing::info!(query, "simple query");
        Ok(vec![self.run_query(query, &[], false).await?])
    }
}

#[async_trait]
impl ExtendedQueryHandler for ProxyHandler {
    type Statement = String;
    type QueryParser = ProxyQueryParser;

    fn query_parser(&self) -> Arc<Self::QueryParser> {
        Arc::new(ProxyQueryParser)
    }

    async fn do_query<C>(
        &self,
        _client: &mut C,
        portal: &Portal<String>,
        _max_rows: usize,
    ) -> PgWireResult<Response>
    where
        C: ClientInfo + ClientPortalStore + Sink<PgWireBackendMessage> + Unpin + Send + Sync,
        C::PortalStore: PortalStore<Statement = String>,
        C::Error: Debug,
        PgWireError: From<<C as Sink<PgWireBackendMessage>>::Error>,
    {
        let sql = portal.statement.statement.clone();
        let parameters = extract_parameters(portal)?;
        tracing::info!(sql = %sql, param_count = parameters.len(), "extended query");
        self.run_query(&sql, &parameters, true).await
    }

    async fn do_describe_statement<C>(
        &self,
        _client: &mut C,
        statement: &StoredStatement<String>,
    ) -> PgWireResult<DescribeStatementResponse>
    where
        C: ClientInfo + ClientPortalStore + Sink<PgWireBackendMessage> + Unpin + Send + Sync,
        C::PortalStore: PortalStore<Statement = String>,
        C::Error: Debug,
        PgWireError: From<<C as Sink<PgWireBackendMessage>>::Error>,
    {
        // The result schema is only known after a round trip to Redshift;
        // report no columns here and let do_query's Response carry them.
        // Parameter *count*, unlike the schema, is knowable up front from
        // the statement text itself, and clients check it before binding.
        let param_types =
            vec![Type::UNKNOWN; crate::translate::max_parameter_index(&statement.statement)];
        Ok(DescribeStatementResponse::new(param_types, vec![]))
    }

    async fn do_describe_portal<C>(
        &self,
        _client: &mut C,
        _portal: &Portal<String>,
    ) -> PgWireResult<DescribePortalResponse>
    where
        C: ClientInfo + ClientPortalStore + Sink<PgWireBackendMessage> + Unpin + Send + Sync,
        C::PortalStore: PortalStore<Statement = String>,
        C::Error: Debug,
        PgWireError: From<<C as Sink<PgWireBackendMessage>>::Error>,
    {
        Ok(DescribePortalResponse::no_data())
    }
}

/// Startup handler overriding the three `ParameterStatus` entries the
/// wire session contract pins to fixed values (spec.md §4.E):
/// `server_version=11.5`, `DateStyle=ISO`, `TimeZone=US/Central`.
pub struct ProxyStartupHandler;

#[async_trait]
impl StartupHandler for ProxyStartupHandler {
    async fn on_startup<C>(&self, client: &mut C, message: PgWireFrontendMessage) -> PgWireResult<()>
    where
        C: ClientInfo + Sink<PgWireBackendMessage> + Unpin + Send + Sync,
        C::Error: Debug,
        PgWireError: From<<C as Sink<PgWireBackendMessage>>::Error>,
    {
        if let PgWireFrontendMessage::Startup(ref startup) = message {
            pgwire::api::auth::protocol_negotiation(client, startup).await?;
            pgwire::api::auth::save_startup_parameters_to_metadata(client, startup);

            let mut params = DefaultServerParameterProvider::default();
            params.server_version = "11.5".to_string();
            params.date_style = "ISO".to_string();
            params.time_zone = "US/Central".to_string();

            pgwire::api::auth::finish_authentication(client, &params).await?;
        }
        Ok(())
    }
}
