//! Handler factory: `pgwire` calls this once per accepted connection to
//! obtain the three handler instances a session needs. Grounded on
//! `examples/singaraiona-teide/rs/src/server/handler.rs`'s
//! `TeideHandlerFactory`.

use std::sync::Arc;

use pgwire::api::auth::StartupHandler;
use pgwire::api::query::{ExtendedQueryHandler, SimpleQueryHandler};
use pgwire::api::PgWireServerHandlers;

use crate::redshift::Executor;

use super::handler::{ProxyHandler, ProxyStartupHandler};

pub struct ProxyHandlerFactory {
    executor: Arc<Executor>,
}

impl ProxyHandlerFactory {
    pub fn new(executor: Arc<Executor>) -> Self {
        ProxyHandlerFactory { executor }
    }
}

impl PgWireServerHandlers for ProxyHandlerFactory {
    fn simple_query_handler(&self) -> Arc<impl SimpleQueryHandler> {
        Arc::new(ProxyHandler::new(self.executor.clone()))
    }

    fn extended_query_handler(&self) -> Arc<impl ExtendedQueryHandler> {
        Arc::new(ProxyHandler::new(self.executor.clone()))
    }

    fn startup_handler(&self) -> Arc<impl StartupHandler> {
        Arc::new(ProxyStartupHandler)
    }
}
