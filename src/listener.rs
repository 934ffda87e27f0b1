//! Listener / Supervisor: binds the TCP socket and spawns one task per
//! accepted connection. Grounded on
//! `examples/singaraiona-teide/rs/src/server/main.rs`'s accept loop and
//! `original_source/pkg/listener.go`'s `RunPostgresRedshiftProxy`.

use std::sync::Arc;

use tokio::net::TcpListener;

use crate::error::ProxyError;
use crate::wire::ProxyHandlerFactory;

/// Bind `listen_address` and serve connections until `Ctrl+C` is
/// received. A bind failure is process-fatal; a per-connection error is
/// logged and only that connection is dropped.
pub async fn run(listen_address: &str, factory: Arc<ProxyHandlerFactory>) -> Result<(), ProxyError> {
    let listener = TcpListener::bind(listen_address)
        .await
        .map_err(|source| ProxyError::Bind {
            addr: listen_address.to_string(),
            source,
        })?;

    tracing::info!(addr = %listen_address, "listening");

    loop {
        tokio::select! {
            accepted = listener.accept() => {
                match accepted {
                    Ok((socket, peer)) => {
                        tracing::debug!(%peer, "accepted connection");
                        let factory = factory.clone();
                        tokio::spawn(async move {
                            if let Err(e) = pgwire::tokio::process_socket(socket, None, factory).await {
                                tracing::warn!(%peer, error = %e, "connection ended with error");
                            }
                        });
                    }
                    Err(e) => tracing::warn!(error = %e, "failed to accept connection"),
                }
            }
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("received Ctrl+C, shutting down");
                break;
            }
        }
    }

    Ok(())
}
