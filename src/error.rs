//! Error taxonomy for the proxy's query pipeline and process lifecycle.

use thiserror::Error;

/// Errors that can occur while translating, executing, or streaming back
/// the result of a single query.
#[derive(Debug, Error)]
pub enum QueryError {
    /// A SQL or Redshift column/value shape this proxy has no translation
    /// rule for (unknown Redshift type name, unknown Data API field tag).
    #[error("dialect translation failed: {0}")]
    DialectUnsupported(String),

    /// The Data API rejected `ExecuteStatement` itself (bad SQL, auth
    /// failure, throttling before a statement id was even issued).
    #[error("error while performing execute statement operation: {0}")]
    ExecuteFailure(String),

    /// Polling `DescribeStatement` failed, or the statement reached a
    /// terminal `FAILED`/`ABORTED` status.
    #[error("error while performing describe statement operation: {0}")]
    DescribeFailure(String),

    /// `GetStatementResult` failed after the statement finished
    /// successfully.
    #[error("error while performing get statement result operation: {0}")]
    GetResultFailure(String),

    /// Catch-all for a query that failed for a reason not covered above
    /// (used when wrapping a generic upstream error with query context).
    #[error("query execution failed: {0}")]
    QueryExecution(String),

    /// The query's correlation-scoped cancellation token fired before
    /// completion (client disconnected, server shutting down).
    #[error("query cancelled")]
    Cancelled,

    /// The wire session received a frame it cannot honor (caller bug or
    /// unsupported sub-protocol). Closes the connection.
    #[error("protocol error: {0}")]
    Protocol(String),
}

/// Process-fatal conditions — anything that should abort startup or the
/// whole server, as opposed to failing a single in-flight query.
#[derive(Debug, Error)]
pub enum ProxyError {
    #[error("failed to bind listener on {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to resolve AWS configuration: {0}")]
    AwsConfig(String),
}
