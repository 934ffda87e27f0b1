//! Integration tests for the PostgreSQL wire protocol proxy.
//!
//! Starts the listener as an in-process task against a fake
//! `RedshiftDataApiClient` and connects via tokio-postgres, exercising
//! both the simple and extended query protocols. The in-process shape
//! (rather than spawning a subprocess) follows
//! `original_source/componenttest/rdapp_test.go`: a subprocess harness
//! cannot inject a fake Data API backend, since that would require
//! CLI-level control we don't expose.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio_postgres::NoTls;

use rdapp_proxy::config::RedshiftConnectionConfig;
use rdapp_proxy::redshift::model::{
    ColumnMetadata, DescribeStatementOutput, ExecuteStatementInput, ExecuteStatementOutput, Field,
    GetStatementResultOutput, StatementStatus,
};
use rdapp_proxy::redshift::{Executor, RedshiftDataApiClient};
use rdapp_proxy::wire::ProxyHandlerFactory;

/// A fake Data API backend driven entirely by a per-SQL-substring table,
/// so each test can script the exact statements it cares about without
/// needing live AWS credentials.
struct FakeDataApiClient {
    executed_statements: Mutex<Vec<String>>,
    next_id: AtomicU32,
}

impl FakeDataApiClient {
    fn new() -> Self {
        FakeDataApiClient {
            executed_statements: Mutex::new(Vec::new()),
            next_id: AtomicU32::new(0),
        }
    }

    fn call_count(&self) -> usize {
        self.executed_statements.lock().unwrap().len()
    }
}

#[async_trait]
impl RedshiftDataApiClient for FakeDataApiClient {
    async fn execute_statement(
        &self,
        input: ExecuteStatementInput,
    ) -> Result<ExecuteStatementOutput, String> {
        if input.sql.contains("nonexistent") {
            return Err("relation \"nonexistent\" does not exist".to_string());
        }
        self.executed_statements.lock().unwrap().push(input.sql.clone());
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        Ok(ExecuteStatementOutput {
            statement_id: format!("stmt-{id}"),
        })
    }

    async fn describe_statement(
        &self,
        _statement_id: &str,
    ) -> Result<DescribeStatementOutput, String> {
        Ok(DescribeStatementOutput {
            status: StatementStatus::Finished,
            has_result_set: true,
            error: None,
        })
    }

    async fn get_statement_result(
        &self,
        _statement_id: &str,
    ) -> Result<GetStatementResultOutput, String> {
        Ok(GetStatementResultOutput {
            column_metadata: vec![ColumnMetadata {
                name: "count".to_string(),
                type_name: "int8".to_string(),
            }],
            records: vec![vec![Field::Long(5)]],
        })
    }
}

/// Start the proxy listening on `port` against a fresh fake client,
/// return a handle to that client (for asserting on calls made)
/// alongside the listener task.
struct RunningProxy {
    client: Arc<FakeDataApiClient>,
    _task: tokio::task::JoinHandle<()>,
}

async fn start_proxy(port: u16) -> RunningProxy {
    let client = Arc::new(FakeDataApiClient::new());
    let config = Arc::new(RedshiftConnectionConfig {
        database: "dev".to_string(),
        cluster_identifier: Some("test-cluster".to_string()),
        db_user: Some("test".to_string()),
        secret_arn: None,
        workgroup_name: None,
    });
    let executor = Arc::new(Executor::new(client.clone(), config));
    let factory = Arc::new(ProxyHandlerFactory::new(executor));

    let addr = format!("127.0.0.1:{port}");
    let task = tokio::spawn(async move {
        let _ = rdapp_proxy::listener::run(&addr, factory).await;
    });

    // Give the listener a moment to bind before the client connects.
    tokio::time::sleep(std::time::Duration::from_millis(100)).await;

    RunningProxy { client, _task: task }
}

async fn connect(port: u16) -> tokio_postgres::Client {
    let connstr = format!("host=127.0.0.1 port={port} user=test dbname=dev");
    let (client, connection) = tokio_postgres::connect(&connstr, NoTls)
        .await
        .expect("failed to connect");

    tokio::spawn(async move {
        if let Err(e) = connection.await {
            eprintln!("connection error: {e}");
        }
    });

    client
}

#[tokio::test]
async fn simple_query_returns_translated_rows() {
    let proxy = start_proxy(25501).await;
    let client = connect(25501).await;

    let messages = client
        .simple_query("SELECT COUNT(*) FROM t")
        .await
        .unwrap();
    let rows: Vec<_> = messages
        .iter()
        .filter_map(|m| match m {
            tokio_postgres::SimpleQueryMessage::Row(row) => Some(row),
            _ => None,
        })
        .collect();

    assert_eq!(rows.len(), 1);
    let count: &str = rows[0].get(0).unwrap();
    assert_eq!(count, "5");
    assert_eq!(proxy.client.call_count(), 1);
}

#[tokio::test]
async fn extended_query_rewrites_dollar_placeholder_to_colon_name() {
    let proxy = start_proxy(25502).await;
    let client = connect(25502).await;

    let rows = client
        .query("SELECT COUNT(*) FROM t WHERE name = $1", &[&"alice"])
        .await
        .unwrap();

    assert_eq!(rows.len(), 1);
    let count: &str = rows[0].get(0);
    assert_eq!(count, "5");

    let statements = proxy.client.executed_statements.lock().unwrap();
    assert!(statements[0].contains(":1"));
    assert!(!statements[0].contains('$'));
}

#[tokio::test]
async fn deallocate_is_absorbed_without_a_data_api_call() {
    let proxy = start_proxy(25503).await;
    let client = connect(25503).await;

    // The short-circuit is a case-sensitive substring match on the
    // literal word "deallocate" (see DESIGN.md's Open Questions) — a
    // client sending upper-case `DEALLOCATE` would not be absorbed.
    client.simple_query("deallocate all").await.unwrap();

    assert_eq!(proxy.client.call_count(), 0);
}

#[tokio::test]
async fn remote_execute_failure_surfaces_as_a_wire_error() {
    let proxy = start_proxy(25504).await;
    let client = connect(25504).await;

    let err = client
        .simple_query("SELECT * FROM nonexistent")
        .await
        .unwrap_err();
    let msg = err.to_string();
    assert!(
        msg.contains("nonexistent") || msg.contains("XX000"),
        "error should surface the remote failure: {msg}"
    );
}
