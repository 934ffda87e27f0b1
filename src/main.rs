//! rdapp-proxy binary entry point.
//!
//! Flag set grounded on `original_source/cmd/root.go`; accept-loop
//! structure grounded on
//! `examples/singaraiona-teide/rs/src/server/main.rs`.

use std::sync::Arc;

use clap::Parser;

use rdapp_proxy::config::{ProxyConfig, RedshiftConnectionConfig};
use rdapp_proxy::redshift::{AwsRedshiftDataApiClient, Executor};
use rdapp_proxy::wire::ProxyHandlerFactory;

#[derive(Parser)]
#[command(
    name = "rdapp-proxy",
    version,
    about = "PostgreSQL wire protocol proxy that executes queries via the Amazon Redshift Data API"
)]
struct Args {
    /// Listen address (host:port)
    #[arg(long, default_value = "127.0.0.1:25432")]
    listen: String,

    /// Provisioned cluster identifier (mutually exclusive with --workgroup-name)
    #[arg(long)]
    cluster_identifier: Option<String>,

    /// Database name to run statements against
    #[arg(long)]
    database: String,

    /// Database user (required for cluster identifier auth)
    #[arg(long)]
    db_user: Option<String>,

    /// Secrets Manager ARN holding database credentials
    #[arg(long)]
    secret_arn: Option<String>,

    /// Serverless workgroup name (mutually exclusive with --cluster-identifier)
    #[arg(long)]
    workgroup_name: Option<String>,

    /// Enable debug-level logging
    #[arg(long)]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let proxy_config = ProxyConfig {
        listen_address: args.listen,
        verbose: args.verbose,
    };
    init_logging(proxy_config.verbose);

    let redshift_config = Arc::new(RedshiftConnectionConfig {
        database: args.database,
        cluster_identifier: args.cluster_identifier,
        db_user: args.db_user,
        secret_arn: args.secret_arn,
        workgroup_name: args.workgroup_name,
    });

    let aws_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
    let data_api_client = aws_sdk_redshiftdata::Client::new(&aws_config);
    let client = Arc::new(AwsRedshiftDataApiClient::new(data_api_client));

    let executor = Arc::new(Executor::new(client, redshift_config));
    let factory = Arc::new(ProxyHandlerFactory::new(executor));

    rdapp_proxy::listener::run(&proxy_config.listen_address, factory).await?;
    Ok(())
}
