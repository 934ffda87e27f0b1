//! Configuration surface: the Redshift connection triplet queries are
//! executed against, and the process-level settings the listener needs.

/// Authentication/addressing parameters passed verbatim on every
/// `ExecuteStatement` call. Exactly one of `cluster_identifier` or
/// `workgroup_name` is expected to be set (provisioned vs. serverless),
/// mirroring the two addressing modes the Data API itself accepts.
#[derive(Debug, Clone)]
pub struct RedshiftConnectionConfig {
    pub database: String,
    pub cluster_identifier: Option<String>,
    pub db_user: Option<String>,
    pub secret_arn: Option<String>,
    pub workgroup_name: Option<String>,
}

/// Process-level settings, independent of any single query or
/// connection — where to listen, how verbosely to log.
#[derive(Debug, Clone)]
pub struct ProxyConfig {
    pub listen_address: String,
    pub verbose: bool,
}
