//! The Redshift Data API collaborator: a transport-agnostic model, the
//! client trait it is accessed through, a production adapter over
//! `aws-sdk-redshiftdata`, and the submit/poll/fetch executor.

pub mod aws_client;
pub mod client;
pub mod executor;
pub mod model;

pub use aws_client::AwsRedshiftDataApiClient;
pub use client::RedshiftDataApiClient;
pub use executor::{Executor, OptionalResult};
pub use model::{ColumnMetadata, Field, StatementStatus};
