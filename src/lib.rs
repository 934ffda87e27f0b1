//! PostgreSQL wire protocol proxy backed by the Amazon Redshift Data API.
//!
//! A client speaks the ordinary Postgres frontend/backend protocol to
//! this process; every query is translated and executed remotely
//! through the Redshift Data API rather than against a local database.
//! See `SPEC_FULL.md` for the full component breakdown.

pub mod config;
pub mod error;
pub mod listener;
pub mod query_handler;
pub mod redshift;
pub mod translate;
pub mod types;
pub mod wire;
