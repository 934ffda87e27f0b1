//! Wire Session: the `pgwire`-facing adapter layer. Frame codec and
//! protocol state (startup negotiation, portal/statement storage) are
//! delegated entirely to the `pgwire` crate; this module only supplies
//! the session-level callbacks spec.md §4.E enumerates.

pub mod factory;
pub mod handler;
pub mod parser;
pub mod writer;

pub use factory::ProxyHandlerFactory;
