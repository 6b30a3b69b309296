//! Book catalogue service: command dispatch, validation and error
//! aggregation behind a REST adapter.

pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;

pub use middleware::Trace;
