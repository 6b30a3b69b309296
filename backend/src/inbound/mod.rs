//! Inbound adapters that turn external requests into dispatcher calls.
//!
//! Framework types stay here; the domain only sees commands, queries and a
//! [`RequestContext`](crate::domain::RequestContext).

pub mod http;
