//! HTTP inbound adapter exposing the book REST endpoints.

pub mod books;
pub mod error;
pub mod health;
pub mod session;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod validation;

pub use error::ApiResult;
