//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **memory**: volatile repository for tests and database-less runs
//! - **persistence**: PostgreSQL-backed repository using Diesel ORM
//!
//! Adapters are thin translators between domain types and storage
//! representations. They contain no business logic.

pub mod memory;
pub mod persistence;
