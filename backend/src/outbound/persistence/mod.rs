//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Repositories are thin translators between Diesel rows and domain values;
//! `schema.rs` and `models.rs` stay private to this module. Connections come
//! from a `bb8` pool driven by `diesel-async`, and every database failure is
//! mapped into [`BookRepositoryError`](crate::domain::ports::BookRepositoryError).
//!
//! # Example
//!
//! ```ignore
//! use bookshelf::outbound::persistence::{DbPool, DieselBookRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/bookshelf")).await?;
//! let repo = DieselBookRepository::new(pool);
//! ```

mod diesel_book_repository;
mod error_mapping;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_book_repository::DieselBookRepository;
pub use migrations::{MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
