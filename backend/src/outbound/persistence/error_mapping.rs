//! Translation of pool and Diesel failures into repository errors.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use crate::domain::ports::BookRepositoryError;

use super::pool::PoolError;

/// Pool failures always mean the database is unreachable.
pub(crate) fn map_pool_error(error: PoolError) -> BookRepositoryError {
    BookRepositoryError::connection(error.message())
}

/// Map Diesel failures, keeping driver detail out of the message.
pub(crate) fn map_diesel_error(error: DieselError) -> BookRepositoryError {
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        other => debug!(error = %other, "diesel operation failed"),
    }

    match error {
        DieselError::NotFound => BookRepositoryError::query("record not found"),
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            BookRepositoryError::query("book id already exists")
        }
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _)
        | DieselError::BrokenTransactionManager => {
            BookRepositoryError::connection("database connection error")
        }
        DieselError::QueryBuilderError(_) => BookRepositoryError::query("database query error"),
        _ => BookRepositoryError::query("database error"),
    }
}
