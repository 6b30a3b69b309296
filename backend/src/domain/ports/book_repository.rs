//! Port for book persistence and owner-scoped reads.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Book, BookSummary, OwnerId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by book repository adapters.
    pub enum BookRepositoryError {
        /// Repository connection could not be established.
        Connection {
            /// Driver message.
            message: String,
        } =>
            "book repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query {
            /// Driver message.
            message: String,
        } =>
            "book repository query failed: {message}",
    }
}

/// Port for storing books and reading them back per owner.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookRepository: Send + Sync {
    /// Count the owner's books whose title matches exactly.
    async fn count_by_title_and_owner(
        &self,
        title: &str,
        owner: &OwnerId,
    ) -> Result<u64, BookRepositoryError>;

    /// Insert a new book.
    async fn add(&self, book: &Book) -> Result<(), BookRepositoryError>;

    /// Whether the owner has a book with this id.
    async fn exists_for_owner(
        &self,
        book_id: &Uuid,
        owner: &OwnerId,
    ) -> Result<bool, BookRepositoryError>;

    /// Remove a book by id. Removing an absent id is not an error.
    async fn delete(&self, book_id: &Uuid) -> Result<(), BookRepositoryError>;

    /// Load a book regardless of owner.
    async fn get_by_id(&self, book_id: &Uuid) -> Result<Option<Book>, BookRepositoryError>;

    /// Overwrite the stored fields of an existing book.
    async fn update(&self, book: &Book) -> Result<(), BookRepositoryError>;

    /// List the owner's books ordered by title, then id.
    async fn list_by_owner(&self, owner: &OwnerId)
    -> Result<Vec<BookSummary>, BookRepositoryError>;

    /// Read one book if it exists and belongs to the owner.
    async fn get_detail(
        &self,
        book_id: &Uuid,
        owner: &OwnerId,
    ) -> Result<Option<BookSummary>, BookRepositoryError>;
}

/// Fixture implementation for tests that do not exercise persistence.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureBookRepository;

#[async_trait]
impl BookRepository for FixtureBookRepository {
    async fn count_by_title_and_owner(
        &self,
        _title: &str,
        _owner: &OwnerId,
    ) -> Result<u64, BookRepositoryError> {
        Ok(0)
    }

    async fn add(&self, _book: &Book) -> Result<(), BookRepositoryError> {
        Ok(())
    }

    async fn exists_for_owner(
        &self,
        _book_id: &Uuid,
        _owner: &OwnerId,
    ) -> Result<bool, BookRepositoryError> {
        Ok(false)
    }

    async fn delete(&self, _book_id: &Uuid) -> Result<(), BookRepositoryError> {
        Ok(())
    }

    async fn get_by_id(&self, _book_id: &Uuid) -> Result<Option<Book>, BookRepositoryError> {
        Ok(None)
    }

    async fn update(&self, _book: &Book) -> Result<(), BookRepositoryError> {
        Ok(())
    }

    async fn list_by_owner(
        &self,
        _owner: &OwnerId,
    ) -> Result<Vec<BookSummary>, BookRepositoryError> {
        Ok(Vec::new())
    }

    async fn get_detail(
        &self,
        _book_id: &Uuid,
        _owner: &OwnerId,
    ) -> Result<Option<BookSummary>, BookRepositoryError> {
        Ok(None)
    }
}
