//! Command and query handlers for books.
//!
//! Mutating handlers short-circuit in a fixed order: validate the command,
//! apply the business rule, check ownership, then write. Each early exit
//! records exactly one error in the request's [`ErrorCollector`] and returns
//! `Ok(())`; only infrastructure failures surface as [`DispatchError`].

use std::sync::Arc;

use tracing::{debug, info};

use super::authorization::{Access, authorize};
use super::book::{Book, BookDraft, BookSummary};
use super::book_errors;
use super::commands::{CreateBook, DeleteBook, UpdateBook};
use super::error_collector::ErrorCollector;
use super::owner::OwnerId;
use super::ports::BookRepository;
use super::queries::GetBook;
use super::request_context::{DispatchError, RequestContext};

/// Handlers sharing one book repository.
#[derive(Clone)]
pub struct BookHandlers {
    repository: Arc<dyn BookRepository>,
}

impl BookHandlers {
    /// Create handlers backed by `repository`.
    pub fn new(repository: Arc<dyn BookRepository>) -> Self {
        Self { repository }
    }

    /// Register a book under the caller, rejecting duplicate titles.
    pub async fn create(
        &self,
        command: &CreateBook,
        ctx: &RequestContext<'_>,
        errors: &mut ErrorCollector,
    ) -> Result<(), DispatchError> {
        if !errors.validate_command(command) {
            debug!(book_id = %command.id(), "create rejected by validation");
            return Ok(());
        }
        let owner = ctx.owner_id()?;

        ctx.ensure_active()?;
        let existing = self
            .repository
            .count_by_title_and_owner(command.title(), &owner)
            .await?;
        if existing > 0 {
            debug!(%owner, title = command.title(), "create rejected: duplicate title");
            errors.record_domain_error(book_errors::duplicate_title());
            return Ok(());
        }

        let book = Book::new(BookDraft {
            id: command.id(),
            owner_id: owner,
            title: command.title().to_owned(),
            author: command.author().to_owned(),
            genre: command.genre().to_owned(),
        })?;
        ctx.ensure_active()?;
        self.repository.add(&book).await?;
        info!(%owner, book_id = %book.id(), "book created");
        Ok(())
    }

    /// Replace the fields of one of the caller's books.
    pub async fn update(
        &self,
        command: &UpdateBook,
        ctx: &RequestContext<'_>,
        errors: &mut ErrorCollector,
    ) -> Result<(), DispatchError> {
        if !errors.validate_command(command) {
            debug!(book_id = %command.id(), "update rejected by validation");
            return Ok(());
        }
        let owner = ctx.owner_id()?;

        let Some(mut book) = self.load_owned(command.id(), &owner, ctx, errors).await? else {
            return Ok(());
        };
        book.update(command.title(), command.author(), command.genre())?;

        ctx.ensure_active()?;
        self.repository.update(&book).await?;
        info!(%owner, book_id = %book.id(), "book updated");
        Ok(())
    }

    /// Remove one of the caller's books.
    pub async fn delete(
        &self,
        command: &DeleteBook,
        ctx: &RequestContext<'_>,
        errors: &mut ErrorCollector,
    ) -> Result<(), DispatchError> {
        if !errors.validate_command(command) {
            return Ok(());
        }
        let owner = ctx.owner_id()?;

        if self
            .load_owned(command.id(), &owner, ctx, errors)
            .await?
            .is_none()
        {
            return Ok(());
        }

        ctx.ensure_active()?;
        self.repository.delete(&command.id()).await?;
        info!(%owner, book_id = %command.id(), "book deleted");
        Ok(())
    }

    /// Read one of the caller's books; `None` when absent or foreign.
    pub async fn get(
        &self,
        query: &GetBook,
        ctx: &RequestContext<'_>,
    ) -> Result<Option<BookSummary>, DispatchError> {
        let owner = ctx.owner_id()?;
        ctx.ensure_active()?;
        Ok(self.repository.get_detail(&query.book_id(), &owner).await?)
    }

    /// List the caller's books ordered by title.
    pub async fn list(&self, ctx: &RequestContext<'_>) -> Result<Vec<BookSummary>, DispatchError> {
        let owner = ctx.owner_id()?;
        ctx.ensure_active()?;
        Ok(self.repository.list_by_owner(&owner).await?)
    }

    /// Load a book the caller owns, recording `booknotfound` otherwise.
    async fn load_owned(
        &self,
        book_id: uuid::Uuid,
        owner: &OwnerId,
        ctx: &RequestContext<'_>,
        errors: &mut ErrorCollector,
    ) -> Result<Option<Book>, DispatchError> {
        ctx.ensure_active()?;
        let Some(book) = self.repository.get_by_id(&book_id).await? else {
            debug!(%owner, %book_id, "book not found");
            errors.record_domain_error(book_errors::book_not_found());
            return Ok(None);
        };

        match authorize(book.owner_id(), owner) {
            Access::Granted => Ok(Some(book)),
            Access::NotFound => {
                debug!(%owner, %book_id, "book belongs to another owner");
                errors.record_domain_error(book_errors::book_not_found());
                Ok(None)
            }
        }
    }
}

#[cfg(test)]
#[path = "handlers_tests.rs"]
mod tests;
