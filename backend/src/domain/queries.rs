//! Read-only book queries.
//!
//! Each query names its result type through [`Query::Output`] and routes
//! itself to the matching handler, so the dispatcher returns a typed value
//! without downcasting.

use async_trait::async_trait;
use uuid::Uuid;

use super::book::BookSummary;
use super::handlers::BookHandlers;
use super::request_context::{DispatchError, RequestContext};

/// A request that returns a typed value and never mutates state.
#[async_trait]
pub trait Query: Send {
    /// Value produced on success.
    type Output: Send;

    /// Run the query against its handler.
    async fn dispatch(
        self,
        handlers: &BookHandlers,
        ctx: &RequestContext<'_>,
    ) -> Result<Self::Output, DispatchError>;
}

/// Fetch one of the caller's books.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GetBook {
    book_id: Uuid,
}

impl GetBook {
    /// Look up the book identified by `book_id`.
    pub fn new(book_id: Uuid) -> Self {
        Self { book_id }
    }

    /// Identifier being looked up.
    pub fn book_id(&self) -> Uuid {
        self.book_id
    }
}

#[async_trait]
impl Query for GetBook {
    type Output = Option<BookSummary>;

    async fn dispatch(
        self,
        handlers: &BookHandlers,
        ctx: &RequestContext<'_>,
    ) -> Result<Self::Output, DispatchError> {
        handlers.get(&self, ctx).await
    }
}

/// List every book the caller owns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListBooks;

#[async_trait]
impl Query for ListBooks {
    type Output = Vec<BookSummary>;

    async fn dispatch(
        self,
        handlers: &BookHandlers,
        ctx: &RequestContext<'_>,
    ) -> Result<Self::Output, DispatchError> {
        handlers.list(ctx).await
    }
}
