//! Routes commands and queries to their handlers.

use std::sync::Arc;

use tracing::{debug, instrument};

use super::commands::BookCommand;
use super::error::ErrorResult;
use super::error_collector::ErrorCollector;
use super::handlers::BookHandlers;
use super::ports::BookRepository;
use super::queries::Query;
use super::request_context::{DispatchError, RequestContext};

/// Single entry point for book requests.
///
/// Commands are matched exhaustively over [`BookCommand`]; queries route
/// themselves through [`Query::dispatch`].
///
/// # Examples
/// ```
/// use std::sync::Arc;
///
/// use bookshelf::domain::ports::{FixedIdentity, FixtureBookRepository};
/// use bookshelf::domain::{CreateBook, Dispatcher, OwnerId, RequestContext};
///
/// # tokio::runtime::Builder::new_current_thread().build().expect("runtime").block_on(async {
/// let dispatcher = Dispatcher::new(Arc::new(FixtureBookRepository));
/// let identity = FixedIdentity::owner(OwnerId::random());
/// let ctx = RequestContext::new(&identity);
///
/// let outcome = dispatcher
///     .execute(CreateBook::new("", "Frank Herbert", "Science fiction"), &ctx)
///     .await
///     .expect("dispatch succeeds");
/// let error = outcome.expect_err("empty title is rejected");
/// assert_eq!(error.detail().message().code(), "invalidfields");
/// # });
/// ```
#[derive(Clone)]
pub struct Dispatcher {
    handlers: BookHandlers,
}

impl Dispatcher {
    /// Build a dispatcher whose handlers share `repository`.
    pub fn new(repository: Arc<dyn BookRepository>) -> Self {
        Self {
            handlers: BookHandlers::new(repository),
        }
    }

    /// Send a command and wait for it, recording business failures in `errors`.
    #[instrument(skip_all, fields(command = tracing::field::Empty))]
    pub async fn send(
        &self,
        command: impl Into<BookCommand> + Send,
        ctx: &RequestContext<'_>,
        errors: &mut ErrorCollector,
    ) -> Result<(), DispatchError> {
        let command = command.into();
        tracing::Span::current().record("command", command.kind());
        ctx.ensure_active()?;

        match &command {
            BookCommand::Create(create) => self.handlers.create(create, ctx, errors).await?,
            BookCommand::Update(update) => self.handlers.update(update, ctx, errors).await?,
            BookCommand::Delete(delete) => self.handlers.delete(delete, ctx, errors).await?,
        }
        if errors.has_error() {
            debug!("command finished with a recorded error");
        }
        Ok(())
    }

    /// Send a command with a fresh collector and return its outcome.
    pub async fn execute(
        &self,
        command: impl Into<BookCommand> + Send,
        ctx: &RequestContext<'_>,
    ) -> Result<Result<(), ErrorResult>, DispatchError> {
        let mut errors = ErrorCollector::new();
        self.send(command, ctx, &mut errors).await?;
        Ok(errors.into_result())
    }

    /// Send a query and receive its typed result.
    pub async fn query<Q: Query>(
        &self,
        query: Q,
        ctx: &RequestContext<'_>,
    ) -> Result<Q::Output, DispatchError> {
        ctx.ensure_active()?;
        query.dispatch(&self.handlers, ctx).await
    }
}

#[cfg(test)]
#[path = "dispatcher_tests.rs"]
mod tests;
