//! Per-request collaborators passed to handlers.

use thiserror::Error;

use super::book::BookValidationError;
use super::cancellation::CancelSignal;
use super::owner::OwnerId;
use super::ports::{BookRepositoryError, IdentityError, IdentityProvider};

/// Infrastructure failures that abort dispatch.
///
/// Business failures never appear here; they are recorded in the request's
/// [`ErrorCollector`](super::ErrorCollector).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DispatchError {
    /// The request was cancelled before a repository call.
    #[error("request cancelled")]
    Cancelled,
    /// The caller could not be identified.
    #[error(transparent)]
    Identity(#[from] IdentityError),
    /// The repository failed.
    #[error(transparent)]
    Repository(#[from] BookRepositoryError),
    /// A validated command still produced an invalid aggregate.
    #[error("book invariant violated: {0}")]
    InvalidBook(#[from] BookValidationError),
}

/// Identity and cancellation for a single dispatched request.
#[derive(Clone)]
pub struct RequestContext<'a> {
    identity: &'a dyn IdentityProvider,
    cancel: CancelSignal,
}

impl<'a> RequestContext<'a> {
    /// Context that is never cancelled.
    pub fn new(identity: &'a dyn IdentityProvider) -> Self {
        Self {
            identity,
            cancel: CancelSignal::never(),
        }
    }

    /// Attach a cancellation signal.
    #[must_use]
    pub fn with_cancel(mut self, cancel: CancelSignal) -> Self {
        self.cancel = cancel;
        self
    }

    /// Resolve the caller.
    pub fn owner_id(&self) -> Result<OwnerId, DispatchError> {
        Ok(self.identity.current_owner_id()?)
    }

    /// Fail with [`DispatchError::Cancelled`] once cancellation was requested.
    pub fn ensure_active(&self) -> Result<(), DispatchError> {
        if self.cancel.is_cancelled() {
            return Err(DispatchError::Cancelled);
        }
        Ok(())
    }
}

impl std::fmt::Debug for RequestContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestContext")
            .field("cancelled", &self.cancel.is_cancelled())
            .finish_non_exhaustive()
    }
}
