//! Shared HTTP adapter state.
//!
//! Handlers accept this state via `actix_web::web::Data` and only reach the
//! domain through the [`Dispatcher`].

use std::sync::Arc;

use crate::domain::Dispatcher;
use crate::domain::ports::BookRepository;

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Routes book commands and queries.
    pub dispatcher: Arc<Dispatcher>,
}

impl HttpState {
    /// Construct state around a dispatcher.
    pub fn new(dispatcher: Arc<Dispatcher>) -> Self {
        Self { dispatcher }
    }

    /// Construct state whose dispatcher uses `repository`.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use bookshelf::inbound::http::state::HttpState;
    /// use bookshelf::outbound::memory::InMemoryBookRepository;
    ///
    /// let state = HttpState::with_repository(Arc::new(InMemoryBookRepository::new()));
    /// let _dispatcher = state.dispatcher.clone();
    /// ```
    pub fn with_repository(repository: Arc<dyn BookRepository>) -> Self {
        Self::new(Arc::new(Dispatcher::new(repository)))
    }
}
