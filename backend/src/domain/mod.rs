//! Book domain: commands, queries, handlers and the error pipeline.
//!
//! Purpose: Own every business rule of the bookshelf without depending on a
//! transport or a database. Adapters talk to the domain through the traits in
//! [`ports`] and through the [`Dispatcher`].
//!
//! Public surface:
//! - [`Dispatcher`] routes [`BookCommand`] values and [`Query`] types.
//! - [`ErrorCollector`] gathers the single [`ErrorResult`] of a request.
//! - [`Book`], [`BookSummary`] and [`OwnerId`] model the resource.

pub mod authorization;
pub mod book;
pub mod book_errors;
pub mod cancellation;
pub mod commands;
pub mod dispatcher;
pub mod error;
pub mod error_collector;
pub mod handlers;
pub mod owner;
pub mod ports;
pub mod queries;
pub mod request_context;
pub mod validation;

pub use self::authorization::{Access, authorize};
pub use self::book::{AUTHOR_MAX, Book, BookDraft, BookSummary, BookValidationError, GENRE_MAX, TITLE_MAX};
pub use self::cancellation::{CancelHandle, CancelSignal, cancel_pair};
pub use self::commands::{BookCommand, CreateBook, DeleteBook, UpdateBook};
pub use self::dispatcher::Dispatcher;
pub use self::error::{ErrorDetail, ErrorItem, ErrorMessage, ErrorResult, ErrorStatus, ErrorStatusError};
pub use self::error_collector::{CollectorMisuse, ErrorCollector};
pub use self::handlers::BookHandlers;
pub use self::owner::{OwnerId, OwnerIdError};
pub use self::queries::{GetBook, ListBooks, Query};
pub use self::request_context::{DispatchError, RequestContext};
pub use self::validation::{RuleSet, Validate, ValidationFailure, ValidationOutcome};
