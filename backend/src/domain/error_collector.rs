//! Per-request error sink shared by command handlers.
//!
//! A fresh [`ErrorCollector`] is created for each request and handed to the
//! dispatcher by mutable reference. Handlers record at most one reportable
//! error and return early; the transport layer then inspects the collector.

use thiserror::Error;
use tracing::warn;

use super::error::{ErrorDetail, ErrorResult};
use super::validation::{Validate, ValidationOutcome};

/// Programming errors raised when the collector contract is broken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CollectorMisuse {
    /// `record_validation` was called with a passing outcome.
    #[error("cannot record a validation outcome that has no failures")]
    ValidOutcome,
    /// `error` was called before anything was recorded.
    #[error("no error has been recorded")]
    NoError,
}

/// Collects the single error reported for a request.
///
/// Recording twice keeps the latest error.
///
/// # Examples
/// ```
/// use bookshelf::domain::{CreateBook, ErrorCollector};
///
/// let mut errors = ErrorCollector::new();
/// assert!(!errors.validate_command(&CreateBook::new("", "Author", "Genre")));
/// assert!(errors.has_error());
/// let result = errors.error().expect("recorded");
/// assert_eq!(result.detail().message().code(), "invalidfields");
/// ```
#[derive(Debug, Default)]
pub struct ErrorCollector {
    error: Option<ErrorResult>,
}

impl ErrorCollector {
    /// Create an empty collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether an error has been recorded.
    pub fn has_error(&self) -> bool {
        self.error.is_some()
    }

    /// Record an invalid validation outcome as a `400 invalidfields` error.
    pub fn record_validation(&mut self, outcome: &ValidationOutcome) -> Result<(), CollectorMisuse> {
        let detail = outcome
            .to_error_detail()
            .ok_or(CollectorMisuse::ValidOutcome)?;
        self.store(detail);
        Ok(())
    }

    /// Record a domain error verbatim.
    pub fn record_domain_error(&mut self, detail: ErrorDetail) {
        self.store(detail);
    }

    /// Validate `command`, recording its failures when invalid.
    ///
    /// Returns `true` when the command may proceed.
    pub fn validate_command<C>(&mut self, command: &C) -> bool
    where
        C: Validate + ?Sized,
    {
        match command.validate().to_error_detail() {
            Some(detail) => {
                self.store(detail);
                false
            }
            None => true,
        }
    }

    /// The recorded error.
    pub fn error(&self) -> Result<&ErrorResult, CollectorMisuse> {
        self.error.as_ref().ok_or(CollectorMisuse::NoError)
    }

    /// Consume the collector into a per-request result.
    pub fn into_result(self) -> Result<(), ErrorResult> {
        self.error.map_or(Ok(()), Err)
    }

    fn store(&mut self, detail: ErrorDetail) {
        if let Some(previous) = self.error.as_ref() {
            warn!(
                previous = %previous,
                replacement = detail.message().code(),
                "overwriting recorded request error"
            );
        }
        self.error = Some(ErrorResult::new(detail));
    }
}

#[cfg(test)]
mod tests {
    //! Collector contract coverage.

    use rstest::{fixture, rstest};

    use super::*;
    use crate::domain::{CreateBook, ErrorMessage, ErrorStatus, RuleSet, book_errors};

    #[fixture]
    fn collector() -> ErrorCollector {
        ErrorCollector::new()
    }

    #[rstest]
    fn fresh_collector_reports_nothing(collector: ErrorCollector) {
        assert!(!collector.has_error());
        assert_eq!(collector.error(), Err(CollectorMisuse::NoError));
        assert_eq!(collector.into_result(), Ok(()));
    }

    #[rstest]
    fn recording_a_valid_outcome_is_misuse(mut collector: ErrorCollector) {
        let outcome = RuleSet::new().not_empty("Title", "Dune").finish();
        assert_eq!(
            collector.record_validation(&outcome),
            Err(CollectorMisuse::ValidOutcome)
        );
        assert!(!collector.has_error());
    }

    #[rstest]
    fn recording_validation_builds_invalid_fields(mut collector: ErrorCollector) {
        let outcome = RuleSet::new()
            .not_empty("Title", "")
            .max_length("Genre", &"g".repeat(51), 50)
            .finish();

        collector
            .record_validation(&outcome)
            .expect("invalid outcome is accepted");

        let detail = collector.error().expect("recorded").detail();
        assert_eq!(detail.status(), ErrorStatus::BAD_REQUEST);
        assert_eq!(detail.message().code(), "invalidfields");
        let reasons: Vec<&str> = detail.items().iter().map(|item| item.reason()).collect();
        assert_eq!(reasons, ["NotEmptyValidator", "MaximumLengthValidator"]);
    }

    #[rstest]
    fn domain_error_is_stored_verbatim(mut collector: ErrorCollector) {
        collector.record_domain_error(book_errors::book_not_found());

        let result = collector.into_result().expect_err("error recorded");
        assert_eq!(result.into_detail(), book_errors::book_not_found());
    }

    #[rstest]
    fn later_records_replace_earlier_ones(mut collector: ErrorCollector) {
        collector.record_domain_error(book_errors::duplicate_title());
        collector.record_domain_error(ErrorDetail::new(
            ErrorStatus::NOT_FOUND,
            ErrorMessage::new("booknotfound", "Informed book does not exist"),
        ));

        let result = collector.error().expect("recorded");
        assert_eq!(result.status(), ErrorStatus::NOT_FOUND);
    }

    #[rstest]
    fn validate_command_passes_valid_commands(mut collector: ErrorCollector) {
        let command = CreateBook::new("Dune", "Frank Herbert", "Science fiction");
        assert!(collector.validate_command(&command));
        assert!(!collector.has_error());
    }

    #[rstest]
    fn revalidating_records_the_same_detail(mut collector: ErrorCollector) {
        let command = CreateBook::new("", "Frank Herbert", "Science fiction");

        assert!(!collector.validate_command(&command));
        let first = collector.error().expect("recorded").clone();
        assert!(!collector.validate_command(&command));

        assert_eq!(collector.error().expect("recorded"), &first);
    }
}
