//! Field-level validation rules and their aggregated outcome.
//!
//! Rules are declared through [`RuleSet`] in a fixed order and every failing
//! rule contributes one [`ValidationFailure`]. The resulting
//! [`ValidationOutcome`] is a pure function of the validated value, so
//! validating the same input twice yields identical failures.

use uuid::Uuid;

use super::error::{ErrorDetail, ErrorItem, ErrorMessage, ErrorStatus};

/// Rule code reported when a required value is missing or blank.
pub const NOT_EMPTY_RULE: &str = "NotEmptyValidator";
/// Rule code reported when a string exceeds its maximum length.
pub const MAXIMUM_LENGTH_RULE: &str = "MaximumLengthValidator";
/// Error code used for every aggregated validation failure.
pub const INVALID_FIELDS_CODE: &str = "invalidfields";
/// Description paired with [`INVALID_FIELDS_CODE`].
pub const INVALID_FIELDS_DESCRIPTION: &str = "There are some invalid fields";

/// One failed rule for one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationFailure {
    rule_code: String,
    field: String,
    message: String,
}

impl ValidationFailure {
    /// Build a failure from its three parts.
    pub fn new(
        rule_code: impl Into<String>,
        field: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            rule_code: rule_code.into(),
            field: field.into(),
            message: message.into(),
        }
    }

    /// Machine-readable rule code.
    pub fn rule_code(&self) -> &str {
        self.rule_code.as_str()
    }

    /// Display name of the offending field.
    pub fn field(&self) -> &str {
        self.field.as_str()
    }

    /// Human-readable explanation.
    pub fn message(&self) -> &str {
        self.message.as_str()
    }
}

/// Ordered list of validation failures; empty means valid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationOutcome {
    failures: Vec<ValidationFailure>,
}

impl ValidationOutcome {
    /// An outcome with no failures.
    pub fn valid() -> Self {
        Self::default()
    }

    /// Wrap failures in declaration order.
    pub fn from_failures(failures: Vec<ValidationFailure>) -> Self {
        Self { failures }
    }

    /// Whether every rule passed.
    pub fn is_valid(&self) -> bool {
        self.failures.is_empty()
    }

    /// Failures in rule-declaration order.
    pub fn failures(&self) -> &[ValidationFailure] {
        &self.failures
    }

    /// Convert into the `400 invalidfields` detail, one item per failure.
    ///
    /// Returns `None` for a valid outcome.
    ///
    /// # Examples
    /// ```
    /// use bookshelf::domain::{RuleSet, ErrorStatus};
    ///
    /// let outcome = RuleSet::new().not_empty("Title", "   ").finish();
    /// let detail = outcome.to_error_detail().expect("invalid outcome");
    /// assert_eq!(detail.status(), ErrorStatus::BAD_REQUEST);
    /// assert_eq!(detail.items()[0].reason(), "NotEmptyValidator");
    /// ```
    pub fn to_error_detail(&self) -> Option<ErrorDetail> {
        if self.is_valid() {
            return None;
        }
        let items = self
            .failures
            .iter()
            .map(|failure| ErrorItem::new(failure.rule_code(), failure.message()));
        Some(
            ErrorDetail::new(
                ErrorStatus::BAD_REQUEST,
                ErrorMessage::new(INVALID_FIELDS_CODE, INVALID_FIELDS_DESCRIPTION),
            )
            .with_items(items),
        )
    }
}

/// Types that can report their own field-level validity.
pub trait Validate {
    /// Evaluate every rule; never cached.
    fn validate(&self) -> ValidationOutcome;
}

/// Builder accumulating rule failures in declaration order.
///
/// Every rule declared for a field runs, so one field may contribute more
/// than one failure.
#[derive(Debug, Default)]
#[must_use]
pub struct RuleSet {
    failures: Vec<ValidationFailure>,
}

impl RuleSet {
    /// Start an empty rule set.
    pub fn new() -> Self {
        Self::default()
    }

    /// The string must contain at least one non-whitespace character.
    pub fn not_empty(mut self, field: &str, value: &str) -> Self {
        if value.trim().is_empty() {
            self.failures.push(not_empty_failure(field));
        }
        self
    }

    /// The identifier must not be the nil UUID.
    pub fn not_nil(mut self, field: &str, value: &Uuid) -> Self {
        if value.is_nil() {
            self.failures.push(not_empty_failure(field));
        }
        self
    }

    /// The string must be at most `max` characters long.
    pub fn max_length(mut self, field: &str, value: &str, max: usize) -> Self {
        let total = value.chars().count();
        if total > max {
            self.failures.push(ValidationFailure::new(
                MAXIMUM_LENGTH_RULE,
                field,
                format!(
                    "The length of '{field}' must be {max} characters or fewer. \
                     You entered {total} characters."
                ),
            ));
        }
        self
    }

    /// Seal the rule set into an outcome.
    pub fn finish(self) -> ValidationOutcome {
        ValidationOutcome::from_failures(self.failures)
    }
}

fn not_empty_failure(field: &str) -> ValidationFailure {
    ValidationFailure::new(NOT_EMPTY_RULE, field, format!("'{field}' must not be empty."))
}
