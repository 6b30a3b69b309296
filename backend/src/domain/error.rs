//! Domain-level error payloads.
//!
//! These types are transport agnostic. Inbound adapters turn an
//! [`ErrorResult`] into an HTTP response by reading the carried status and
//! serialising the result verbatim as the response body.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// HTTP-compatible status carried by an [`ErrorDetail`].
///
/// ## Invariants
/// - The wrapped code lies within `100..=599`.
///
/// # Examples
/// ```
/// use bookshelf::domain::ErrorStatus;
///
/// let status = ErrorStatus::try_from(404).expect("valid status");
/// assert_eq!(status, ErrorStatus::NOT_FOUND);
/// assert!(ErrorStatus::try_from(42).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub struct ErrorStatus(u16);

impl ErrorStatus {
    /// `400 Bad Request`.
    pub const BAD_REQUEST: Self = Self(400);
    /// `401 Unauthorized`.
    pub const UNAUTHORIZED: Self = Self(401);
    /// `404 Not Found`.
    pub const NOT_FOUND: Self = Self(404);
    /// `500 Internal Server Error`.
    pub const INTERNAL_SERVER_ERROR: Self = Self(500);
    /// `503 Service Unavailable`.
    pub const SERVICE_UNAVAILABLE: Self = Self(503);

    /// Numeric status code.
    pub const fn as_u16(self) -> u16 {
        self.0
    }
}

/// Validation error returned when a status code is outside the HTTP range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("{0} is not a valid HTTP status code")]
pub struct ErrorStatusError(pub u16);

impl TryFrom<u16> for ErrorStatus {
    type Error = ErrorStatusError;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        if (100..=599).contains(&value) {
            Ok(Self(value))
        } else {
            Err(ErrorStatusError(value))
        }
    }
}

impl From<ErrorStatus> for u16 {
    fn from(value: ErrorStatus) -> Self {
        value.0
    }
}

impl fmt::Display for ErrorStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Top-level machine code and human description of a failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorMessage {
    code: String,
    description: String,
}

impl ErrorMessage {
    /// Build a message from a stable code and a description.
    pub fn new(code: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            description: description.into(),
        }
    }

    /// Stable machine-readable code, e.g. `booknotfound`.
    pub fn code(&self) -> &str {
        self.code.as_str()
    }

    /// Human-readable description.
    pub fn description(&self) -> &str {
        self.description.as_str()
    }
}

/// One granular cause attached to an [`ErrorDetail`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorItem {
    reason: String,
    message: String,
}

impl ErrorItem {
    /// Build an item from a reason code and a message.
    pub fn new(reason: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
            message: message.into(),
        }
    }

    /// Machine-readable reason, e.g. `NotEmptyValidator`.
    pub fn reason(&self) -> &str {
        self.reason.as_str()
    }

    /// Human-readable message.
    pub fn message(&self) -> &str {
        self.message.as_str()
    }
}

/// Status-bearing description of a failed request.
///
/// `items` may be empty (a single domain error) or hold many entries
/// (aggregated validation failures). Item order is preserved.
///
/// # Examples
/// ```
/// use bookshelf::domain::{ErrorDetail, ErrorItem, ErrorMessage, ErrorStatus};
///
/// let detail = ErrorDetail::new(
///     ErrorStatus::BAD_REQUEST,
///     ErrorMessage::new("invalidfields", "There are some invalid fields"),
/// )
/// .with_item(ErrorItem::new("NotEmptyValidator", "'Title' must not be empty."));
/// assert_eq!(detail.items().len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorDetail {
    status: ErrorStatus,
    message: ErrorMessage,
    #[serde(rename = "errors", default)]
    items: Vec<ErrorItem>,
}

impl ErrorDetail {
    /// Create a detail with no granular items.
    pub fn new(status: ErrorStatus, message: ErrorMessage) -> Self {
        Self {
            status,
            message,
            items: Vec::new(),
        }
    }

    /// Append one granular cause.
    #[must_use]
    pub fn with_item(mut self, item: ErrorItem) -> Self {
        self.items.push(item);
        self
    }

    /// Append granular causes, keeping their order.
    #[must_use]
    pub fn with_items(mut self, items: impl IntoIterator<Item = ErrorItem>) -> Self {
        self.items.extend(items);
        self
    }

    /// Status to report to the caller.
    pub fn status(&self) -> ErrorStatus {
        self.status
    }

    /// Top-level error identity.
    pub fn message(&self) -> &ErrorMessage {
        &self.message
    }

    /// Granular causes in recording order.
    pub fn items(&self) -> &[ErrorItem] {
        &self.items
    }
}

/// Envelope exposed to the transport layer; wraps exactly one detail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResult {
    error: ErrorDetail,
}

impl ErrorResult {
    /// Wrap a detail.
    pub fn new(error: ErrorDetail) -> Self {
        Self { error }
    }

    /// The wrapped detail.
    pub fn detail(&self) -> &ErrorDetail {
        &self.error
    }

    /// Shortcut for the wrapped detail's status.
    pub fn status(&self) -> ErrorStatus {
        self.error.status()
    }

    /// Unwrap into the inner detail.
    pub fn into_detail(self) -> ErrorDetail {
        self.error
    }
}

impl From<ErrorDetail> for ErrorResult {
    fn from(value: ErrorDetail) -> Self {
        Self::new(value)
    }
}

impl fmt::Display for ErrorResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = self.error.message();
        write!(
            f,
            "{} {}: {}",
            self.error.status(),
            message.code(),
            message.description()
        )
    }
}
