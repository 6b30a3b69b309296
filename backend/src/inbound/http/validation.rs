//! Request parsing helpers shared by HTTP handlers.
//!
//! Malformed input is reported in the same `invalidfields` shape the domain
//! uses for rule failures.

use uuid::Uuid;

use crate::domain::validation::{INVALID_FIELDS_CODE, INVALID_FIELDS_DESCRIPTION};
use crate::domain::{ErrorDetail, ErrorItem, ErrorMessage, ErrorStatus};
use crate::inbound::http::error::ApiError;

/// Reason reported for identifiers that are not UUIDs.
pub(crate) const INVALID_UUID_RULE: &str = "InvalidUuidValidator";
/// Reason reported for bodies that are not valid JSON for the route.
pub(crate) const INVALID_BODY_RULE: &str = "InvalidBodyValidator";

/// Newtype wrapper for field display names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(self) -> &'static str {
        self.0
    }
}

fn invalid_fields(item: ErrorItem) -> ApiError {
    ApiError::from(
        ErrorDetail::new(
            ErrorStatus::BAD_REQUEST,
            ErrorMessage::new(INVALID_FIELDS_CODE, INVALID_FIELDS_DESCRIPTION),
        )
        .with_item(item),
    )
}

pub(crate) fn parse_uuid(value: &str, field: FieldName) -> Result<Uuid, ApiError> {
    Uuid::parse_str(value).map_err(|_| {
        let field = field.as_str();
        invalid_fields(ErrorItem::new(
            INVALID_UUID_RULE,
            format!("'{field}' must be a valid UUID."),
        ))
    })
}

pub(crate) fn invalid_body(message: impl Into<String>) -> ApiError {
    invalid_fields(ErrorItem::new(INVALID_BODY_RULE, message))
}
