//! HTTP adapter mapping for domain errors.
//!
//! Every failure leaves the service as an [`ErrorResult`] body whose
//! `error.status` matches the response status. Infrastructure causes are
//! logged and redacted.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use tracing::{error, warn};

use crate::domain::ports::{BookRepositoryError, IdentityError};
use crate::domain::{DispatchError, ErrorDetail, ErrorMessage, ErrorResult, ErrorStatus};

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, ApiError>;

/// Failure returned by book handlers.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// A business failure recorded by the domain.
    #[error("{0}")]
    Rejected(ErrorResult),
    /// No usable caller identity.
    #[error("unauthorized")]
    Unauthorized,
    /// A dependency is unreachable or the request was cancelled.
    #[error("service unavailable: {message}")]
    Unavailable {
        /// Logged cause.
        message: String,
    },
    /// Any other infrastructure failure.
    #[error("internal error: {message}")]
    Internal {
        /// Logged cause; never sent to the client.
        message: String,
    },
}

impl ApiError {
    /// Build an [`ApiError::Internal`].
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Build an [`ApiError::Unavailable`].
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    /// The body sent to the client.
    pub fn to_error_result(&self) -> ErrorResult {
        match self {
            Self::Rejected(result) => result.clone(),
            Self::Unauthorized => ErrorResult::new(ErrorDetail::new(
                ErrorStatus::UNAUTHORIZED,
                ErrorMessage::new("unauthorized", "Authentication is required"),
            )),
            Self::Unavailable { .. } => ErrorResult::new(ErrorDetail::new(
                ErrorStatus::SERVICE_UNAVAILABLE,
                ErrorMessage::new("serviceunavailable", "Service temporarily unavailable"),
            )),
            Self::Internal { .. } => ErrorResult::new(ErrorDetail::new(
                ErrorStatus::INTERNAL_SERVER_ERROR,
                ErrorMessage::new("internalerror", "Internal server error"),
            )),
        }
    }
}

impl From<ErrorResult> for ApiError {
    fn from(value: ErrorResult) -> Self {
        Self::Rejected(value)
    }
}

impl From<ErrorDetail> for ApiError {
    fn from(value: ErrorDetail) -> Self {
        Self::Rejected(ErrorResult::new(value))
    }
}

impl From<DispatchError> for ApiError {
    fn from(value: DispatchError) -> Self {
        match value {
            DispatchError::Identity(cause @ IdentityError::Malformed { .. }) => {
                warn!(error = %cause, "rejecting request with malformed identity");
                Self::Unauthorized
            }
            DispatchError::Identity(IdentityError::Unauthenticated) => Self::Unauthorized,
            DispatchError::Cancelled => Self::unavailable("request cancelled"),
            DispatchError::Repository(cause @ BookRepositoryError::Connection { .. }) => {
                Self::unavailable(cause.to_string())
            }
            other => Self::internal(other.to_string()),
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        let status = self.to_error_result().status();
        StatusCode::from_u16(status.as_u16()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            Self::Internal { message } => error!(%message, "request failed"),
            Self::Unavailable { message } => error!(%message, "dependency unavailable"),
            Self::Rejected(_) | Self::Unauthorized => {}
        }
        HttpResponse::build(self.status_code()).json(self.to_error_result())
    }
}

impl From<actix_web::Error> for ApiError {
    fn from(err: actix_web::Error) -> Self {
        Self::internal(err.to_string())
    }
}
