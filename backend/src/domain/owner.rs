//! Owner identity for book resources.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Validation errors returned by [`OwnerId`] constructors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OwnerIdError {
    /// The input string was empty.
    #[error("owner id must not be empty")]
    Empty,
    /// The input did not parse as a UUID.
    #[error("owner id must be a valid UUID")]
    Invalid,
    /// The input was the all-zero UUID.
    #[error("owner id must not be the nil UUID")]
    Nil,
}

/// Identifier of the authenticated caller that owns books.
///
/// ## Invariants
/// - Never the nil UUID.
///
/// # Examples
/// ```
/// use bookshelf::domain::OwnerId;
///
/// let owner = OwnerId::try_from("3fa85f64-5717-4562-b3fc-2c963f66afa6").expect("valid");
/// assert_eq!(owner.to_string(), "3fa85f64-5717-4562-b3fc-2c963f66afa6");
/// assert!(OwnerId::try_from("00000000-0000-0000-0000-000000000000").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "Uuid", into = "Uuid")]
pub struct OwnerId(Uuid);

impl OwnerId {
    /// Wrap a UUID, rejecting the nil value.
    pub fn new(id: Uuid) -> Result<Self, OwnerIdError> {
        if id.is_nil() {
            return Err(OwnerIdError::Nil);
        }
        Ok(Self(id))
    }

    /// Generate a new random [`OwnerId`].
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl TryFrom<Uuid> for OwnerId {
    type Error = OwnerIdError;

    fn try_from(value: Uuid) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for OwnerId {
    type Error = OwnerIdError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        if value.trim().is_empty() {
            return Err(OwnerIdError::Empty);
        }
        let parsed = Uuid::parse_str(value).map_err(|_| OwnerIdError::Invalid)?;
        Self::new(parsed)
    }
}

impl From<OwnerId> for Uuid {
    fn from(value: OwnerId) -> Self {
        value.0
    }
}

impl fmt::Display for OwnerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}
