//! Ownership checks for book resources.

use super::owner::OwnerId;

/// Result of comparing a resource owner with the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// The caller owns the resource.
    Granted,
    /// The caller must be told the resource does not exist.
    NotFound,
}

/// Decide whether `caller` may act on a resource owned by `resource_owner`.
///
/// A foreign resource is reported as [`Access::NotFound`] so callers cannot
/// probe for identifiers they do not own.
pub fn authorize(resource_owner: &OwnerId, caller: &OwnerId) -> Access {
    if resource_owner == caller {
        Access::Granted
    } else {
        Access::NotFound
    }
}
