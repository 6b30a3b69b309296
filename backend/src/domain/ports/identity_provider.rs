//! Port resolving the authenticated caller.

use crate::domain::OwnerId;

use super::define_port_error;

define_port_error! {
    /// Errors raised while resolving the caller identity.
    pub enum IdentityError {
        /// No identity accompanies the request.
        Unauthenticated => "no authenticated owner",
        /// The stored identity is not a usable owner id.
        Malformed {
            /// Why the stored value was rejected.
            message: String,
        } => "malformed owner identity: {message}",
    }
}

/// Port yielding the owner id of the current request.
#[cfg_attr(test, mockall::automock)]
pub trait IdentityProvider: Send + Sync {
    /// Resolve the caller, failing when no valid identity is present.
    fn current_owner_id(&self) -> Result<OwnerId, IdentityError>;
}

/// Fixture provider returning a fixed identity, or none.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedIdentity(Option<OwnerId>);

impl FixedIdentity {
    /// Always resolve to `owner`.
    pub fn owner(owner: OwnerId) -> Self {
        Self(Some(owner))
    }

    /// Never resolve.
    pub fn anonymous() -> Self {
        Self(None)
    }
}

impl IdentityProvider for FixedIdentity {
    fn current_owner_id(&self) -> Result<OwnerId, IdentityError> {
        self.0.ok_or(IdentityError::Unauthenticated)
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    fn fixed_identity_resolves_owner() {
        let owner = OwnerId::random();
        assert_eq!(FixedIdentity::owner(owner).current_owner_id(), Ok(owner));
    }

    #[rstest]
    fn anonymous_identity_is_unauthenticated() {
        assert_eq!(
            FixedIdentity::anonymous().current_owner_id(),
            Err(IdentityError::unauthenticated())
        );
    }
}
