//! Session-cookie identity for book handlers.
//!
//! The owner id is written into the encrypted session cookie by whichever
//! service authenticates the caller and shares the session key. Handlers read
//! it through [`OwnerSession`] and hand a [`SessionIdentity`] to the domain.

use actix_session::Session;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::LocalBoxFuture;

use crate::domain::OwnerId;
use crate::domain::ports::{IdentityError, IdentityProvider};
use crate::inbound::http::error::ApiError;

pub(crate) const OWNER_ID_KEY: &str = "owner_id";

/// Newtype wrapper exposing owner-level session operations.
#[derive(Clone)]
pub struct OwnerSession(Session);

impl OwnerSession {
    /// Construct a new wrapper from the underlying Actix session.
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Persist the authenticated owner's id in the session cookie.
    pub fn persist_owner(&self, owner: &OwnerId) -> Result<(), ApiError> {
        self.0
            .insert(OWNER_ID_KEY, owner.to_string())
            .map_err(|error| ApiError::internal(format!("failed to persist session: {error}")))
    }

    /// Snapshot the stored identity for one dispatch.
    pub fn identity(&self) -> Result<SessionIdentity, ApiError> {
        let raw = self
            .0
            .get::<String>(OWNER_ID_KEY)
            .map_err(|error| ApiError::internal(format!("failed to read session: {error}")))?;
        Ok(SessionIdentity { raw })
    }
}

impl FromRequest for OwnerSession {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(OwnerSession::new) })
    }
}

/// Owner id as read from the session cookie, not yet validated.
#[derive(Debug, Clone, Default)]
pub struct SessionIdentity {
    raw: Option<String>,
}

impl IdentityProvider for SessionIdentity {
    fn current_owner_id(&self) -> Result<OwnerId, IdentityError> {
        let raw = self.raw.as_deref().ok_or(IdentityError::Unauthenticated)?;
        OwnerId::try_from(raw).map_err(|error| IdentityError::malformed(error.to_string()))
    }
}
