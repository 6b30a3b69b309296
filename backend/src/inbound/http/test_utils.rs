//! Test helpers for inbound HTTP components.

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::ServiceResponse;
use actix_web::{HttpResponse, web};

use crate::domain::OwnerId;
use crate::inbound::http::ApiResult;
use crate::inbound::http::error::ApiError;
use crate::inbound::http::session::OwnerSession;

/// Name of the session cookie issued by [`test_session_middleware`].
pub const SESSION_COOKIE: &str = "session";

/// Session middleware with a fresh key and the `Secure` flag disabled.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name(SESSION_COOKIE.to_owned())
        .cookie_secure(false)
        .build()
}

/// Handler for `/test/sign-in/{owner}` that stores the owner in the session.
pub async fn sign_in(session: OwnerSession, path: web::Path<String>) -> ApiResult<HttpResponse> {
    let owner = OwnerId::try_from(path.into_inner().as_str())
        .map_err(|error| ApiError::internal(error.to_string()))?;
    session.persist_owner(&owner)?;
    Ok(HttpResponse::Ok().finish())
}

/// Extract the session cookie set on `res`.
pub fn session_cookie<B>(res: &ServiceResponse<B>) -> Cookie<'static> {
    res.response()
        .cookies()
        .find(|cookie| cookie.name() == SESSION_COOKIE)
        .expect("session cookie set")
        .into_owned()
}
