//! Bearer-session authentication.
//!
//! [`AdminClaims`] is the extractor route handlers take as a parameter when they require an authenticated admin.
//! It reads the `Authorization: Bearer` header and resolves it against the process-wide
//! [`SessionStore`]; an expired token is indistinguishable from an unknown one. No roles exist beyond "is a
//! logged-in admin".

use actix_web::{dev::Payload, http::header, web, FromRequest, HttpRequest};
use futures::future::{ready, Ready};
use log::debug;
use ordercast_engine::sessions::SessionStore;

use crate::errors::{AuthError, ServerError};

#[derive(Debug, Clone)]
pub struct AdminClaims {
    pub admin_id: i64,
    pub username: String,
    pub token: String,
}

pub fn bearer_token(req: &HttpRequest) -> Option<String> {
    let header = req.headers().get(header::AUTHORIZATION)?.to_str().ok()?;
    let token = header.strip_prefix("Bearer ")?.trim();
    if token.is_empty() {
        None
    } else {
        Some(token.to_string())
    }
}

fn claims_from_request(req: &HttpRequest) -> Result<AdminClaims, ServerError> {
    let token = bearer_token(req).ok_or(AuthError::MissingToken)?;
    let sessions = req
        .app_data::<web::Data<SessionStore>>()
        .ok_or_else(|| ServerError::InitializeError("SessionStore is not registered on the app".to_string()))?;
    let session = sessions.validate(&token).ok_or(AuthError::InvalidToken)?;
    debug!("🔑️ Request authenticated for {}", session.username);
    Ok(AdminClaims { admin_id: session.admin_id, username: session.username, token })
}

impl FromRequest for AdminClaims {
    type Error = ServerError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(claims_from_request(req))
    }
}
