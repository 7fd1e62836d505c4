//! Route guards: customer bearer auth and admin (token, then session) auth.
//! Each guard stores the resolved identity in request extensions.

use axum::{extract::{Request, State}, http::header::AUTHORIZATION, middleware::Next, response::Response};
use axum_extra::extract::cookie::CookieJar;
use service::{admin_auth::AdminCredentials, auth::domain::PublicAccount, errors::ServiceError};

use crate::errors::ApiError;
use crate::state::ServerState;

pub const ADMIN_SESSION_COOKIE: &str = "admin_sid";

/// Authenticated customer, inserted by [`require_customer`].
#[derive(Debug, Clone)]
pub struct CurrentAccount(pub PublicAccount);

fn bearer_token(req: &Request) -> Option<&str> {
    req.headers()
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

pub async fn require_customer(State(state): State<ServerState>, mut req: Request, next: Next) -> Result<Response, ApiError> {
    let Some(token) = bearer_token(&req) else {
        tracing::warn!(path = %req.uri().path(), "missing bearer token");
        return Err(ApiError(ServiceError::Unauthenticated("Not authorized, no token".into())));
    };
    let account = state.auth.current_account(token).await?;
    req.extensions_mut().insert(CurrentAccount(account));
    Ok(next.run(req).await)
}

pub async fn require_admin(State(state): State<ServerState>, mut req: Request, next: Next) -> Result<Response, ApiError> {
    let jar = CookieJar::from_headers(req.headers());
    let creds = AdminCredentials {
        bearer: bearer_token(&req),
        session_id: jar.get(ADMIN_SESSION_COOKIE).map(|c| c.value()),
    };
    let identity = state.admin.authenticate(&creds).await?;
    tracing::debug!(admin = %identity.email, method = ?identity.method, "admin authenticated");
    req.extensions_mut().insert(identity);
    Ok(next.run(req).await)
}
