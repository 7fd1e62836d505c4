use axum::{extract::State, extract::rejection::JsonRejection, http::StatusCode, Extension, Json};
use common::ApiEnvelope;
use service::auth::domain::{AuthSession, FederatedAuthInput, LoginInput, PublicAccount, RegisterInput};

use crate::errors::ApiResult;
use crate::guards::CurrentAccount;
use crate::metrics::CUSTOMER_LOGINS_TOTAL;
use crate::state::ServerState;

#[utoipa::path(post, path = "/api/auth/register", tag = "auth", request_body = crate::openapi::RegisterRequest,
    responses((status = 201, description = "Registered"), (status = 400, description = "Validation error or email taken")))]
pub async fn register(
    State(state): State<ServerState>,
    payload: Result<Json<RegisterInput>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<ApiEnvelope<AuthSession>>)> {
    let Json(input) = payload?;
    let session = state.auth.register(input).await?;
    Ok((StatusCode::CREATED, Json(ApiEnvelope::ok_with_message("User registered successfully", session))))
}

#[utoipa::path(post, path = "/api/auth/login", tag = "auth", request_body = crate::openapi::LoginRequest,
    responses((status = 200, description = "Logged in"), (status = 401, description = "Invalid email or password")))]
pub async fn login(
    State(state): State<ServerState>,
    payload: Result<Json<LoginInput>, JsonRejection>,
) -> ApiResult<Json<ApiEnvelope<AuthSession>>> {
    let Json(input) = payload?;
    let session = state.auth.login(input).await?;
    CUSTOMER_LOGINS_TOTAL.inc();
    Ok(Json(ApiEnvelope::ok_with_message("Login successful", session)))
}

#[utoipa::path(post, path = "/api/auth/google", tag = "auth", request_body = crate::openapi::FederatedAuthRequest,
    responses((status = 201, description = "Account created"), (status = 200, description = "Logged in")))]
pub async fn google(
    State(state): State<ServerState>,
    payload: Result<Json<FederatedAuthInput>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<ApiEnvelope<AuthSession>>)> {
    let Json(input) = payload?;
    let outcome = state.auth.federated_auth(input).await?;
    CUSTOMER_LOGINS_TOTAL.inc();
    if outcome.created {
        Ok((StatusCode::CREATED, Json(ApiEnvelope::ok_with_message("Account created via Google", outcome.session))))
    } else {
        Ok((StatusCode::OK, Json(ApiEnvelope::ok_with_message("Login successful via Google", outcome.session))))
    }
}

#[utoipa::path(get, path = "/api/auth/me", tag = "auth", security(("bearer" = [])),
    responses((status = 200, description = "Current account"), (status = 401, description = "Missing or invalid token")))]
pub async fn me(Extension(CurrentAccount(account)): Extension<CurrentAccount>) -> Json<ApiEnvelope<PublicAccount>> {
    Json(ApiEnvelope::ok(account))
}
