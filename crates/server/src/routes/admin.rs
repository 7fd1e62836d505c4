use axum::{extract::{Path, State}, extract::rejection::{JsonRejection, PathRejection}, Json};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use common::ApiEnvelope;
use serde::Serialize;
use service::admin_auth::AdminLoginInput;
use service::catalog::domain::{Dish, DishUpdateInput, NewDishInput};
use service::orders::domain::{OrderView, StatusUpdateInput};
use uuid::Uuid;

use crate::errors::ApiResult;
use crate::guards::ADMIN_SESSION_COOKIE;
use crate::metrics::ADMIN_LOGINS_TOTAL;
use crate::state::ServerState;

#[derive(Debug, Serialize)]
pub struct AdminTokenOutput {
    pub token: String,
}

#[utoipa::path(post, path = "/admin/login", tag = "admin", request_body = crate::openapi::LoginRequest,
    responses((status = 200, description = "Session cookie set, admin token returned"), (status = 401, description = "Invalid credentials")))]
pub async fn login(
    State(state): State<ServerState>,
    jar: CookieJar,
    payload: Result<Json<AdminLoginInput>, JsonRejection>,
) -> ApiResult<(CookieJar, Json<ApiEnvelope<AdminTokenOutput>>)> {
    let Json(input) = payload?;
    let login = state.admin.login(input).await?;
    ADMIN_LOGINS_TOTAL.inc();

    let mut cookie = Cookie::new(ADMIN_SESSION_COOKIE, login.session_id);
    cookie.set_path("/");
    cookie.set_http_only(true);
    if state.cookie_secure {
        // 跨站 Cookie 需要 Secure + SameSite=None
        cookie.set_secure(true);
        cookie.set_same_site(SameSite::None);
    } else {
        cookie.set_same_site(SameSite::Lax);
    }
    let jar = jar.add(cookie);
    Ok((jar, Json(ApiEnvelope::ok_with_message("Login successful", AdminTokenOutput { token: login.token }))))
}

#[utoipa::path(post, path = "/admin/logout", tag = "admin", security(("bearer" = []), ("admin_session" = [])),
    responses((status = 200, description = "Logged out")))]
pub async fn logout(State(state): State<ServerState>, jar: CookieJar) -> (CookieJar, Json<ApiEnvelope<()>>) {
    let sid = jar.get(ADMIN_SESSION_COOKIE).map(|c| c.value().to_string());
    state.admin.logout(sid.as_deref()).await;
    let jar = jar.remove(Cookie::build(ADMIN_SESSION_COOKIE).path("/"));
    (jar, Json(ApiEnvelope::message("Logged out successfully")))
}

#[utoipa::path(get, path = "/admin/orders", tag = "admin", security(("bearer" = []), ("admin_session" = [])),
    responses((status = 200, description = "All orders with customers, newest first"), (status = 401, description = "Not an admin")))]
pub async fn list_orders(State(state): State<ServerState>) -> ApiResult<Json<ApiEnvelope<Vec<OrderView>>>> {
    Ok(Json(ApiEnvelope::list(state.orders.list_all().await?)))
}

#[utoipa::path(post, path = "/admin/orders/{id}/status", tag = "admin", security(("bearer" = []), ("admin_session" = [])),
    params(("id" = Uuid, Path,)), request_body = crate::openapi::StatusUpdateRequest,
    responses((status = 200, description = "Order status updated"), (status = 400, description = "Unknown status"), (status = 404, description = "Order not found")))]
pub async fn update_order_status(
    State(state): State<ServerState>,
    path: Result<Path<Uuid>, PathRejection>,
    payload: Result<Json<StatusUpdateInput>, JsonRejection>,
) -> ApiResult<Json<ApiEnvelope<OrderView>>> {
    let Path(id) = path?;
    let Json(input) = payload?;
    let order = state.orders.update_status(id, input).await?;
    Ok(Json(ApiEnvelope::ok_with_message("Order status updated", order)))
}

#[utoipa::path(post, path = "/admin/add-dish", tag = "admin", security(("bearer" = []), ("admin_session" = [])),
    request_body = crate::openapi::NewDishRequest,
    responses((status = 200, description = "Dish added"), (status = 400, description = "Validation error")))]
pub async fn add_dish(
    State(state): State<ServerState>,
    payload: Result<Json<NewDishInput>, JsonRejection>,
) -> ApiResult<Json<ApiEnvelope<Dish>>> {
    let Json(input) = payload?;
    let dish = state.catalog.add_dish(input).await?;
    Ok(Json(ApiEnvelope::ok_with_message("Dish added successfully", dish)))
}

#[utoipa::path(put, path = "/admin/dishes/{id}", tag = "admin", security(("bearer" = []), ("admin_session" = [])),
    params(("id" = Uuid, Path,)), request_body = crate::openapi::DishUpdateRequest,
    responses((status = 200, description = "Dish updated"), (status = 404, description = "Dish not found")))]
pub async fn update_dish(
    State(state): State<ServerState>,
    path: Result<Path<Uuid>, PathRejection>,
    payload: Result<Json<DishUpdateInput>, JsonRejection>,
) -> ApiResult<Json<ApiEnvelope<Dish>>> {
    let Path(id) = path?;
    let Json(input) = payload?;
    let dish = state.catalog.update_dish(id, input).await?;
    Ok(Json(ApiEnvelope::ok_with_message("Dish updated", dish)))
}
