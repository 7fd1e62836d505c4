use axum::{extract::{Path, State}, extract::rejection::{JsonRejection, PathRejection}, http::StatusCode, Extension, Json};
use common::ApiEnvelope;
use service::orders::domain::{CreateOrderInput, OrderView};
use uuid::Uuid;

use crate::errors::ApiResult;
use crate::guards::CurrentAccount;
use crate::metrics::{failure_kind, ORDERS_CREATED_TOTAL, ORDER_FAILURES_TOTAL};
use crate::state::ServerState;

#[utoipa::path(post, path = "/api/orders", tag = "orders", security(("bearer" = [])), request_body = crate::openapi::CreateOrderRequest,
    responses((status = 201, description = "Order placed"), (status = 400, description = "Empty order, unavailable dish or bad line"),
        (status = 404, description = "Dish not found")))]
pub async fn create(
    State(state): State<ServerState>,
    Extension(CurrentAccount(account)): Extension<CurrentAccount>,
    payload: Result<Json<CreateOrderInput>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<ApiEnvelope<OrderView>>)> {
    let Json(input) = payload?;
    match state.orders.create_order(account.id, input).await {
        Ok(order) => {
            ORDERS_CREATED_TOTAL.inc();
            Ok((StatusCode::CREATED, Json(ApiEnvelope::ok(order))))
        }
        Err(e) => {
            ORDER_FAILURES_TOTAL.with_label_values(&[failure_kind(&e)]).inc();
            Err(e.into())
        }
    }
}

#[utoipa::path(get, path = "/api/orders/my-orders", tag = "orders", security(("bearer" = [])),
    responses((status = 200, description = "Caller's orders, newest first")))]
pub async fn my_orders(
    State(state): State<ServerState>,
    Extension(CurrentAccount(account)): Extension<CurrentAccount>,
) -> ApiResult<Json<ApiEnvelope<Vec<OrderView>>>> {
    Ok(Json(ApiEnvelope::list(state.orders.my_orders(account.id).await?)))
}

#[utoipa::path(get, path = "/api/orders/{id}", tag = "orders", security(("bearer" = [])), params(("id" = Uuid, Path,)),
    responses((status = 200, description = "Order"), (status = 403, description = "Not the owner"), (status = 404, description = "Order not found")))]
pub async fn get(
    State(state): State<ServerState>,
    Extension(CurrentAccount(account)): Extension<CurrentAccount>,
    path: Result<Path<Uuid>, PathRejection>,
) -> ApiResult<Json<ApiEnvelope<OrderView>>> {
    let Path(id) = path?;
    Ok(Json(ApiEnvelope::ok(state.orders.get_order(account.id, id).await?)))
}
