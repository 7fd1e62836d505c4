use axum::{extract::{Path, Query, State}, extract::rejection::{PathRejection, QueryRejection}, Json};
use common::ApiEnvelope;
use service::catalog::domain::{Dish, MenuQuery};
use uuid::Uuid;

use crate::errors::ApiResult;
use crate::state::ServerState;

#[utoipa::path(get, path = "/api/dishes", tag = "dishes",
    params(("type" = Option<String>, Query, description = "Veg or Non-Veg"), ("category" = Option<String>, Query,)),
    responses((status = 200, description = "Available dishes, newest first")))]
pub async fn list(
    State(state): State<ServerState>,
    query: Result<Query<MenuQuery>, QueryRejection>,
) -> ApiResult<Json<ApiEnvelope<Vec<Dish>>>> {
    let Query(query) = query?;
    let dishes = state.catalog.list_menu(query).await?;
    Ok(Json(ApiEnvelope::list(dishes)))
}

#[utoipa::path(get, path = "/api/dishes/{id}", tag = "dishes", params(("id" = Uuid, Path,)),
    responses((status = 200, description = "Dish"), (status = 404, description = "Dish not found")))]
pub async fn get(
    State(state): State<ServerState>,
    path: Result<Path<Uuid>, PathRejection>,
) -> ApiResult<Json<ApiEnvelope<Dish>>> {
    let Path(id) = path?;
    Ok(Json(ApiEnvelope::ok(state.catalog.get(id).await?)))
}
