use axum::Json;
use common::types::{Banner, Health};
use utoipa::OpenApi;

use crate::metrics::encode_metrics;
use crate::openapi::ApiDoc;

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "OK", body = crate::openapi::HealthResponse)))]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

pub async fn banner() -> Json<Banner> {
    Json(Banner { message: "Cloud Kitchen API is running".to_string() })
}

pub async fn metrics() -> (axum::http::StatusCode, String) {
    encode_metrics()
}

pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
