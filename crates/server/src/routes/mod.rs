pub mod admin;
pub mod auth;
pub mod dishes;
pub mod orders;
pub mod system;

use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use crate::guards::{require_admin, require_customer};
use crate::state::ServerState;

/// Build the full application router: public, customer and admin routes
pub fn build_router(state: ServerState, cors: CorsLayer) -> Router {
    let public = Router::new()
        .route("/", get(system::banner))
        .route("/health", get(system::health))
        .route("/metrics", get(system::metrics))
        .route("/api-docs/openapi.json", get(system::openapi_json))
        .route("/api/auth/register", post(auth::register))
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/google", post(auth::google))
        .route("/api/dishes", get(dishes::list))
        .route("/api/dishes/:id", get(dishes::get))
        .route("/admin/login", post(admin::login));

    // Customer routes (bearer token)
    let customer = Router::new()
        .route("/api/auth/me", get(auth::me))
        .route("/api/orders", post(orders::create))
        .route("/api/orders/my-orders", get(orders::my_orders))
        .route("/api/orders/:id", get(orders::get))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_customer));

    // Admin routes (admin token or session cookie)
    let admin_routes = Router::new()
        .route("/admin/logout", post(admin::logout))
        .route("/admin/orders", get(admin::list_orders))
        .route("/admin/orders/:id/status", post(admin::update_order_status))
        .route("/admin/add-dish", post(admin::add_dish))
        .route("/admin/dishes/:id", put(admin::update_dish))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_admin));

    public
        .merge(customer)
        .merge(admin_routes)
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                // 每次请求创建 span，包含方法和路径等，日志级别为 INFO
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                // 响应返回时打点，包含状态码与耗时
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                // 失败（5xx 等）时以 ERROR 记录
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
