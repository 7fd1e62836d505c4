use once_cell::sync::Lazy;
use prometheus::{register_int_counter, register_int_counter_vec, Encoder, IntCounter, IntCounterVec, TextEncoder};

// Prometheus metrics (default registry)
pub static ORDERS_CREATED_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!("kitchen_orders_created_total", "Total orders placed")
        .expect("register orders_created_total")
});

pub static ORDER_FAILURES_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!("kitchen_order_failures_total", "Rejected order placements by kind", &["kind"])
        .expect("register order_failures_total")
});

pub static CUSTOMER_LOGINS_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!("kitchen_customer_logins_total", "Successful customer logins (password and federated)")
        .expect("register customer_logins_total")
});

pub static ADMIN_LOGINS_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!("kitchen_admin_logins_total", "Successful admin logins")
        .expect("register admin_logins_total")
});

/// Label for a failed order placement.
pub fn failure_kind(err: &service::errors::ServiceError) -> &'static str {
    use service::errors::ServiceError::*;
    match err {
        EmptyOrder => "empty",
        DishNotFound(_) => "dish_not_found",
        DishUnavailable(_) => "dish_unavailable",
        Validation(_) => "validation",
        _ => "internal",
    }
}

pub fn encode_metrics() -> (axum::http::StatusCode, String) {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        return (
            axum::http::StatusCode::INTERNAL_SERVER_ERROR,
            format!("metrics encode error: {e}"),
        );
    }
    (
        axum::http::StatusCode::OK,
        String::from_utf8(buffer).unwrap_or_default(),
    )
}
