use rust_decimal::Decimal;
use utoipa::openapi::security::{ApiKey, ApiKeyValue, HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi, ToSchema};
use uuid::Uuid;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct RegisterRequest { pub email: String, pub password: String, pub display_name: String, pub phone_number: Option<String> }

#[derive(ToSchema)]
pub struct LoginRequest { pub email: String, pub password: String }

#[derive(ToSchema)]
pub struct FederatedAuthRequest {
    pub email: Option<String>,
    #[schema(rename = "displayName")]
    pub display_name: Option<String>,
    pub uid: String,
    #[schema(rename = "photoURL")]
    pub photo_url: Option<String>,
}

#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct OrderItemDoc { pub dish_id: Uuid, pub quantity: i32 }

#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    pub items: Vec<OrderItemDoc>,
    /// `COD` or `Online`
    pub payment_method: String,
}

#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct StatusUpdateRequest {
    /// Pending, Preparing, Out for Delivery, Completed or Cancelled
    pub status: String,
    /// Pending, Paid or Failed
    pub payment_status: Option<String>,
}

#[derive(ToSchema)]
pub struct NewDishRequest {
    pub name: String,
    /// `Veg` or `Non-Veg`
    #[schema(rename = "type")]
    pub dish_type: String,
    pub category: String,
    pub price: Decimal,
    pub description: String,
    /// Hosted image URL
    pub image: String,
}

#[derive(ToSchema)]
pub struct DishUpdateRequest { pub price: Option<Decimal>, pub available: Option<bool> }

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer",
                SecurityScheme::Http(HttpBuilder::new().scheme(HttpAuthScheme::Bearer).bearer_format("JWT").build()),
            );
            components.add_security_scheme(
                "admin_session",
                SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::new(crate::guards::ADMIN_SESSION_COOKIE))),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::system::health,
        crate::routes::auth::register,
        crate::routes::auth::login,
        crate::routes::auth::google,
        crate::routes::auth::me,
        crate::routes::dishes::list,
        crate::routes::dishes::get,
        crate::routes::orders::create,
        crate::routes::orders::my_orders,
        crate::routes::orders::get,
        crate::routes::admin::login,
        crate::routes::admin::logout,
        crate::routes::admin::list_orders,
        crate::routes::admin::update_order_status,
        crate::routes::admin::add_dish,
        crate::routes::admin::update_dish,
    ),
    components(
        schemas(
            HealthResponse,
            RegisterRequest,
            LoginRequest,
            FederatedAuthRequest,
            OrderItemDoc,
            CreateOrderRequest,
            StatusUpdateRequest,
            NewDishRequest,
            DishUpdateRequest,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "health"),
        (name = "auth"),
        (name = "dishes"),
        (name = "orders"),
        (name = "admin")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_core_paths() {
        let doc = ApiDoc::openapi();
        for path in ["/api/orders", "/api/orders/{id}", "/api/auth/google", "/admin/orders/{id}/status"] {
            assert!(doc.paths.paths.contains_key(path), "missing {}", path);
        }
    }
}
