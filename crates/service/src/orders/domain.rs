use chrono::{DateTime, Utc};
use models::order::{LineItem, OrderStatus, PaymentMethod, PaymentStatus};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One requested line; `dish_id` is kept raw so an empty or malformed id
/// surfaces as a validation error rather than a body rejection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemRequest {
    #[serde(default)]
    pub dish_id: String,
    pub quantity: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderInput {
    #[serde(default)]
    pub items: Vec<OrderItemRequest>,
    #[serde(default)]
    pub payment_method: Option<PaymentMethod>,
}

/// Admin status change. Values stay strings until the service parses them so
/// unknown names are reported as validation failures.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusUpdateInput {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub payment_status: Option<String>,
}

/// Persisted order.
#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    pub id: Uuid,
    pub account_id: Uuid,
    pub items: Vec<LineItem>,
    pub total_amount: Decimal,
    pub payment_method: PaymentMethod,
    pub payment_status: PaymentStatus,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Dish fields resolved for display next to a line item.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DishSummary {
    pub id: Uuid,
    pub name: String,
    pub image: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OrderLine {
    pub dish_id: Uuid,
    /// `None` if the dish has since disappeared from the catalog.
    pub dish: Option<DishSummary>,
    pub quantity: i32,
    pub price: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CustomerSummary {
    pub id: Uuid,
    pub display_name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
}

/// Order as returned to clients.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OrderView {
    pub id: Uuid,
    pub user: Uuid,
    /// Only filled in for the admin listing.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer: Option<CustomerSummary>,
    pub items: Vec<OrderLine>,
    pub total_amount: Decimal,
    pub payment_method: PaymentMethod,
    pub payment_status: PaymentStatus,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
