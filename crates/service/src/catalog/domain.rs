use chrono::{DateTime, Utc};
use models::dish::DishType;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Dish as exposed to clients.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Dish {
    pub id: Uuid,
    pub name: String,
    #[serde(rename = "type")]
    pub dish_type: DishType,
    pub category: String,
    pub price: Decimal,
    pub description: String,
    pub image: String,
    pub available: bool,
    pub created_at: DateTime<Utc>,
}

/// Admin payload for a new dish. `image` is an already-hosted URL.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewDishInput {
    pub name: String,
    #[serde(rename = "type")]
    pub dish_type: DishType,
    pub category: String,
    pub price: Decimal,
    pub description: String,
    pub image: String,
    #[serde(default)]
    pub available: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DishUpdateInput {
    #[serde(default)]
    pub price: Option<Decimal>,
    #[serde(default)]
    pub available: Option<bool>,
}

/// Menu query; both fields are exact matches when present.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MenuQuery {
    #[serde(default, rename = "type")]
    pub dish_type: Option<DishType>,
    #[serde(default)]
    pub category: Option<String>,
}
