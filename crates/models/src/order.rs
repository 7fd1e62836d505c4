use sea_orm::{entity::prelude::*, DatabaseConnection, FromJsonQueryResult, QueryOrder, Set};
use uuid::Uuid;
use chrono::Utc;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "orders")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub account_id: Uuid,
    #[sea_orm(column_type = "JsonBinary")]
    pub items: LineItems,
    #[sea_orm(column_type = "Decimal(Some((12, 2)))")]
    pub total_amount: Decimal,
    pub payment_method: PaymentMethod,
    pub payment_status: PaymentStatus,
    pub status: OrderStatus,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "crate::account::Entity",
        from = "Column::AccountId",
        to = "crate::account::Column::Id"
    )]
    Account,
}

impl Related<crate::account::Entity> for Entity {
    fn to() -> RelationDef { Relation::Account.def() }
}

impl ActiveModelBehavior for ActiveModel {}

/// Price snapshot of one dish taken when the order was placed.
///
/// `dish_id` is a back-reference into the catalog; `price` never follows later
/// catalog edits.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub dish_id: Uuid,
    pub quantity: i32,
    pub price: Decimal,
}

impl LineItem {
    pub fn subtotal(&self) -> Decimal {
        self.price * Decimal::from(self.quantity)
    }
}

/// Ordered line items, persisted as one JSONB array.
#[derive(Clone, Debug, PartialEq, Eq, Default, Serialize, Deserialize, FromJsonQueryResult)]
pub struct LineItems(pub Vec<LineItem>);

impl LineItems {
    pub fn total(&self) -> Decimal {
        self.0.iter().map(LineItem::subtotal).sum()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum PaymentMethod {
    #[sea_orm(string_value = "COD")]
    #[serde(rename = "COD")]
    Cod,
    #[sea_orm(string_value = "Online")]
    Online,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum PaymentStatus {
    #[sea_orm(string_value = "Pending")]
    Pending,
    #[sea_orm(string_value = "Paid")]
    Paid,
    #[sea_orm(string_value = "Failed")]
    Failed,
}

/// Kitchen/delivery lifecycle:
/// `Pending -> Preparing -> Out for Delivery -> Completed`, or `Cancelled`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
pub enum OrderStatus {
    #[sea_orm(string_value = "Pending")]
    Pending,
    #[sea_orm(string_value = "Preparing")]
    Preparing,
    #[sea_orm(string_value = "Out for Delivery")]
    #[serde(rename = "Out for Delivery")]
    OutForDelivery,
    #[sea_orm(string_value = "Completed")]
    Completed,
    #[sea_orm(string_value = "Cancelled")]
    Cancelled,
}

#[derive(Clone, Debug)]
pub struct NewOrder {
    pub account_id: Uuid,
    pub items: LineItems,
    pub payment_method: PaymentMethod,
}

/// Per-line quantity ceiling.
pub const MAX_QUANTITY: i32 = 1_000;

/// Largest value `orders.total_amount` (NUMERIC(12,2)) can hold.
pub fn max_total() -> Decimal { Decimal::new(999_999_999_999, 2) }

pub fn validate_quantity(quantity: i32) -> Result<(), ModelError> {
    if !(1..=MAX_QUANTITY).contains(&quantity) {
        return Err(ModelError::Validation(format!("quantity must be between 1 and {}", MAX_QUANTITY)));
    }
    Ok(())
}

/// Checks everything the insert would otherwise reject at the database.
pub fn validate_items(items: &LineItems) -> Result<(), ModelError> {
    if items.0.is_empty() { return Err(ModelError::Validation("order has no items".into())); }
    for item in &items.0 { validate_quantity(item.quantity)?; }
    let total = items.0.iter().try_fold(Decimal::ZERO, |acc, i| {
        i.price.checked_mul(Decimal::from(i.quantity)).and_then(|sub| acc.checked_add(sub))
    });
    match total {
        Some(t) if t <= max_total() => Ok(()),
        _ => Err(ModelError::Validation("order total exceeds the maximum allowed".into())),
    }
}

/// Insert an order. The total is always derived from the line items.
pub async fn create(db: &DatabaseConnection, input: NewOrder) -> Result<Model, ModelError> {
    validate_items(&input.items)?;
    let now = Utc::now().into();
    let total = input.items.total();
    let am = ActiveModel {
        id: Set(Uuid::new_v4()),
        account_id: Set(input.account_id),
        items: Set(input.items),
        total_amount: Set(total),
        payment_method: Set(input.payment_method),
        payment_status: Set(PaymentStatus::Pending),
        status: Set(OrderStatus::Pending),
        created_at: Set(now),
        updated_at: Set(now),
    };
    Ok(am.insert(db).await?)
}

pub async fn find_by_id(db: &DatabaseConnection, id: Uuid) -> Result<Option<Model>, ModelError> {
    Ok(Entity::find_by_id(id).one(db).await?)
}

/// Orders owned by one account, newest first.
pub async fn list_by_account(db: &DatabaseConnection, account_id: Uuid) -> Result<Vec<Model>, ModelError> {
    Ok(Entity::find()
        .filter(Column::AccountId.eq(account_id))
        .order_by_desc(Column::CreatedAt)
        .all(db)
        .await?)
}

/// Every order, newest first (admin view).
pub async fn list_all(db: &DatabaseConnection) -> Result<Vec<Model>, ModelError> {
    Ok(Entity::find().order_by_desc(Column::CreatedAt).all(db).await?)
}

/// Overwrite fulfillment (and optionally payment) status; `None` when the order does not exist.
pub async fn update_status(
    db: &DatabaseConnection,
    id: Uuid,
    status: OrderStatus,
    payment_status: Option<PaymentStatus>,
) -> Result<Option<Model>, ModelError> {
    let Some(existing) = Entity::find_by_id(id).one(db).await? else { return Ok(None); };
    let mut am: ActiveModel = existing.into();
    am.status = Set(status);
    if let Some(ps) = payment_status { am.payment_status = Set(ps); }
    am.updated_at = Set(Utc::now().into());
    Ok(Some(am.update(db).await?))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(price: i64, quantity: i32) -> LineItem {
        LineItem { dish_id: Uuid::new_v4(), quantity, price: Decimal::from(price) }
    }

    #[test]
    fn total_is_sum_of_subtotals() {
        let items = LineItems(vec![item(249, 2), item(35, 4), item(59, 1)]);
        assert_eq!(items.total(), Decimal::from(498 + 140 + 59));
    }

    #[test]
    fn fractional_prices_stay_exact() {
        let items = LineItems(vec![LineItem { dish_id: Uuid::new_v4(), quantity: 3, price: Decimal::new(1999, 2) }]);
        assert_eq!(items.total(), Decimal::new(5997, 2));
    }

    #[test]
    fn status_wire_names() {
        assert_eq!(serde_json::to_string(&OrderStatus::OutForDelivery).unwrap(), "\"Out for Delivery\"");
        assert_eq!(serde_json::to_string(&PaymentMethod::Cod).unwrap(), "\"COD\"");
        assert!(serde_json::from_str::<OrderStatus>("\"Shipped\"").is_err());
    }

    #[test]
    fn quantity_bounds() {
        assert!(validate_items(&LineItems(vec![item(249, 1)])).is_ok());
        assert!(validate_items(&LineItems(vec![item(249, MAX_QUANTITY)])).is_ok());
        assert!(validate_items(&LineItems(vec![item(249, 0)])).is_err());
        assert!(validate_items(&LineItems(vec![item(249, 50_000_000)])).is_err());
        assert!(validate_items(&LineItems(Vec::new())).is_err());
    }

    #[test]
    fn total_must_fit_column() {
        let top = LineItem { dish_id: Uuid::new_v4(), quantity: 100, price: crate::dish::max_price() };
        assert!(validate_items(&LineItems(vec![top.clone()])).is_ok());
        let two = LineItems(vec![top.clone(), top]);
        assert!(two.total() > max_total());
        assert!(validate_items(&two).is_err());
    }
}
