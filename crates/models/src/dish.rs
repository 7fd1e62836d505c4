use sea_orm::{entity::prelude::*, DatabaseConnection, QueryOrder, Set};
use uuid::Uuid;
use chrono::Utc;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "dish")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub dish_type: DishType,
    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    pub price: Decimal,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub image: String,
    pub category: String,
    pub available: bool,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum DishType {
    #[sea_orm(string_value = "Veg")]
    Veg,
    #[sea_orm(string_value = "Non-Veg")]
    #[serde(rename = "Non-Veg")]
    NonVeg,
}

#[derive(Clone, Debug)]
pub struct NewDish {
    pub name: String,
    pub dish_type: DishType,
    pub price: Decimal,
    pub description: String,
    pub image: String,
    pub category: String,
    pub available: bool,
}

/// Menu listing filter; `None` fields are not constrained.
#[derive(Clone, Debug, Default)]
pub struct DishFilter {
    pub dish_type: Option<DishType>,
    pub category: Option<String>,
    pub available_only: bool,
}

/// Partial admin update.
#[derive(Clone, Debug, Default)]
pub struct DishPatch {
    pub price: Option<Decimal>,
    pub available: Option<bool>,
}

/// Largest value `dish.price` (NUMERIC(10,2)) can hold.
pub fn max_price() -> Decimal { Decimal::new(9_999_999_999, 2) }

pub fn validate_price(price: Decimal) -> Result<(), ModelError> {
    if price <= Decimal::ZERO { return Err(ModelError::Validation("price must be positive".into())); }
    if price > max_price() { return Err(ModelError::Validation(format!("price must be at most {}", max_price()))); }
    Ok(())
}

pub fn validate_new(input: &NewDish) -> Result<(), ModelError> {
    if input.name.trim().is_empty() { return Err(ModelError::Validation("name required".into())); }
    if input.description.trim().is_empty() { return Err(ModelError::Validation("description required".into())); }
    if input.image.trim().is_empty() { return Err(ModelError::Validation("image required".into())); }
    if input.category.trim().is_empty() { return Err(ModelError::Validation("category required".into())); }
    validate_price(input.price)
}

pub async fn create(db: &DatabaseConnection, input: NewDish) -> Result<Model, ModelError> {
    validate_new(&input)?;
    let now = Utc::now().into();
    let am = ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(input.name),
        dish_type: Set(input.dish_type),
        price: Set(input.price),
        description: Set(input.description),
        image: Set(input.image),
        category: Set(input.category),
        available: Set(input.available),
        created_at: Set(now),
        updated_at: Set(now),
    };
    Ok(am.insert(db).await?)
}

pub async fn find_by_id(db: &DatabaseConnection, id: Uuid) -> Result<Option<Model>, ModelError> {
    Ok(Entity::find_by_id(id).one(db).await?)
}

pub async fn find_by_ids(db: &DatabaseConnection, ids: Vec<Uuid>) -> Result<Vec<Model>, ModelError> {
    if ids.is_empty() { return Ok(Vec::new()); }
    Ok(Entity::find().filter(Column::Id.is_in(ids)).all(db).await?)
}

/// Newest first.
pub async fn list(db: &DatabaseConnection, filter: &DishFilter) -> Result<Vec<Model>, ModelError> {
    let mut finder = Entity::find();
    if filter.available_only { finder = finder.filter(Column::Available.eq(true)); }
    if let Some(t) = filter.dish_type { finder = finder.filter(Column::DishType.eq(t)); }
    if let Some(c) = &filter.category { finder = finder.filter(Column::Category.eq(c.clone())); }
    Ok(finder.order_by_desc(Column::CreatedAt).all(db).await?)
}

pub async fn update(db: &DatabaseConnection, id: Uuid, patch: DishPatch) -> Result<Option<Model>, ModelError> {
    let Some(existing) = Entity::find_by_id(id).one(db).await? else { return Ok(None); };
    let mut am: ActiveModel = existing.into();
    if let Some(p) = patch.price { validate_price(p)?; am.price = Set(p); }
    if let Some(a) = patch.available { am.available = Set(a); }
    am.updated_at = Set(Utc::now().into());
    Ok(Some(am.update(db).await?))
}

pub async fn count(db: &DatabaseConnection) -> Result<u64, ModelError> {
    Ok(Entity::find().count(db).await?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> NewDish {
        NewDish {
            name: "Maharaja Thali".into(),
            dish_type: DishType::Veg,
            price: Decimal::from(249),
            description: "Dal Makhani, Paneer, Rice".into(),
            image: "https://img.example/thali.jpg".into(),
            category: "Thalis".into(),
            available: true,
        }
    }

    #[test]
    fn rejects_non_positive_price() {
        let mut d = sample();
        d.price = Decimal::ZERO;
        assert!(validate_new(&d).is_err());
        d.price = Decimal::from(-5);
        assert!(validate_new(&d).is_err());
    }

    #[test]
    fn price_must_fit_column() {
        assert!(validate_price(max_price()).is_ok());
        assert!(validate_price(Decimal::from(100_000_000)).is_err());
        assert!(validate_price(Decimal::new(1999, 2)).is_ok());
    }

    #[test]
    fn rejects_blank_fields() {
        let mut d = sample();
        d.category = "  ".into();
        assert!(validate_new(&d).is_err());
        assert!(validate_new(&sample()).is_ok());
    }

    #[test]
    fn dish_type_wire_names() {
        assert_eq!(serde_json::to_string(&DishType::NonVeg).unwrap(), "\"Non-Veg\"");
        let t: DishType = serde_json::from_str("\"Veg\"").unwrap();
        assert_eq!(t, DishType::Veg);
    }
}
