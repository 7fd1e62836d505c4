use sea_orm::{entity::prelude::*, DatabaseConnection, FromJsonQueryResult, Set};
use uuid::Uuid;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "account")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub email: String,
    pub password_hash: Option<String>,
    pub display_name: String,
    pub role: Role,
    pub phone_number: Option<String>,
    pub photo_url: Option<String>,
    #[sea_orm(unique)]
    pub federated_id: Option<String>,
    #[sea_orm(column_type = "JsonBinary", nullable)]
    pub address: Option<Address>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "crate::order::Entity")]
    Orders,
}

impl Related<crate::order::Entity> for Entity {
    fn to() -> RelationDef { Relation::Orders.def() }
}

impl ActiveModelBehavior for ActiveModel {}

#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[sea_orm(string_value = "customer")]
    Customer,
    #[sea_orm(string_value = "admin")]
    Admin,
}

#[derive(Clone, Debug, PartialEq, Eq, Default, Serialize, Deserialize, FromJsonQueryResult)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub street: Option<String>,
    pub city: Option<String>,
    pub zip_code: Option<String>,
}

/// Fields accepted when inserting an account.
#[derive(Clone, Debug)]
pub struct NewAccount {
    pub email: String,
    pub password_hash: Option<String>,
    pub display_name: String,
    pub role: Role,
    pub phone_number: Option<String>,
    pub photo_url: Option<String>,
    pub federated_id: Option<String>,
}

pub fn validate_email(email: &str) -> Result<(), ModelError> {
    let email = email.trim();
    if email.is_empty() { return Err(ModelError::Validation("email required".into())); }
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Ok(()),
        _ => Err(ModelError::Validation("invalid email".into())),
    }
}

pub const MAX_DISPLAY_NAME_CHARS: usize = 128;

pub fn validate_display_name(name: &str) -> Result<(), ModelError> {
    if name.trim().is_empty() { return Err(ModelError::Validation("display name required".into())); }
    if name.chars().count() > MAX_DISPLAY_NAME_CHARS {
        return Err(ModelError::Validation(format!("display name too long (<={})", MAX_DISPLAY_NAME_CHARS)));
    }
    Ok(())
}

pub async fn create(db: &DatabaseConnection, input: NewAccount) -> Result<Model, ModelError> {
    validate_email(&input.email)?;
    validate_display_name(&input.display_name)?;
    let now = Utc::now().into();
    let am = ActiveModel {
        id: Set(Uuid::new_v4()),
        email: Set(input.email),
        password_hash: Set(input.password_hash),
        display_name: Set(input.display_name),
        role: Set(input.role),
        phone_number: Set(input.phone_number),
        photo_url: Set(input.photo_url),
        federated_id: Set(input.federated_id),
        address: Set(None),
        created_at: Set(now),
        updated_at: Set(now),
    };
    Ok(am.insert(db).await?)
}

pub async fn find_by_id(db: &DatabaseConnection, id: Uuid) -> Result<Option<Model>, ModelError> {
    Ok(Entity::find_by_id(id).one(db).await?)
}

/// Exact (case-sensitive) email match.
pub async fn find_by_email(db: &DatabaseConnection, email: &str) -> Result<Option<Model>, ModelError> {
    Ok(Entity::find().filter(Column::Email.eq(email)).one(db).await?)
}

/// Attach a federated identity to an existing account, backfilling the photo if it has none.
pub async fn link_federated_identity(
    db: &DatabaseConnection,
    id: Uuid,
    federated_id: &str,
    photo_url: Option<String>,
) -> Result<Model, ModelError> {
    let existing = Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| ModelError::Validation("account not found".into()))?;
    let needs_photo = existing.photo_url.is_none() && photo_url.is_some();
    let mut am: ActiveModel = existing.into();
    am.federated_id = Set(Some(federated_id.to_string()));
    if needs_photo {
        am.photo_url = Set(photo_url);
    }
    am.updated_at = Set(Utc::now().into());
    Ok(am.update(db).await?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_validation() {
        assert!(validate_email("user@example.com").is_ok());
        assert!(validate_email("").is_err());
        assert!(validate_email("no-at-sign").is_err());
        assert!(validate_email("@example.com").is_err());
    }

    #[test]
    fn display_name_validation() {
        assert!(validate_display_name("Asha").is_ok());
        assert!(validate_display_name("   ").is_err());
        assert!(validate_display_name(&"x".repeat(129)).is_err());
    }

    #[test]
    fn role_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Role::Customer).unwrap(), "\"customer\"");
    }
}
