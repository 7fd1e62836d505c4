use chrono::{DateTime, Utc};
use models::account::{Address, Role};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Registration input
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterInput {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub phone_number: Option<String>,
}

/// Login input
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginInput {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Federated (Google) sign-in payload; email and name may be omitted by the provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FederatedAuthInput {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub uid: String,
    #[serde(default, rename = "photoURL")]
    pub photo_url: Option<String>,
}

/// Stored account (business view). Never serialized; see [`PublicAccount`].
#[derive(Debug, Clone, PartialEq)]
pub struct Account {
    pub id: Uuid,
    pub email: String,
    pub password_hash: Option<String>,
    pub display_name: String,
    pub role: Role,
    pub phone_number: Option<String>,
    pub photo_url: Option<String>,
    pub federated_id: Option<String>,
    pub address: Option<Address>,
    pub created_at: DateTime<Utc>,
}

/// Account fields safe to return to the owner.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PublicAccount {
    pub id: Uuid,
    pub email: String,
    pub display_name: String,
    pub role: Role,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(rename = "photoURL", skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
    pub created_at: DateTime<Utc>,
}

impl From<&Account> for PublicAccount {
    fn from(a: &Account) -> Self {
        Self {
            id: a.id,
            email: a.email.clone(),
            display_name: a.display_name.clone(),
            role: a.role,
            phone_number: a.phone_number.clone(),
            photo_url: a.photo_url.clone(),
            address: a.address.clone(),
            created_at: a.created_at,
        }
    }
}

/// Token plus the public account it was issued for.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthSession {
    pub token: String,
    pub user: PublicAccount,
}

/// Result of a federated sign-in; `created` distinguishes signup from login.
#[derive(Debug, Clone)]
pub struct FederatedOutcome {
    pub session: AuthSession,
    pub created: bool,
}
