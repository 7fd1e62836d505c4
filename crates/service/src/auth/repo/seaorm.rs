use async_trait::async_trait;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};
use uuid::Uuid;

use models::account::{self, NewAccount};

use crate::auth::domain::Account;
use crate::auth::repository::AccountRepository;
use crate::errors::ServiceError;

pub struct SeaOrmAccountRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmAccountRepository {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }
}

pub(crate) fn to_domain(m: account::Model) -> Account {
    Account {
        id: m.id,
        email: m.email,
        password_hash: m.password_hash,
        display_name: m.display_name,
        role: m.role,
        phone_number: m.phone_number,
        photo_url: m.photo_url,
        federated_id: m.federated_id,
        address: m.address,
        created_at: m.created_at.into(),
    }
}

#[async_trait]
impl AccountRepository for SeaOrmAccountRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, ServiceError> {
        Ok(account::find_by_email(&self.db, email).await?.map(to_domain))
    }

    async fn find_by_federated_id(&self, federated_id: &str) -> Result<Option<Account>, ServiceError> {
        let res = account::Entity::find()
            .filter(account::Column::FederatedId.eq(federated_id.to_string()))
            .one(&self.db)
            .await
            .map_err(|e| ServiceError::Repository(e.to_string()))?;
        Ok(res.map(to_domain))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, ServiceError> {
        Ok(account::find_by_id(&self.db, id).await?.map(to_domain))
    }

    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Account>, ServiceError> {
        if ids.is_empty() { return Ok(Vec::new()); }
        let res = account::Entity::find()
            .filter(account::Column::Id.is_in(ids.to_vec()))
            .all(&self.db)
            .await
            .map_err(|e| ServiceError::Repository(e.to_string()))?;
        Ok(res.into_iter().map(to_domain).collect())
    }

    async fn create(&self, input: NewAccount) -> Result<Account, ServiceError> {
        let created = account::create(&self.db, input).await.map_err(|e| match e {
            models::errors::ModelError::Conflict(_) => ServiceError::Conflict("User already exists with this email".into()),
            other => other.into(),
        })?;
        Ok(to_domain(created))
    }

    async fn link_federated_identity(&self, id: Uuid, federated_id: &str, photo_url: Option<String>) -> Result<Account, ServiceError> {
        Ok(to_domain(account::link_federated_identity(&self.db, id, federated_id, photo_url).await?))
    }
}
