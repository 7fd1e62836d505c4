use async_trait::async_trait;
use models::account::NewAccount;
use uuid::Uuid;

use super::domain::Account;
use crate::errors::ServiceError;

/// Repository abstraction for account persistence (the credential store).
#[async_trait]
pub trait AccountRepository: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, ServiceError>;
    async fn find_by_federated_id(&self, federated_id: &str) -> Result<Option<Account>, ServiceError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, ServiceError>;
    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Account>, ServiceError>;
    /// Fails with `Conflict` when the email (or federated id) is taken.
    async fn create(&self, input: NewAccount) -> Result<Account, ServiceError>;
    async fn link_federated_identity(&self, id: Uuid, federated_id: &str, photo_url: Option<String>) -> Result<Account, ServiceError>;
}

/// Simple in-memory mock repository for tests and doc examples
pub mod mock {
    use super::*;
    use std::sync::{Mutex, MutexGuard};

    #[derive(Default)]
    pub struct MockAccountRepository {
        accounts: Mutex<Vec<Account>>,
    }

    impl MockAccountRepository {
        fn guard(&self) -> Result<MutexGuard<'_, Vec<Account>>, ServiceError> {
            self.accounts.lock().map_err(|_| ServiceError::Repository("mock lock poisoned".into()))
        }

        /// Number of stored accounts.
        pub fn len(&self) -> usize {
            self.accounts.lock().map(|a| a.len()).unwrap_or_default()
        }

        pub fn is_empty(&self) -> bool { self.len() == 0 }
    }

    #[async_trait]
    impl AccountRepository for MockAccountRepository {
        async fn find_by_email(&self, email: &str) -> Result<Option<Account>, ServiceError> {
            Ok(self.guard()?.iter().find(|a| a.email == email).cloned())
        }

        async fn find_by_federated_id(&self, federated_id: &str) -> Result<Option<Account>, ServiceError> {
            Ok(self.guard()?.iter().find(|a| a.federated_id.as_deref() == Some(federated_id)).cloned())
        }

        async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, ServiceError> {
            Ok(self.guard()?.iter().find(|a| a.id == id).cloned())
        }

        async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Account>, ServiceError> {
            Ok(self.guard()?.iter().filter(|a| ids.contains(&a.id)).cloned().collect())
        }

        async fn create(&self, input: NewAccount) -> Result<Account, ServiceError> {
            models::account::validate_email(&input.email)?;
            models::account::validate_display_name(&input.display_name)?;
            let mut accounts = self.guard()?;
            if accounts.iter().any(|a| a.email == input.email) {
                return Err(ServiceError::Conflict("User already exists with this email".into()));
            }
            if let Some(fid) = &input.federated_id {
                if accounts.iter().any(|a| a.federated_id.as_ref() == Some(fid)) {
                    return Err(ServiceError::Conflict("federated identity already linked".into()));
                }
            }
            let account = Account {
                id: Uuid::new_v4(),
                email: input.email,
                password_hash: input.password_hash,
                display_name: input.display_name,
                role: input.role,
                phone_number: input.phone_number,
                photo_url: input.photo_url,
                federated_id: input.federated_id,
                address: None,
                created_at: chrono::Utc::now(),
            };
            accounts.push(account.clone());
            Ok(account)
        }

        async fn link_federated_identity(&self, id: Uuid, federated_id: &str, photo_url: Option<String>) -> Result<Account, ServiceError> {
            let mut accounts = self.guard()?;
            let account = accounts
                .iter_mut()
                .find(|a| a.id == id)
                .ok_or_else(|| ServiceError::not_found("account"))?;
            account.federated_id = Some(federated_id.to_string());
            if account.photo_url.is_none() && photo_url.is_some() {
                account.photo_url = photo_url;
            }
            Ok(account.clone())
        }
    }
}
