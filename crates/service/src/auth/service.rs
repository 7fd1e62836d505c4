use std::sync::Arc;

use argon2::{Argon2, password_hash::{PasswordHasher, PasswordVerifier, SaltString}, PasswordHash};
use models::account::{NewAccount, Role};
use rand::rngs::OsRng;
use tracing::{debug, info, instrument};
use uuid::Uuid;

use super::domain::{Account, AuthSession, FederatedAuthInput, FederatedOutcome, LoginInput, PublicAccount, RegisterInput};
use super::repository::AccountRepository;
use crate::errors::ServiceError;
use crate::token::TokenCodec;

const FEDERATED_FALLBACK_NAME: &str = "Google User";

/// Customer auth service independent of web framework
pub struct AuthService {
    repo: Arc<dyn AccountRepository>,
    tokens: TokenCodec,
}

impl AuthService {
    pub fn new(repo: Arc<dyn AccountRepository>, tokens: TokenCodec) -> Self { Self { repo, tokens } }

    pub fn tokens(&self) -> &TokenCodec { &self.tokens }

    /// Register a new customer with a hashed password.
    ///
    /// # Examples
    /// ```
    /// use service::auth::{AuthService, repository::mock::MockAccountRepository, domain::RegisterInput};
    /// use service::token::TokenCodec;
    /// use std::sync::Arc;
    /// let svc = AuthService::new(Arc::new(MockAccountRepository::default()), TokenCodec::new("secret", 30));
    /// let input = RegisterInput { email: "user@example.com".into(), password: "secret".into(), display_name: "Asha".into(), phone_number: None };
    /// let session = tokio_test::block_on(svc.register(input)).unwrap();
    /// assert_eq!(session.user.email, "user@example.com");
    /// assert!(!session.token.is_empty());
    /// ```
    #[instrument(skip(self, input), fields(email = %input.email))]
    pub async fn register(&self, input: RegisterInput) -> Result<AuthSession, ServiceError> {
        if input.password.is_empty() {
            return Err(ServiceError::Validation("password required".into()));
        }
        models::account::validate_email(&input.email)?;
        models::account::validate_display_name(&input.display_name)?;
        if let Some(existing) = self.repo.find_by_email(&input.email).await? {
            debug!(account_id = %existing.id, "email already registered");
            return Err(ServiceError::Conflict("User already exists with this email".into()));
        }

        let hash = hash_password(input.password).await?;
        let account = self
            .repo
            .create(NewAccount {
                email: input.email,
                password_hash: Some(hash),
                display_name: input.display_name,
                role: Role::Customer,
                phone_number: input.phone_number.filter(|p| !p.trim().is_empty()),
                photo_url: None,
                federated_id: None,
            })
            .await?;
        info!(account_id = %account.id, email = %account.email, "account_registered");
        self.session_for(&account)
    }

    /// Password login. Unknown email, federated-only accounts and wrong
    /// passwords are indistinguishable to the caller.
    #[instrument(skip(self, input), fields(email = %input.email))]
    pub async fn login(&self, input: LoginInput) -> Result<AuthSession, ServiceError> {
        if input.email.trim().is_empty() || input.password.is_empty() {
            return Err(ServiceError::Validation("email and password required".into()));
        }
        let account = self
            .repo
            .find_by_email(&input.email)
            .await?
            .ok_or(ServiceError::InvalidCredentials)?;
        let stored = account.password_hash.clone().ok_or(ServiceError::InvalidCredentials)?;

        if !verify_password(input.password, stored).await? {
            return Err(ServiceError::InvalidCredentials);
        }
        info!(account_id = %account.id, "account_logged_in");
        self.session_for(&account)
    }

    /// Idempotent federated sign-in: the first call for an identity creates the
    /// account, later calls log into it.
    ///
    /// # Examples
    /// ```
    /// use service::auth::{AuthService, repository::mock::MockAccountRepository, domain::FederatedAuthInput};
    /// use service::token::TokenCodec;
    /// use std::sync::Arc;
    /// let svc = AuthService::new(Arc::new(MockAccountRepository::default()), TokenCodec::new("secret", 30));
    /// let input = FederatedAuthInput { email: None, display_name: None, uid: "g-42".into(), photo_url: None };
    /// let first = tokio_test::block_on(svc.federated_auth(input.clone())).unwrap();
    /// let second = tokio_test::block_on(svc.federated_auth(input)).unwrap();
    /// assert!(first.created && !second.created);
    /// assert_eq!(first.session.user.email, "user_g-42@google.com");
    /// ```
    #[instrument(skip(self, input), fields(uid = %input.uid))]
    pub async fn federated_auth(&self, input: FederatedAuthInput) -> Result<FederatedOutcome, ServiceError> {
        let uid = input.uid.trim().to_string();
        if uid.is_empty() {
            return Err(ServiceError::Validation("uid required".into()));
        }
        // provider data is never rejected: unusable values fall back
        let email = input
            .email
            .map(|e| e.trim().to_string())
            .filter(|e| models::account::validate_email(e).is_ok())
            .unwrap_or_else(|| format!("user_{}@google.com", uid));

        if let Some(account) = self.repo.find_by_email(&email).await? {
            let account = if account.federated_id.is_none() {
                info!(account_id = %account.id, "linking federated identity");
                self.repo.link_federated_identity(account.id, &uid, input.photo_url).await?
            } else {
                account
            };
            return Ok(FederatedOutcome { session: self.session_for(&account)?, created: false });
        }

        if let Some(account) = self.repo.find_by_federated_id(&uid).await? {
            return Ok(FederatedOutcome { session: self.session_for(&account)?, created: false });
        }

        let display_name = input
            .display_name
            .map(|n| n.trim().chars().take(models::account::MAX_DISPLAY_NAME_CHARS).collect::<String>())
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| FEDERATED_FALLBACK_NAME.to_string());
        let account = self
            .repo
            .create(NewAccount {
                email,
                password_hash: None,
                display_name,
                role: Role::Customer,
                phone_number: None,
                photo_url: input.photo_url,
                federated_id: Some(uid),
            })
            .await?;
        info!(account_id = %account.id, "federated_account_created");
        Ok(FederatedOutcome { session: self.session_for(&account)?, created: true })
    }

    /// Resolve a bearer token to its account.
    pub async fn current_account(&self, token: &str) -> Result<PublicAccount, ServiceError> {
        let claims = self.tokens.verify(token)?;
        let id = Uuid::parse_str(&claims.sub)
            .map_err(|_| ServiceError::Unauthenticated("token subject is not an account".into()))?;
        let account = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::Unauthenticated("account no longer exists".into()))?;
        Ok(PublicAccount::from(&account))
    }

    fn session_for(&self, account: &Account) -> Result<AuthSession, ServiceError> {
        let token = self.tokens.issue_for_account(account.id)?;
        Ok(AuthSession { token, user: PublicAccount::from(account) })
    }
}

async fn hash_password(password: String) -> Result<String, ServiceError> {
    tokio::task::spawn_blocking(move || {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|h| h.to_string())
            .map_err(|e| ServiceError::Hash(e.to_string()))
    })
    .await
    .map_err(|e| ServiceError::Hash(e.to_string()))?
}

async fn verify_password(password: String, stored: String) -> Result<bool, ServiceError> {
    tokio::task::spawn_blocking(move || {
        let parsed = PasswordHash::new(&stored).map_err(|e| ServiceError::Hash(e.to_string()))?;
        Ok(Argon2::default().verify_password(password.as_bytes(), &parsed).is_ok())
    })
    .await
    .map_err(|e| ServiceError::Hash(e.to_string()))?
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::repository::mock::MockAccountRepository;

    fn svc() -> (AuthService, Arc<MockAccountRepository>) {
        let repo = Arc::new(MockAccountRepository::default());
        (AuthService::new(repo.clone(), TokenCodec::new("test-secret", 30)), repo)
    }

    fn register_input(email: &str) -> RegisterInput {
        RegisterInput { email: email.into(), password: "pw123".into(), display_name: "Asha".into(), phone_number: Some("9999".into()) }
    }

    #[tokio::test]
    async fn register_then_login() {
        let (svc, _) = svc();
        let reg = svc.register(register_input("a@b.com")).await.unwrap();
        assert_eq!(reg.user.role, Role::Customer);
        assert_eq!(reg.user.phone_number.as_deref(), Some("9999"));

        let session = svc.login(LoginInput { email: "a@b.com".into(), password: "pw123".into() }).await.unwrap();
        assert_eq!(session.user.id, reg.user.id);
        let me = svc.current_account(&session.token).await.unwrap();
        assert_eq!(me.email, "a@b.com");
    }

    #[tokio::test]
    async fn duplicate_register_conflicts_without_new_account() {
        let (svc, repo) = svc();
        svc.register(register_input("dup@b.com")).await.unwrap();
        let err = svc.register(register_input("dup@b.com")).await.unwrap_err();
        assert!(matches!(err, ServiceError::Conflict(_)));
        assert_eq!(repo.len(), 1);
    }

    #[tokio::test]
    async fn wrong_password_and_unknown_email_look_alike() {
        let (svc, _) = svc();
        svc.register(register_input("a@b.com")).await.unwrap();
        let wrong = svc.login(LoginInput { email: "a@b.com".into(), password: "nope".into() }).await.unwrap_err();
        let unknown = svc.login(LoginInput { email: "x@b.com".into(), password: "pw123".into() }).await.unwrap_err();
        assert!(matches!(wrong, ServiceError::InvalidCredentials));
        assert!(matches!(unknown, ServiceError::InvalidCredentials));
    }

    #[tokio::test]
    async fn federated_only_account_cannot_password_login() {
        let (svc, _) = svc();
        let input = FederatedAuthInput { email: Some("g@b.com".into()), display_name: Some("G".into()), uid: "uid-1".into(), photo_url: None };
        svc.federated_auth(input).await.unwrap();
        let err = svc.login(LoginInput { email: "g@b.com".into(), password: "anything".into() }).await.unwrap_err();
        assert!(matches!(err, ServiceError::InvalidCredentials));
    }

    #[tokio::test]
    async fn federated_auth_tolerates_odd_provider_data() {
        let (svc, repo) = svc();
        let input = FederatedAuthInput {
            email: Some("phone-only-user".into()),
            display_name: Some("N".repeat(200)),
            uid: "uid-9".into(),
            photo_url: None,
        };
        let first = svc.federated_auth(input.clone()).await.unwrap();
        assert!(first.created);
        assert_eq!(first.session.user.email, "user_uid-9@google.com");
        assert_eq!(first.session.user.display_name.chars().count(), 128);

        let second = svc.federated_auth(input).await.unwrap();
        assert!(!second.created);
        assert_eq!(second.session.user.id, first.session.user.id);
        assert_eq!(repo.len(), 1);
    }

    #[tokio::test]
    async fn federated_auth_is_idempotent() {
        let (svc, repo) = svc();
        let input = FederatedAuthInput { email: Some("g@b.com".into()), display_name: None, uid: "uid-1".into(), photo_url: None };
        let first = svc.federated_auth(input.clone()).await.unwrap();
        let second = svc.federated_auth(input).await.unwrap();
        assert!(first.created);
        assert!(!second.created);
        assert_eq!(first.session.user.id, second.session.user.id);
        assert_eq!(first.session.user.display_name, "Google User");
        assert_eq!(repo.len(), 1);
    }

    #[tokio::test]
    async fn federated_auth_links_existing_password_account() {
        let (svc, repo) = svc();
        let reg = svc.register(register_input("a@b.com")).await.unwrap();
        let input = FederatedAuthInput {
            email: Some("a@b.com".into()),
            display_name: Some("Other".into()),
            uid: "uid-9".into(),
            photo_url: Some("https://photo/x.png".into()),
        };
        let out = svc.federated_auth(input).await.unwrap();
        assert!(!out.created);
        assert_eq!(out.session.user.id, reg.user.id);
        assert_eq!(out.session.user.photo_url.as_deref(), Some("https://photo/x.png"));
        // 仍可用密码登录
        svc.login(LoginInput { email: "a@b.com".into(), password: "pw123".into() }).await.unwrap();
        assert_eq!(repo.len(), 1);
    }

    #[tokio::test]
    async fn federated_auth_requires_uid() {
        let (svc, _) = svc();
        let input = FederatedAuthInput { email: None, display_name: None, uid: "  ".into(), photo_url: None };
        assert!(matches!(svc.federated_auth(input).await.unwrap_err(), ServiceError::Validation(_)));
    }

    #[tokio::test]
    async fn current_account_rejects_foreign_tokens() {
        let (svc, _) = svc();
        assert!(matches!(svc.current_account("garbage").await.unwrap_err(), ServiceError::Unauthenticated(_)));
        let orphan = svc.tokens().issue_for_account(Uuid::new_v4()).unwrap();
        assert!(matches!(svc.current_account(&orphan).await.unwrap_err(), ServiceError::Unauthenticated(_)));
    }

    #[tokio::test]
    async fn public_account_never_serializes_hash() {
        let (svc, _) = svc();
        let reg = svc.register(register_input("a@b.com")).await.unwrap();
        let json = serde_json::to_string(&reg.user).unwrap();
        assert!(!json.contains("argon2"));
        assert!(json.contains("displayName"));
    }
}
