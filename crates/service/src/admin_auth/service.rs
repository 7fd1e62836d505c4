use std::time::Duration;

use serde::{Deserialize, Serialize};
use subtle::ConstantTimeEq;
use tracing::{info, instrument, warn};

use super::session::SessionStore;
use super::verifier::{AdminCredentials, AdminIdentity, AdminVerifier, BearerTokenVerifier, SessionVerifier};
use crate::errors::ServiceError;
use crate::token::TokenCodec;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminLoginInput {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Both admin credentials handed out on login: a session id for the cookie
/// and a bearer token for clients that cannot keep cookies.
#[derive(Debug, Clone)]
pub struct AdminLogin {
    pub session_id: String,
    pub token: String,
}

pub struct AdminAuthService {
    email: String,
    password: String,
    session_ttl: Duration,
    codec: TokenCodec,
    sessions: SessionStore,
    verifiers: Vec<Box<dyn AdminVerifier>>,
}

impl AdminAuthService {
    /// Bearer token first, then session; first success wins.
    pub fn new(email: impl Into<String>, password: impl Into<String>, session_ttl: Duration, codec: TokenCodec) -> Self {
        let sessions = SessionStore::new(session_ttl);
        let verifiers: Vec<Box<dyn AdminVerifier>> = vec![
            Box::new(BearerTokenVerifier::new(codec.clone())),
            Box::new(SessionVerifier::new(sessions.clone())),
        ];
        Self { email: email.into(), password: password.into(), session_ttl, codec, sessions, verifiers }
    }

    /// Static comparison against the configured operator credentials.
    ///
    /// # Examples
    /// ```
    /// use service::admin_auth::{AdminAuthService, AdminLoginInput, AdminCredentials};
    /// use service::token::TokenCodec;
    /// use std::time::Duration;
    /// let svc = AdminAuthService::new("admin@kitchen.test", "pw", Duration::from_secs(60), TokenCodec::new("s", 30));
    /// let login = tokio_test::block_on(svc.login(AdminLoginInput { email: "admin@kitchen.test".into(), password: "pw".into() })).unwrap();
    /// let creds = AdminCredentials { bearer: None, session_id: Some(&login.session_id) };
    /// assert!(tokio_test::block_on(svc.authenticate(&creds)).is_ok());
    /// ```
    #[instrument(skip(self, input), fields(email = %input.email))]
    pub async fn login(&self, input: AdminLoginInput) -> Result<AdminLogin, ServiceError> {
        let email_ok = input.email.as_bytes().ct_eq(self.email.as_bytes());
        let password_ok = input.password.as_bytes().ct_eq(self.password.as_bytes());
        if self.email.is_empty() || !bool::from(email_ok & password_ok) {
            warn!("admin login rejected");
            return Err(ServiceError::InvalidCredentials);
        }
        let ttl = chrono::Duration::from_std(self.session_ttl).map_err(|e| ServiceError::Token(e.to_string()))?;
        let token = self.codec.issue_for_admin(&self.email, ttl)?;
        let session_id = self.sessions.create(&self.email).await;
        info!("admin_logged_in");
        Ok(AdminLogin { session_id, token })
    }

    pub async fn logout(&self, session_id: Option<&str>) {
        if let Some(sid) = session_id {
            self.sessions.destroy(sid).await;
        }
        info!("admin_logged_out");
    }

    pub async fn authenticate(&self, creds: &AdminCredentials<'_>) -> Result<AdminIdentity, ServiceError> {
        for verifier in &self.verifiers {
            if let Some(identity) = verifier.verify(creds).await {
                return Ok(identity);
            }
        }
        Err(ServiceError::Unauthorized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::admin_auth::AdminAuthMethod;

    fn svc() -> AdminAuthService {
        AdminAuthService::new("admin@kitchen.test", "pw", Duration::from_secs(60), TokenCodec::new("secret", 30))
    }

    fn good() -> AdminLoginInput { AdminLoginInput { email: "admin@kitchen.test".into(), password: "pw".into() } }

    #[tokio::test]
    async fn wrong_credentials_rejected() {
        let svc = svc();
        let err = svc.login(AdminLoginInput { email: "admin@kitchen.test".into(), password: "x".into() }).await.unwrap_err();
        assert!(matches!(err, ServiceError::InvalidCredentials));
    }

    #[tokio::test]
    async fn near_miss_credentials_rejected() {
        let svc = svc();
        for (email, password) in [
            ("admin@kitchen.test", "p"),
            ("admin@kitchen.test", "pw "),
            ("admin@kitchen.tes", "pw"),
            ("ADMIN@kitchen.test", "pw"),
        ] {
            let err = svc.login(AdminLoginInput { email: email.into(), password: password.into() }).await.unwrap_err();
            assert!(matches!(err, ServiceError::InvalidCredentials), "{}/{}", email, password);
        }
        assert!(svc.login(good()).await.is_ok());
    }

    #[tokio::test]
    async fn token_wins_over_session() {
        let svc = svc();
        let login = svc.login(good()).await.unwrap();
        let creds = AdminCredentials { bearer: Some(&login.token), session_id: Some(&login.session_id) };
        assert_eq!(svc.authenticate(&creds).await.unwrap().method, AdminAuthMethod::Token);
    }

    #[tokio::test]
    async fn bad_token_falls_through_to_session() {
        let svc = svc();
        let login = svc.login(good()).await.unwrap();
        let creds = AdminCredentials { bearer: Some("garbage"), session_id: Some(&login.session_id) };
        assert_eq!(svc.authenticate(&creds).await.unwrap().method, AdminAuthMethod::Session);
    }

    #[tokio::test]
    async fn logout_kills_session_only() {
        let svc = svc();
        let login = svc.login(good()).await.unwrap();
        svc.logout(Some(&login.session_id)).await;
        let by_session = AdminCredentials { bearer: None, session_id: Some(&login.session_id) };
        assert!(matches!(svc.authenticate(&by_session).await.unwrap_err(), ServiceError::Unauthorized));
        // 令牌无状态，注销后仍有效直到过期
        let by_token = AdminCredentials { bearer: Some(&login.token), session_id: None };
        assert!(svc.authenticate(&by_token).await.is_ok());
    }

    #[tokio::test]
    async fn nothing_presented_is_unauthorized() {
        let err = svc().authenticate(&AdminCredentials::default()).await.unwrap_err();
        assert!(matches!(err, ServiceError::Unauthorized));
    }

    #[tokio::test]
    async fn unconfigured_admin_never_logs_in() {
        let svc = AdminAuthService::new("", "", Duration::from_secs(60), TokenCodec::new("s", 30));
        let err = svc.login(AdminLoginInput { email: String::new(), password: String::new() }).await.unwrap_err();
        assert!(matches!(err, ServiceError::InvalidCredentials));
    }
}
