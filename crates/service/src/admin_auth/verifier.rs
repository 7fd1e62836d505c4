use async_trait::async_trait;

use super::session::SessionStore;
use crate::token::TokenCodec;

/// Raw admin credentials pulled off a request.
#[derive(Debug, Clone, Copy, Default)]
pub struct AdminCredentials<'a> {
    pub bearer: Option<&'a str>,
    pub session_id: Option<&'a str>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminAuthMethod {
    Token,
    Session,
}

/// An authenticated admin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminIdentity {
    pub email: String,
    pub method: AdminAuthMethod,
}

/// One way of proving admin identity. `None` means "not mine / not valid",
/// letting the next strategy try.
#[async_trait]
pub trait AdminVerifier: Send + Sync {
    async fn verify(&self, creds: &AdminCredentials<'_>) -> Option<AdminIdentity>;
}

/// Bearer token whose payload carries the admin flag; no database lookup.
pub struct BearerTokenVerifier {
    codec: TokenCodec,
}

impl BearerTokenVerifier {
    pub fn new(codec: TokenCodec) -> Self { Self { codec } }
}

#[async_trait]
impl AdminVerifier for BearerTokenVerifier {
    async fn verify(&self, creds: &AdminCredentials<'_>) -> Option<AdminIdentity> {
        let token = creds.bearer?;
        match self.codec.verify(token) {
            Ok(claims) if claims.admin => Some(AdminIdentity { email: claims.sub, method: AdminAuthMethod::Token }),
            Ok(_) => None,
            Err(e) => {
                tracing::debug!(error = %e, "admin bearer token rejected");
                None
            }
        }
    }
}

/// Server-side session set by a prior admin login.
pub struct SessionVerifier {
    store: SessionStore,
}

impl SessionVerifier {
    pub fn new(store: SessionStore) -> Self { Self { store } }
}

#[async_trait]
impl AdminVerifier for SessionVerifier {
    async fn verify(&self, creds: &AdminCredentials<'_>) -> Option<AdminIdentity> {
        let sid = creds.session_id?;
        self.store
            .get(sid)
            .await
            .map(|s| AdminIdentity { email: s.email, method: AdminAuthMethod::Session })
    }
}
