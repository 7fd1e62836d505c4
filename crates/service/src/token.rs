//! Bearer token codec (HS256 JWT).
//!
//! Tokens are stateless: verification checks signature and expiry only.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header as JwtHeader, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::ServiceError;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Claims {
    /// Account id for customers, admin email for admin tokens
    pub sub: String,
    pub exp: usize,
    pub iat: usize,
    #[serde(default)]
    pub admin: bool,
}

#[derive(Clone)]
pub struct TokenCodec {
    secret: String,
    ttl: Duration,
}

impl TokenCodec {
    pub fn new(secret: impl Into<String>, ttl_days: i64) -> Self {
        Self { secret: secret.into(), ttl: Duration::days(ttl_days) }
    }

    /// Customer token carrying only the account id.
    pub fn issue_for_account(&self, account_id: Uuid) -> Result<String, ServiceError> {
        self.issue(account_id.to_string(), false, self.ttl)
    }

    /// Admin token; the admin flag lets guards skip any database lookup.
    pub fn issue_for_admin(&self, email: &str, ttl: Duration) -> Result<String, ServiceError> {
        self.issue(email.to_string(), true, ttl)
    }

    fn issue(&self, sub: String, admin: bool, ttl: Duration) -> Result<String, ServiceError> {
        let now = Utc::now();
        let claims = Claims {
            sub,
            iat: now.timestamp() as usize,
            exp: (now + ttl).timestamp() as usize,
            admin,
        };
        encode(&JwtHeader::default(), &claims, &EncodingKey::from_secret(self.secret.as_bytes()))
            .map_err(|e| ServiceError::Token(e.to_string()))
    }

    pub fn verify(&self, token: &str) -> Result<Claims, ServiceError> {
        let key = DecodingKey::from_secret(self.secret.as_bytes());
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        decode::<Claims>(token, &key, &validation)
            .map(|data| data.claims)
            .map_err(|e| ServiceError::Unauthenticated(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn account_token_roundtrip() {
        let codec = TokenCodec::new("secret", 30);
        let id = Uuid::new_v4();
        let token = codec.issue_for_account(id).unwrap();
        let claims = codec.verify(&token).unwrap();
        assert_eq!(claims.sub, id.to_string());
        assert!(!claims.admin);
        // 30 天有效期
        assert_eq!(claims.exp - claims.iat, 30 * 24 * 3600);
    }

    #[test]
    fn wrong_secret_rejected() {
        let token = TokenCodec::new("secret", 30).issue_for_account(Uuid::new_v4()).unwrap();
        let err = TokenCodec::new("other", 30).verify(&token).unwrap_err();
        assert!(matches!(err, ServiceError::Unauthenticated(_)));
    }

    #[test]
    fn expired_token_rejected() {
        let codec = TokenCodec::new("secret", 30);
        let token = codec.issue("u".into(), false, Duration::minutes(-10)).unwrap();
        assert!(codec.verify(&token).is_err());
    }

    #[test]
    fn admin_flag_survives() {
        let codec = TokenCodec::new("secret", 30);
        let token = codec.issue_for_admin("admin@kitchen.test", Duration::hours(24)).unwrap();
        let claims = codec.verify(&token).unwrap();
        assert!(claims.admin);
        assert_eq!(claims.sub, "admin@kitchen.test");
    }
}
