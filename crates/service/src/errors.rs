use thiserror::Error;
use uuid::Uuid;

/// Business errors shared by every service in this crate.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("No items in order")]
    EmptyOrder,
    #[error("Dish not found: {0}")]
    DishNotFound(Uuid),
    #[error("Dish not available: {0}")]
    DishUnavailable(String),
    #[error("{0}")]
    Conflict(String),
    #[error("Invalid email or password")]
    InvalidCredentials,
    #[error("not authenticated: {0}")]
    Unauthenticated(String),
    #[error("Unauthorized: Admin session expired or not found")]
    Unauthorized,
    #[error("{0}")]
    Forbidden(String),
    #[error("{0}")]
    NotFound(String),
    #[error("hashing error: {0}")]
    Hash(String),
    #[error("token error: {0}")]
    Token(String),
    #[error("repository error: {0}")]
    Repository(String),
}

impl ServiceError {
    pub fn not_found(entity: &str) -> Self { Self::NotFound(format!("{} not found", entity)) }

    /// Stable numeric code for external mapping/logging
    pub fn code(&self) -> u16 {
        match self {
            ServiceError::Validation(_) => 1001,
            ServiceError::Conflict(_) => 1002,
            ServiceError::NotFound(_) => 1003,
            ServiceError::InvalidCredentials => 1004,
            ServiceError::Unauthenticated(_) => 1005,
            ServiceError::Unauthorized => 1006,
            ServiceError::Forbidden(_) => 1007,
            ServiceError::EmptyOrder => 2001,
            ServiceError::DishNotFound(_) => 2002,
            ServiceError::DishUnavailable(_) => 2003,
            ServiceError::Hash(_) => 1101,
            ServiceError::Token(_) => 1102,
            ServiceError::Repository(_) => 1200,
        }
    }

    /// Internal failures (store, hashing, signing) rather than caller mistakes.
    pub fn is_internal(&self) -> bool {
        matches!(self, ServiceError::Hash(_) | ServiceError::Token(_) | ServiceError::Repository(_))
    }
}

impl From<models::errors::ModelError> for ServiceError {
    fn from(e: models::errors::ModelError) -> Self {
        use models::errors::ModelError;
        match e {
            ModelError::Validation(m) => ServiceError::Validation(m),
            ModelError::Conflict(m) => ServiceError::Conflict(m),
            ModelError::Db(m) => ServiceError::Repository(m),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use models::errors::ModelError;

    #[test]
    fn model_errors_map_to_taxonomy() {
        assert!(matches!(ServiceError::from(ModelError::Conflict("dup".into())), ServiceError::Conflict(_)));
        assert!(matches!(ServiceError::from(ModelError::Db("down".into())), ServiceError::Repository(_)));
        assert!(ServiceError::Repository("x".into()).is_internal());
        assert!(!ServiceError::EmptyOrder.is_internal());
    }
}
