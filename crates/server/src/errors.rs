use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use common::ApiEnvelope;
use service::errors::ServiceError;
use tracing::{error, warn};

/// Handler-boundary error: every failure leaves as the JSON envelope.
#[derive(Debug)]
pub struct ApiError(pub ServiceError);

impl ApiError {
    pub fn bad_request(msg: impl Into<String>) -> Self { Self(ServiceError::Validation(msg.into())) }

    pub fn status(&self) -> StatusCode {
        match &self.0 {
            ServiceError::Validation(_)
            | ServiceError::EmptyOrder
            | ServiceError::DishUnavailable(_)
            | ServiceError::Conflict(_) => StatusCode::BAD_REQUEST,
            ServiceError::InvalidCredentials | ServiceError::Unauthenticated(_) | ServiceError::Unauthorized => StatusCode::UNAUTHORIZED,
            ServiceError::Forbidden(_) => StatusCode::FORBIDDEN,
            ServiceError::NotFound(_) | ServiceError::DishNotFound(_) => StatusCode::NOT_FOUND,
            ServiceError::Hash(_) | ServiceError::Token(_) | ServiceError::Repository(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn envelope(&self) -> ApiEnvelope<()> {
        match &self.0 {
            e if e.is_internal() => ApiEnvelope::failure("Server Error", None),
            ServiceError::Validation(m) => ApiEnvelope::failure(m.clone(), None),
            ServiceError::Unauthenticated(detail) => ApiEnvelope::failure("Not authorized, token failed", Some(detail.clone())),
            other => ApiEnvelope::failure(other.to_string(), None),
        }
    }
}

impl From<ServiceError> for ApiError {
    fn from(e: ServiceError) -> Self { Self(e) }
}

impl From<JsonRejection> for ApiError {
    fn from(r: JsonRejection) -> Self { Self::bad_request(r.body_text()) }
}

impl From<QueryRejection> for ApiError {
    fn from(r: QueryRejection) -> Self { Self::bad_request(r.body_text()) }
}

impl From<PathRejection> for ApiError {
    fn from(r: PathRejection) -> Self { Self::bad_request(r.body_text()) }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(code = self.0.code(), error = %self.0, "request failed");
        } else {
            warn!(code = self.0.code(), status = status.as_u16(), error = %self.0, "request rejected");
        }
        (status, Json(self.envelope())).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn taxonomy_to_status() {
        let cases = [
            (ServiceError::Validation("x".into()), 400),
            (ServiceError::EmptyOrder, 400),
            (ServiceError::DishUnavailable("Thali".into()), 400),
            (ServiceError::Conflict("dup".into()), 400),
            (ServiceError::InvalidCredentials, 401),
            (ServiceError::Unauthenticated("expired".into()), 401),
            (ServiceError::Unauthorized, 401),
            (ServiceError::Forbidden("no".into()), 403),
            (ServiceError::DishNotFound(Uuid::nil()), 404),
            (ServiceError::not_found("Order"), 404),
            (ServiceError::Repository("conn reset".into()), 500),
        ];
        for (err, code) in cases {
            assert_eq!(ApiError(err).status().as_u16(), code);
        }
    }

    #[test]
    fn internal_detail_is_hidden() {
        let env = ApiError(ServiceError::Repository("password=hunter2".into())).envelope();
        assert_eq!(env.message.as_deref(), Some("Server Error"));
        assert!(env.error.is_none());
    }
}
