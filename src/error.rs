use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::error;

use crate::db::DbError;
use crate::jsonapi::ValidateError;

/// HTTP error taxonomy. Every variant renders as the single body shape
/// `{"errors":{"detail":"<message>"}}` with its status code; nothing else
/// leaks to the client.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Conflict(String),
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn bad_request() -> Self {
        ApiError::BadRequest("Bad Request".to_string())
    }
}

impl From<ValidateError> for ApiError {
    fn from(_: ValidateError) -> Self {
        ApiError::bad_request()
    }
}

impl From<DbError> for ApiError {
    fn from(e: DbError) -> Self {
        match e {
            DbError::NotFound(detail) => ApiError::NotFound(detail),
            DbError::AlreadyExists(detail) => ApiError::Conflict(detail),
            DbError::Sqlx(e) => {
                error!("Database error: {}", e);
                ApiError::Internal("Internal Server Error".to_string())
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let body = json!({"errors": {"detail": self.to_string()}});
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_db_not_found_maps_to_404_detail() {
        let e = ApiError::from(DbError::NotFound("No MovieRating for Movie ID 9".to_string()));
        assert_eq!(e.to_string(), "No MovieRating for Movie ID 9");
        assert!(matches!(e, ApiError::NotFound(_)));
    }

    #[test]
    fn test_db_conflict_maps_to_409_detail() {
        let e = ApiError::from(DbError::AlreadyExists(
            "MovieRating already exists for Movie ID 1".to_string(),
        ));
        assert!(matches!(e, ApiError::Conflict(_)));
    }

    #[test]
    fn test_internal_error_hides_cause() {
        let e = ApiError::from(DbError::Sqlx(sqlx::Error::PoolClosed));
        assert_eq!(e.to_string(), "Internal Server Error");
    }
}
