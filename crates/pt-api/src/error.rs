use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// API error taxonomy.
///
/// `NotFound` and `InvalidArgument` are detected synchronously inside the
/// operations and map to distinct, user-actionable responses. Everything
/// else surfaces as a generic failure; internal detail goes to the log,
/// never to the client.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    InvalidArgument(String),
    #[error("{0}")]
    Conflict(String),
    #[error("{0}")]
    Auth(String),
    #[error("JWT error: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),
    #[error("password hashing error: {0}")]
    Bcrypt(#[from] bcrypt::BcryptError),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            Self::InvalidArgument(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            Self::Conflict(msg) => (StatusCode::CONFLICT, msg.clone()),
            Self::Auth(msg) => (StatusCode::UNAUTHORIZED, msg.clone()),
            Self::Jwt(_) => (
                StatusCode::UNAUTHORIZED,
                "Invalid or expired token".to_string(),
            ),
            Self::Bcrypt(_) | Self::Database(_) => {
                tracing::error!("internal error: {self}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_taxonomy_to_status_codes() {
        let cases = [
            (
                ApiError::NotFound("Topic not found".to_string()),
                StatusCode::NOT_FOUND,
            ),
            (
                ApiError::InvalidArgument("Invalid subtopic index".to_string()),
                StatusCode::BAD_REQUEST,
            ),
            (
                ApiError::Conflict("duplicate".to_string()),
                StatusCode::CONFLICT,
            ),
            (
                ApiError::Auth("Not authenticated".to_string()),
                StatusCode::UNAUTHORIZED,
            ),
            (
                ApiError::Database(sqlx::Error::PoolClosed),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (error, expected) in cases {
            assert_eq!(error.into_response().status(), expected);
        }
    }
}
