use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Dish not found")]
    DishNotFound,

    #[error("Invalid dish: {0}")]
    InvalidDish(String),

    #[error("Dish already exists: {0}")]
    DuplicateDish(String),

    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),
}

impl From<redis::RedisError> for AppError {
    fn from(err: redis::RedisError) -> Self {
        AppError::StorageUnavailable(err.to_string())
    }
}

// A document that fails to (de)serialize is a storage-side fault, not a
// client error.
impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::StorageUnavailable(format!("corrupt dish document: {err}"))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self {
            AppError::DishNotFound => StatusCode::NOT_FOUND,
            AppError::InvalidDish { .. } => StatusCode::BAD_REQUEST,
            AppError::DuplicateDish { .. } => StatusCode::CONFLICT,
            AppError::StorageUnavailable { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        };

        (status, Json(json!({ "message": self.to_string() }))).into_response()
    }
}
