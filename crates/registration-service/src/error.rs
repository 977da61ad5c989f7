//! Service errors and their HTTP mapping

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Registration cache error: {0}")]
    Cache(#[from] redis::RedisError),

    #[error("Registration error: {0}")]
    Registration(#[from] beacon_registration::Error),

    #[error("Backend API request failed: {0}")]
    Upstream(#[from] reqwest::Error),

    #[error("Backend API rejected the registration with status {0}")]
    Rejected(reqwest::StatusCode),
}

pub type Result<T> = std::result::Result<T, ServiceError>;

/// API Error type
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: message.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = serde_json::json!({
            "error": self.message
        });

        (self.status, Json(body)).into_response()
    }
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        tracing::error!("Request failed: {}", err);
        ApiError {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: err.to_string(),
        }
    }
}
