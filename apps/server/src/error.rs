use std::io::Error as IoError;

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use serde_json::json;
use thiserror::Error;
use uppe_service::{ConfigError, MonitorError};

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0:#}")]
    Io(#[from] IoError),
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("Failed to start monitor: {0:#}")]
    Startup(#[from] anyhow::Error),
}

/// Errors returned to API clients as `{"error": "..."}`
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Validation(#[from] MonitorError),
    #[error("Invalid request")]
    InvalidRequest,
    #[error("ID is required")]
    MissingId,
    #[error("Endpoint not found")]
    NotFound,
    #[error("A check is already running")]
    SweepInProgress,
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::InvalidRequest | ApiError::MissingId => {
                StatusCode::BAD_REQUEST
            }
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::SweepInProgress => StatusCode::CONFLICT,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(json!({ "error": self.to_string() }))
    }
}
