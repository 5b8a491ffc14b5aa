//! Error handling for the Agri Planting Advisor
//!
//! Data-quality problems (unknown crop in the recommendation path,
//! missing rules, empty forecasts) are absorbed into `unknown`
//! recommendations and never reach this module; only request-level
//! failures surface here.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Client errors
    #[error("Unknown crop: {0}")]
    UnknownCrop(String),

    #[error("Validation error: {message}")]
    Validation { field: String, message: String },

    // External service errors
    #[error("Weather service unavailable: {0}")]
    WeatherServiceUnavailable(String),

    #[error("Geolocation service unavailable: {0}")]
    GeolocationUnavailable(String),

    // Internal errors
    #[error("Internal server error")]
    InternalError(#[from] anyhow::Error),
}

/// Error response structure
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_detail) = match &self {
            AppError::UnknownCrop(crop_id) => (
                StatusCode::BAD_REQUEST,
                ErrorDetail {
                    code: "UNKNOWN_CROP".to_string(),
                    message: format!("Unknown crop: {}", crop_id),
                    field: Some("crop_type".to_string()),
                },
            ),
            AppError::Validation { field, message } => (
                StatusCode::BAD_REQUEST,
                ErrorDetail {
                    code: "VALIDATION_ERROR".to_string(),
                    message: message.clone(),
                    field: Some(field.clone()),
                },
            ),
            AppError::WeatherServiceUnavailable(msg) => (
                StatusCode::SERVICE_UNAVAILABLE,
                ErrorDetail {
                    code: "WEATHER_SERVICE_UNAVAILABLE".to_string(),
                    message: format!("Weather service unavailable: {}", msg),
                    field: None,
                },
            ),
            AppError::GeolocationUnavailable(msg) => (
                StatusCode::SERVICE_UNAVAILABLE,
                ErrorDetail {
                    code: "GEOLOCATION_UNAVAILABLE".to_string(),
                    message: format!("Geolocation service unavailable: {}", msg),
                    field: None,
                },
            ),
            AppError::InternalError(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorDetail {
                    code: "INTERNAL_ERROR".to_string(),
                    message: "An internal server error occurred".to_string(),
                    field: None,
                },
            ),
        };

        // Log the error for debugging
        tracing::error!("Error: {:?}", self);

        (status, Json(ErrorResponse { error: error_detail })).into_response()
    }
}

/// Result type alias for handlers
pub type AppResult<T> = Result<T, AppError>;
