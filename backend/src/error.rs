//! Error handling for the Produce Freshness Advisor
//!
//! Every failure is reported as `{"error": <message>, "code": <CODE>}`.

use axum::{
    extract::{
        multipart::{MultipartError, MultipartRejection},
        rejection::JsonRejection,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Message returned for uploads that are not an accepted image type
pub const INVALID_FILE_MESSAGE: &str =
    "Invalid file. Please upload an image file (e.g., PNG, JPEG).";

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Request errors
    #[error("No image file provided")]
    MissingImage,

    #[error("Invalid file: {0}")]
    InvalidFileType(String),

    #[error("Malformed multipart request: {0}")]
    Multipart(#[from] MultipartError),

    #[error("Invalid multipart request: {0}")]
    MultipartRejection(#[from] MultipartRejection),

    #[error("Invalid JSON body: {0}")]
    JsonRejection(#[from] JsonRejection),

    #[error("Validation error: {0}")]
    ValidationError(String),

    // Processing errors
    #[error("Image decode error: {0}")]
    ImageDecode(String),

    // External service errors
    #[error("Classifier error: {0}")]
    ClassifierError(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    // Internal errors
    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Error response structure
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: &'static str,
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::MissingImage | AppError::InvalidFileType(_) | AppError::ValidationError(_) => {
                StatusCode::BAD_REQUEST
            }
            AppError::Multipart(err) => err.status(),
            AppError::MultipartRejection(rejection) => rejection.status(),
            AppError::JsonRejection(rejection) => rejection.status(),
            AppError::ImageDecode(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::ClassifierError(_) => StatusCode::BAD_GATEWAY,
            AppError::Configuration(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            AppError::MissingImage => "MISSING_IMAGE",
            AppError::InvalidFileType(_) => "INVALID_FILE",
            AppError::Multipart(err) if err.status() == StatusCode::PAYLOAD_TOO_LARGE => {
                "PAYLOAD_TOO_LARGE"
            }
            AppError::Multipart(_) | AppError::MultipartRejection(_) => "MALFORMED_REQUEST",
            AppError::JsonRejection(_) => "INVALID_JSON",
            AppError::ValidationError(_) => "VALIDATION_ERROR",
            AppError::ImageDecode(_) => "IMAGE_DECODE_ERROR",
            AppError::ClassifierError(_) => "CLASSIFIER_ERROR",
            AppError::Configuration(_) => "CONFIGURATION_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    fn client_message(&self) -> String {
        match self {
            AppError::MissingImage => {
                "No image file provided. Upload the image in the 'image' field.".to_string()
            }
            AppError::InvalidFileType(_) => INVALID_FILE_MESSAGE.to_string(),
            AppError::Multipart(err) => err.body_text(),
            AppError::MultipartRejection(rejection) => rejection.body_text(),
            AppError::JsonRejection(rejection) => rejection.body_text(),
            other => other.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorResponse {
            error: self.client_message(),
            code: self.code(),
        };

        // Log the error for debugging
        if status.is_server_error() {
            tracing::error!("Error: {:?}", self);
        } else {
            tracing::warn!("Rejected request: {}", self);
        }

        (status, Json(body)).into_response()
    }
}

/// Result type alias for handlers
pub type AppResult<T> = Result<T, AppError>;
