// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application error types with consistent API responses.

use crate::services::{AnalysisError, CaptureError, GeocodingError};
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Application error type that converts to HTTP responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error(transparent)]
    Analysis(#[from] AnalysisError),

    #[error(transparent)]
    Geocoding(#[from] GeocodingError),
}

impl From<CaptureError> for AppError {
    fn from(err: CaptureError) -> Self {
        match err {
            CaptureError::NotFound(_) => AppError::NotFound(err.to_string()),
            CaptureError::GeometryMismatch { .. } => AppError::BadRequest(err.to_string()),
        }
    }
}

/// JSON error response body
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl AppError {
    /// HTTP status and stable error code for this error.
    pub fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, "not_found"),
            AppError::BadRequest(_) => (StatusCode::BAD_REQUEST, "bad_request"),
            AppError::Analysis(err) => match err {
                AnalysisError::NoShape => (StatusCode::BAD_REQUEST, "no_shape"),
                AnalysisError::ShapeGone(_) => (StatusCode::NOT_FOUND, "not_found"),
                AnalysisError::ServerReported(_) => (StatusCode::BAD_GATEWAY, "analysis_error"),
                AnalysisError::Transport(_) => (StatusCode::BAD_GATEWAY, "analysis_unavailable"),
                AnalysisError::InvalidResponse(_) => {
                    (StatusCode::BAD_GATEWAY, "analysis_invalid_response")
                }
            },
            AppError::Geocoding(_) => (StatusCode::BAD_GATEWAY, "geocoding_error"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error) = self.status_and_code();

        let details = match &self {
            AppError::NotFound(msg) | AppError::BadRequest(msg) => Some(msg.clone()),
            // Shown to the user as-is
            AppError::Analysis(err) => Some(err.to_string()),
            AppError::Geocoding(err) => {
                tracing::warn!(error = %err, "Geocoding failed");
                None
            }
        };

        let body = ErrorResponse {
            error: error.to_string(),
            details,
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for handlers
pub type Result<T> = std::result::Result<T, AppError>;
