use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use homeloan_core::HomeLoanError;
use serde_json::json;
use thiserror::Error;
use tracing::warn;

use crate::config::ConfigError;
use crate::telemetry::TelemetryError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("telemetry error: {0}")]
    Telemetry(#[from] TelemetryError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Calculation(#[from] HomeLoanError),

    #[error("malformed request: {0}")]
    Request(#[from] JsonRejection),
}

impl AppError {
    fn code(&self) -> &'static str {
        match self {
            AppError::Calculation(err) => err.code(),
            AppError::Request(_) => "InvalidArgument",
            AppError::Config(_) | AppError::Telemetry(_) | AppError::Io(_) => "Internal",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self {
            AppError::Calculation(_) | AppError::Request(_) => StatusCode::BAD_REQUEST,
            AppError::Config(_) | AppError::Telemetry(_) | AppError::Io(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        if status.is_server_error() {
            warn!(error = %self, "request failed");
        }

        let message = match &self {
            AppError::Calculation(HomeLoanError::InvalidArgument { field, reason }) => {
                format!("{field}: {reason}")
            }
            other => other.to_string(),
        };
        let body = Json(json!({ "error": self.code(), "message": message }));
        (status, body).into_response()
    }
}
