use crate::config::ConfigError;
use crate::telemetry::TelemetryError;
use crate::workflows::tiering::{
    BorrowerImportError, ProviderError, TieringServiceError, UnderwritingError,
};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Io(std::io::Error),
    Server(axum::Error),
    Import(BorrowerImportError),
    Underwriting(UnderwritingError),
    Review(TieringServiceError),
    BatchTooLarge { rows: usize, limit: usize },
    Serialization(serde_json::Error),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Io(err) => write!(f, "io error: {}", err),
            AppError::Server(err) => write!(f, "server error: {}", err),
            AppError::Import(err) => write!(f, "import error: {}", err),
            AppError::Underwriting(err) => write!(f, "underwriting error: {}", err),
            AppError::Review(err) => write!(f, "review error: {}", err),
            AppError::BatchTooLarge { rows, limit } => write!(
                f,
                "borrower export has {} rows, more than the batch limit of {}",
                rows, limit
            ),
            AppError::Serialization(err) => write!(f, "serialization error: {}", err),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Io(err) => Some(err),
            AppError::Server(err) => Some(err),
            AppError::Import(err) => Some(err),
            AppError::Underwriting(err) => Some(err),
            AppError::Review(err) => Some(err),
            AppError::BatchTooLarge { .. } => None,
            AppError::Serialization(err) => Some(err),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::Import(_) => StatusCode::BAD_REQUEST,
            AppError::BatchTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::Underwriting(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Review(TieringServiceError::Underwriting(_)) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            AppError::Review(TieringServiceError::Provider(ProviderError::NotFound)) => {
                StatusCode::NOT_FOUND
            }
            AppError::Config(_)
            | AppError::Telemetry(_)
            | AppError::Io(_)
            | AppError::Server(_)
            | AppError::Serialization(_)
            | AppError::Review(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<axum::Error> for AppError {
    fn from(value: axum::Error) -> Self {
        Self::Server(value)
    }
}

impl From<BorrowerImportError> for AppError {
    fn from(value: BorrowerImportError) -> Self {
        Self::Import(value)
    }
}

impl From<UnderwritingError> for AppError {
    fn from(value: UnderwritingError) -> Self {
        Self::Underwriting(value)
    }
}

impl From<TieringServiceError> for AppError {
    fn from(value: TieringServiceError) -> Self {
        Self::Review(value)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialization(value)
    }
}
