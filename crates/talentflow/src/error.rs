use crate::config::ConfigError;
use crate::telemetry::TelemetryError;
use crate::workflows::documents::DocumentError;
use crate::workflows::pipeline::service::PipelineError;
use crate::workflows::pipeline::TrackerImportError;
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
    Pipeline(PipelineError),
    Document(DocumentError),
    Import(TrackerImportError),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Io(err) => write!(f, "io error: {}", err),
            AppError::Server(err) => write!(f, "server error: {}", err),
            AppError::Pipeline(err) => write!(f, "pipeline error: {}", err),
            AppError::Document(err) => write!(f, "document error: {}", err),
            AppError::Import(err) => write!(f, "import error: {}", err),
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
            AppError::Pipeline(err) => Some(err),
            AppError::Document(err) => Some(err),
            AppError::Import(err) => Some(err),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self {
            AppError::Pipeline(_) | AppError::Document(_) | AppError::Import(_) => {
                StatusCode::BAD_REQUEST
            }
            AppError::Config(_)
            | AppError::Telemetry(_)
            | AppError::Io(_)
            | AppError::Server(_) => StatusCode::INTERNAL_SERVER_ERROR,
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

impl From<PipelineError> for AppError {
    fn from(value: PipelineError) -> Self {
        Self::Pipeline(value)
    }
}

impl From<DocumentError> for AppError {
    fn from(value: DocumentError) -> Self {
        Self::Document(value)
    }
}

impl From<TrackerImportError> for AppError {
    fn from(value: TrackerImportError) -> Self {
        Self::Import(value)
    }
}
