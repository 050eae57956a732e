use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Distance lookup failed: {0}")]
    ExternalLookup(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Get a sanitized error message safe for logging
    /// Filters out potentially sensitive information
    pub fn log_safe(&self) -> String {
        match self {
            Error::InvalidUrl(_) => "Invalid URL provided".to_string(),

            Error::ExternalLookup(msg) | Error::Internal(msg) => {
                let lower = msg.to_lowercase();
                if lower.contains("key") || lower.contains("token") || lower.contains("secret") {
                    "Distance lookup failed (details redacted)".to_string()
                } else {
                    self.to_string()
                }
            }

            // These errors are generally safe to log as-is
            Error::Io(_)
            | Error::Csv(_)
            | Error::Parse(_)
            | Error::Config(_)
            | Error::Validation(_) => self.to_string(),
        }
    }

    /// HTTP status this error maps to at the request boundary
    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::Validation(_) => StatusCode::BAD_REQUEST,
            Error::ExternalLookup(_) => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

// Implement IntoResponse for API error handling
impl IntoResponse for Error {
    fn into_response(self) -> Response {
        tracing::error!("Request error: {}", self.log_safe());

        let status = self.status_code();
        let error_message = match &self {
            Error::Validation(msg) => msg.clone(),
            Error::ExternalLookup(_) => "Distance lookup failed".to_string(),
            _ => "Internal server error".to_string(),
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}
