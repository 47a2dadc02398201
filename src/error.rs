use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::error;

use crate::scan::lang::SUPPORTED_LANGUAGES;

/// Message returned for every failed login attempt, regardless of cause.
pub const AUTH_FAILED_MSG: &str = "authentication failed";

/// Error taxonomy for the whole API surface.
///
/// The first six variants are the caller's fault and render with their
/// descriptive message. The remaining variants are internal: they are logged
/// with full detail and the client only ever sees a generic message.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{}", AUTH_FAILED_MSG)]
    AuthenticationFailed,

    #[error("unsupported language code(s): {}. Supported codes are: {}",
        .invalid.join(", "),
        sorted_supported().join(", "))]
    UnsupportedLanguage { invalid: Vec<String> },

    #[error("{0}")]
    MissingInput(String),

    #[error("failed to hash password")]
    Hashing(#[source] anyhow::Error),

    #[error("failed to sign token")]
    Signing(#[source] anyhow::Error),

    #[error("storage backend failure")]
    Persistence(#[source] anyhow::Error),

    #[error("failed to extract text from image")]
    Extraction(#[source] anyhow::Error),
}

/// The supported language codes, sorted ascending for error messages.
fn sorted_supported() -> Vec<&'static str> {
    let mut codes = SUPPORTED_LANGUAGES.to_vec();
    codes.sort_unstable();
    codes
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_)
            | ApiError::UnsupportedLanguage { .. }
            | ApiError::MissingInput(_) => StatusCode::BAD_REQUEST,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::AuthenticationFailed => StatusCode::UNAUTHORIZED,
            ApiError::Hashing(_)
            | ApiError::Signing(_)
            | ApiError::Persistence(_)
            | ApiError::Extraction(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            // Log the cause chain; the client only gets the outer message.
            error!(error = ?self, "internal error");
        }
        let body = Json(json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}
