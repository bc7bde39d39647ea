use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use terrapin_core::error::CoreError;
use terrapin_core::settings::SettingsError;

/// Fixed body for all 400 responses. The device firmware and the browser
/// console both match on this exact message.
const INVALID_REQUEST_MESSAGE: &str = "You have made an invalid request";

/// Fixed body for all 500 responses.
const INTERNAL_ERROR_MESSAGE: &str = "An internal error occurred";

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and [`SettingsError`] for
/// persistence failures. Implements [`IntoResponse`] to produce the
/// service's fixed JSON error bodies.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `terrapin-core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Settings persistence failed.
    #[error(transparent)]
    Settings(#[from] SettingsError),

    /// A malformed or incomplete request body.
    #[error("Invalid request")]
    InvalidRequest,
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::Core(CoreError::Validation(msg)) => {
                tracing::debug!(reason = %msg, "Rejected invalid request");
                (StatusCode::BAD_REQUEST, INVALID_REQUEST_MESSAGE)
            }
            AppError::Settings(err) => {
                tracing::error!(error = %err, "Settings persistence failed");
                (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR_MESSAGE)
            }
            AppError::InvalidRequest => (StatusCode::BAD_REQUEST, INVALID_REQUEST_MESSAGE),
        };

        let body = json!({ "error": message });

        (status, axum::Json(body)).into_response()
    }
}
