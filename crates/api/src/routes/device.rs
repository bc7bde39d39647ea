//! Route definitions for device-facing endpoints.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::device;
use crate::state::AppState;

/// Device endpoints.
///
/// ```text
/// GET  /connect      -> connect
/// POST /error        -> report_error
/// POST /temperature  -> report_temperature
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/connect", get(device::connect))
        .route("/error", post(device::report_error))
        .route("/temperature", post(device::report_temperature))
}
