//! Route definitions for the browser console endpoints.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::console;
use crate::state::AppState;

/// Console endpoints.
///
/// ```text
/// GET  /get_bounds_and_settings  -> get_bounds_and_settings
/// GET  /get_temperatures         -> get_temperatures
/// POST /save_settings            -> save_settings
/// POST /save_bounds              -> save_bounds
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/get_bounds_and_settings",
            get(console::get_bounds_and_settings),
        )
        .route("/get_temperatures", get(console::get_temperatures))
        .route("/save_settings", post(console::save_settings))
        .route("/save_bounds", post(console::save_bounds))
}
