pub mod console;
pub mod device;
pub mod health;

use axum::Router;

use crate::state::AppState;

/// Build the full route tree.
///
/// The device firmware's paths are fixed, so everything mounts at the
/// root rather than under a versioned prefix.
///
/// ```text
/// GET  /test                       health check
/// GET  /connect                    device check-in
/// POST /error                      device error report
/// POST /temperature                device temperature report
/// GET  /get_bounds_and_settings    console: current configuration
/// GET  /get_temperatures           console: last reading
/// POST /save_settings              console: update polling intervals
/// POST /save_bounds                console: update threshold bounds
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(health::router())
        .merge(device::router())
        .merge(console::router())
}
