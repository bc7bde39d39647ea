use axum::routing::get;
use axum::Router;

use crate::state::AppState;

/// GET /test -- plaintext liveness probe for the hosting platform.
async fn test() -> &'static str {
    "success"
}

/// Mount the health check route.
pub fn router() -> Router<AppState> {
    Router::new().route("/test", get(test))
}
