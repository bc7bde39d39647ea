use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderName, Method, Request, Response, StatusCode};
use axum::Router;
use chrono::Utc;
use http_body_util::BodyExt;
use tokio::sync::{Mutex, RwLock};
use tower::ServiceExt;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use terrapin_api::config::ServerConfig;
use terrapin_api::routes;
use terrapin_api::state::AppState;
use terrapin_api::watchdog::{Watchdog, DEVICE_SILENT_MESSAGE};
use terrapin_core::reading::LastReading;
use terrapin_core::settings::SettingsStore;
use terrapin_core::throttle::NotificationThrottle;
use terrapin_notify::{events, Notifier};

/// Build a test `ServerConfig` rooted in `dir`.
///
/// The webhook points at a local port nothing listens on: deliveries fail
/// fast and are logged and swallowed, which is exactly the production
/// contract the tests rely on.
pub fn test_config(dir: &Path) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        settings_path: dir.join("settings.json"),
        webhook_base_url: "http://127.0.0.1:9/trigger".to_string(),
        webhook_key: "test-key".to_string(),
        device_timeout_secs: 50,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
    }
}

/// Build the full application router with all middleware layers, backed by
/// a settings file under `dir`.
///
/// This mirrors the router construction in `main.rs` so integration tests
/// exercise the same middleware stack that production uses. Building a
/// second app over the same `dir` simulates a restart: persisted settings
/// are reloaded from disk.
pub async fn build_test_app(dir: &Path) -> Router {
    let config = test_config(dir);

    let store = Arc::new(SettingsStore::new(&config.settings_path));
    let settings = store
        .load()
        .await
        .expect("settings file must be readable")
        .unwrap_or_default();

    let notifier = Notifier::new(config.webhook_base_url.clone(), config.webhook_key.clone());
    let silent_notifier = notifier.clone();
    let watchdog = Arc::new(Watchdog::new(
        Duration::from_secs(config.device_timeout_secs),
        move || silent_notifier.notify(events::NOTIFY, DEVICE_SILENT_MESSAGE, None),
    ));

    let state = AppState {
        config: Arc::new(config),
        store,
        settings: Arc::new(RwLock::new(settings)),
        last_reading: Arc::new(RwLock::new(LastReading::default())),
        throttle: Arc::new(Mutex::new(NotificationThrottle::new(Utc::now()))),
        watchdog,
        notifier,
    };

    let cors = CorsLayer::new()
        .allow_origin(["http://localhost:5173".parse().unwrap()])
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(3600));

    let request_id_header = HeaderName::from_static("x-request-id");

    Router::new()
        .merge(routes::api_routes())
        .layer(CatchPanicLayer::new())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(30),
        ))
        .layer(PropagateRequestIdLayer::new(request_id_header.clone()))
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::new(request_id_header, MakeRequestUuid))
        .layer(cors)
        .with_state(state)
}

/// Issue a GET request against the app.
pub async fn get(app: Router, uri: &str) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .uri(uri)
            .body(Body::empty())
            .expect("request must build"),
    )
    .await
    .expect("request must not fail")
}

/// POST an `application/x-www-form-urlencoded` body against the app.
pub async fn post_form(app: Router, uri: &str, body: &str) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body.to_string()))
            .expect("request must build"),
    )
    .await
    .expect("request must not fail")
}

/// Decode a response body as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body must collect")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body must be JSON")
}

/// Decode a response body as plain text.
pub async fn body_text(response: Response<Body>) -> String {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body must collect")
        .to_bytes();
    String::from_utf8(bytes.to_vec()).expect("body must be UTF-8")
}
