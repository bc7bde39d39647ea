//! Handlers for device-facing endpoints.
//!
//! The firmware posts `application/x-www-form-urlencoded` bodies of
//! numeric strings and expects its polling intervals back on every
//! interaction, valid or not. Every interaction also rearms the liveness
//! watchdog before the body is validated: a malformed report still proves
//! the device is alive.

use axum::extract::State;
use axum::{Form, Json};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use terrapin_core::evaluate::Reading;
use terrapin_core::reading::LastReading;
use terrapin_core::settings::PollingConfig;
use terrapin_notify::events;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Notification sent when the device checks in.
const CONNECTED_MESSAGE: &str = "Temperature sensor connected";

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Intervals payload in the firmware's wire format (milliseconds).
#[derive(Debug, Serialize)]
pub struct DeviceIntervals {
    #[serde(rename = "TEMP_CHECK_INTERVAL")]
    pub temp_check_interval_ms: u64,
    #[serde(rename = "ERROR_INTERVAL")]
    pub error_interval_ms: u64,
}

impl From<&PollingConfig> for DeviceIntervals {
    fn from(polling: &PollingConfig) -> Self {
        Self {
            temp_check_interval_ms: polling.temp_check_interval_ms,
            error_interval_ms: polling.error_interval_ms,
        }
    }
}

/// Body of POST /error.
#[derive(Debug, Deserialize)]
pub struct ErrorReport {
    #[serde(rename = "errorType")]
    pub error_type: Option<String>,
}

/// Body of POST /temperature.
#[derive(Debug, Deserialize)]
pub struct TemperatureReport {
    #[serde(rename = "warmTemp")]
    pub warm_temp: Option<String>,
    #[serde(rename = "coolTemp")]
    pub cool_temp: Option<String>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /connect
///
/// Device check-in after (re)connecting to the network.
pub async fn connect(State(state): State<AppState>) -> Json<DeviceIntervals> {
    state.watchdog.rearm().await;
    tracing::info!("Device connected");
    state.notifier.notify(events::NOTIFY, CONNECTED_MESSAGE, None);
    device_intervals(&state).await
}

/// POST /error
///
/// Device-side error report (sensor fault, dropped wifi, etc.).
pub async fn report_error(
    State(state): State<AppState>,
    Form(body): Form<ErrorReport>,
) -> AppResult<Json<DeviceIntervals>> {
    state.watchdog.rearm().await;

    let error_type = body
        .error_type
        .filter(|t| !t.is_empty())
        .ok_or(AppError::InvalidRequest)?;
    tracing::warn!(error_type = %error_type, "Device reported an error");
    state.notifier.notify(
        events::NOTIFY,
        format!("A {error_type} error has occurred"),
        None,
    );

    Ok(device_intervals(&state).await)
}

/// POST /temperature
///
/// Periodic temperature report: stores the reading and runs the throttled
/// threshold evaluation.
pub async fn report_temperature(
    State(state): State<AppState>,
    Form(body): Form<TemperatureReport>,
) -> AppResult<Json<DeviceIntervals>> {
    state.watchdog.rearm().await;

    let (Some(warm), Some(cool)) = (
        parse_probe(body.warm_temp.as_deref()),
        parse_probe(body.cool_temp.as_deref()),
    ) else {
        return Err(AppError::InvalidRequest);
    };
    let reading = Reading { warm, cool };
    let now = Utc::now();
    tracing::info!(warm, cool, "Temperature report");

    *state.last_reading.write().await = LastReading::observe(&reading, now.timestamp_millis());

    let bounds = state.settings.read().await.bounds.clone();
    let plan = state
        .throttle
        .lock()
        .await
        .maybe_notify(&reading, &bounds, now);

    if let Some(message) = plan.alert {
        state.notifier.notify(events::NOTIFY, message, None);
    }
    if plan.log {
        state.notifier.notify(events::TEMP_LOG, warm, Some(cool.into()));
    }

    Ok(device_intervals(&state).await)
}

/// Parse one probe value from the form body.
///
/// A field that is absent, not a number, or exactly zero counts as
/// missing — zero is the firmware's power-on placeholder, not a reading.
fn parse_probe(raw: Option<&str>) -> Option<f64> {
    let value: f64 = raw?.trim().parse().ok()?;
    (value != 0.0).then_some(value)
}

async fn device_intervals(state: &AppState) -> Json<DeviceIntervals> {
    let settings = state.settings.read().await;
    Json(DeviceIntervals::from(&settings.polling))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
