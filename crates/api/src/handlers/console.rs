//! Handlers for the browser console endpoints.
//!
//! The console speaks seconds for intervals; storage and the device speak
//! milliseconds. The conversion happens here and nowhere else.

use axum::extract::State;
use axum::{Form, Json};
use serde::{Deserialize, Serialize};

use terrapin_core::reading::LastReading;
use terrapin_core::settings::{Bounds, PollingConfig};

use crate::error::{AppError, AppResult};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Response of GET /get_bounds_and_settings: the threshold bounds plus the
/// polling intervals in seconds.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoundsAndSettings {
    pub warm_upper: f64,
    pub warm_lower: f64,
    pub cool_upper: f64,
    pub cool_lower: f64,
    pub temp_check_interval: u64,
    pub error_interval: u64,
}

/// Body of POST /save_settings (intervals in seconds).
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveSettingsRequest {
    pub temp_check_interval: Option<String>,
    pub error_interval: Option<String>,
}

/// Body of POST /save_bounds.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveBoundsRequest {
    pub warm_upper: Option<String>,
    pub warm_lower: Option<String>,
    pub cool_upper: Option<String>,
    pub cool_lower: Option<String>,
}

/// Fixed success envelope for the save endpoints.
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
}

const SUCCESS: StatusResponse = StatusResponse { status: "Success" };

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /get_bounds_and_settings
pub async fn get_bounds_and_settings(State(state): State<AppState>) -> Json<BoundsAndSettings> {
    let settings = state.settings.read().await;
    Json(BoundsAndSettings {
        warm_upper: settings.bounds.warm_upper,
        warm_lower: settings.bounds.warm_lower,
        cool_upper: settings.bounds.cool_upper,
        cool_lower: settings.bounds.cool_lower,
        temp_check_interval: settings.polling.temp_check_interval_ms / 1000,
        error_interval: settings.polling.error_interval_ms / 1000,
    })
}

/// GET /get_temperatures
pub async fn get_temperatures(State(state): State<AppState>) -> Json<LastReading> {
    Json(*state.last_reading.read().await)
}

/// POST /save_settings
///
/// Update and persist the device polling intervals.
pub async fn save_settings(
    State(state): State<AppState>,
    Form(body): Form<SaveSettingsRequest>,
) -> AppResult<Json<StatusResponse>> {
    let temp_check_secs: u64 = parse_field(body.temp_check_interval.as_deref())?;
    let error_secs: u64 = parse_field(body.error_interval.as_deref())?;

    let polling = PollingConfig {
        temp_check_interval_ms: temp_check_secs
            .checked_mul(1000)
            .ok_or(AppError::InvalidRequest)?,
        error_interval_ms: error_secs.checked_mul(1000).ok_or(AppError::InvalidRequest)?,
    };
    polling.validate()?;

    // The write lock is held across the save so concurrent saves cannot
    // interleave and the in-memory copy never diverges from disk.
    let mut settings = state.settings.write().await;
    let mut updated = settings.clone();
    updated.polling = polling;
    state.store.save(&updated).await?;
    *settings = updated;

    tracing::info!(
        temp_check_secs,
        error_secs,
        "Saved polling settings"
    );
    Ok(Json(SUCCESS))
}

/// POST /save_bounds
///
/// Update and persist the threshold bounds.
pub async fn save_bounds(
    State(state): State<AppState>,
    Form(body): Form<SaveBoundsRequest>,
) -> AppResult<Json<StatusResponse>> {
    let bounds = Bounds {
        warm_upper: parse_field(body.warm_upper.as_deref())?,
        warm_lower: parse_field(body.warm_lower.as_deref())?,
        cool_upper: parse_field(body.cool_upper.as_deref())?,
        cool_lower: parse_field(body.cool_lower.as_deref())?,
    };
    bounds.validate()?;

    let mut settings = state.settings.write().await;
    let mut updated = settings.clone();
    updated.bounds = bounds;
    state.store.save(&updated).await?;
    *settings = updated;

    tracing::info!("Saved threshold bounds");
    Ok(Json(SUCCESS))
}

/// Parse a required form field; an absent or unparseable value is a
/// client error.
fn parse_field<T: std::str::FromStr>(raw: Option<&str>) -> Result<T, AppError> {
    raw.and_then(|s| s.trim().parse().ok())
        .ok_or(AppError::InvalidRequest)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
