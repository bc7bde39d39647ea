use std::sync::Arc;

use tokio::sync::{Mutex, RwLock};

use terrapin_core::reading::LastReading;
use terrapin_core::settings::{Settings, SettingsStore};
use terrapin_core::throttle::NotificationThrottle;
use terrapin_notify::Notifier;

use crate::config::ServerConfig;
use crate::watchdog::Watchdog;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Durable settings record on disk.
    pub store: Arc<SettingsStore>,
    /// In-memory copy of the persisted settings; replaced after each
    /// successful save.
    pub settings: Arc<RwLock<Settings>>,
    /// Most recent valid temperature report.
    pub last_reading: Arc<RwLock<LastReading>>,
    /// Alert/log rate-limit gates.
    pub throttle: Arc<Mutex<NotificationThrottle>>,
    /// Device liveness deadline.
    pub watchdog: Arc<Watchdog>,
    /// Outbound webhook gateway.
    pub notifier: Notifier,
}
