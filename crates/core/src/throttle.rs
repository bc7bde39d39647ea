//! Rate limiting for outbound notifications.
//!
//! Two independent minimum-interval gates: one for threshold alerts, one
//! for routine temperature logging. The caller holds the throttle in an
//! `Arc<Mutex<…>>` and passes `now` in, so decisions are deterministic
//! and the only mutation is advancing the two gate timestamps.

use std::time::Duration;

use chrono::{DateTime, Utc};

use crate::evaluate::{evaluate, Reading};
use crate::settings::Bounds;

/// Minimum interval between repeated threshold alerts.
pub const ALERT_INTERVAL: Duration = Duration::from_secs(60);
/// Minimum interval between routine temperature log entries.
pub const LOG_INTERVAL: Duration = Duration::from_secs(30);

/// What the caller should deliver for one report.
#[derive(Debug, Clone, PartialEq)]
pub struct NotifyPlan {
    /// Threshold alert message, present when the alert gate was open and
    /// the reading was out of range.
    pub alert: Option<String>,
    /// Whether to append the reading to the log history.
    pub log: bool,
}

/// Alert/log gate state for the single implicit device.
#[derive(Debug)]
pub struct NotificationThrottle {
    alert_interval: Duration,
    log_interval: Duration,
    last_alert_at: DateTime<Utc>,
    last_log_at: DateTime<Utc>,
}

impl NotificationThrottle {
    /// Throttle with the default intervals. Both gates start closed: the
    /// first alert or log can fire one full interval after `started_at`.
    pub fn new(started_at: DateTime<Utc>) -> Self {
        Self::with_intervals(ALERT_INTERVAL, LOG_INTERVAL, started_at)
    }

    pub fn with_intervals(
        alert_interval: Duration,
        log_interval: Duration,
        started_at: DateTime<Utc>,
    ) -> Self {
        Self {
            alert_interval,
            log_interval,
            last_alert_at: started_at,
            last_log_at: started_at,
        }
    }

    /// Decide what to deliver for `reading` observed at `now`.
    ///
    /// The evaluator runs only when the alert gate is open; a non-empty
    /// result closes the gate again. An alert forces a log entry even when
    /// the log gate has not elapsed, so no out-of-range reading is missing
    /// from the log history.
    pub fn maybe_notify(
        &mut self,
        reading: &Reading,
        bounds: &Bounds,
        now: DateTime<Utc>,
    ) -> NotifyPlan {
        let mut alert = None;
        if gate_open(self.last_alert_at, now, self.alert_interval) {
            let message = evaluate(reading, bounds);
            if !message.is_empty() {
                self.last_alert_at = now;
                alert = Some(message);
            }
        }

        let log = alert.is_some() || gate_open(self.last_log_at, now, self.log_interval);
        if log {
            self.last_log_at = now;
        }

        NotifyPlan { alert, log }
    }
}

fn gate_open(last: DateTime<Utc>, now: DateTime<Utc>, interval: Duration) -> bool {
    let interval = chrono::Duration::from_std(interval).expect("interval fits chrono range");
    now.signed_duration_since(last) >= interval
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
