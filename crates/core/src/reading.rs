//! Snapshot of the most recent valid temperature report.

use serde::Serialize;

use crate::evaluate::Reading;

/// The last reading the device delivered, served to the browser console.
///
/// In-memory only: overwritten on every valid report, reset to zero on
/// restart.
#[derive(Debug, Clone, Copy, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LastReading {
    /// When the report arrived, as milliseconds since the Unix epoch.
    pub observed_at_epoch_ms: i64,
    pub warm_temp: f64,
    pub cool_temp: f64,
}

impl LastReading {
    pub fn observe(reading: &Reading, observed_at_epoch_ms: i64) -> Self {
        Self {
            observed_at_epoch_ms,
            warm_temp: reading.warm,
            cool_temp: reading.cool,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_zero_valued() {
        let last = LastReading::default();
        assert_eq!(last.observed_at_epoch_ms, 0);
        assert_eq!(last.warm_temp, 0.0);
        assert_eq!(last.cool_temp, 0.0);
    }

    #[test]
    fn observe_copies_both_probes() {
        let last = LastReading::observe(
            &Reading {
                warm: 88.0,
                cool: 72.5,
            },
            1_700_000_000_000,
        );
        assert_eq!(last.observed_at_epoch_ms, 1_700_000_000_000);
        assert_eq!(last.warm_temp, 88.0);
        assert_eq!(last.cool_temp, 72.5);
    }
}
