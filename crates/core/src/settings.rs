//! Durable relay configuration: threshold bounds and device polling
//! intervals, persisted as a single pretty-printed JSON record.
//!
//! The record is always read and written whole. Saves go through a sibling
//! temp file followed by a rename, so a crash mid-write never corrupts a
//! previously saved record.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Default acceptable range for the warm-side probe (degrees F).
pub const DEFAULT_WARM_UPPER: f64 = 100.0;
pub const DEFAULT_WARM_LOWER: f64 = 55.0;
/// Default acceptable range for the cool-side probe (degrees F).
pub const DEFAULT_COOL_UPPER: f64 = 100.0;
pub const DEFAULT_COOL_LOWER: f64 = 55.0;

/// Default interval at which the device reports temperatures.
pub const DEFAULT_TEMP_CHECK_INTERVAL_MS: u64 = 30_000;
/// Default interval the device waits before reporting its own errors.
pub const DEFAULT_ERROR_INTERVAL_MS: u64 = 45_000;

// ---------------------------------------------------------------------------
// Bounds
// ---------------------------------------------------------------------------

/// Acceptable `[lower, upper]` temperature range per probe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bounds {
    pub warm_upper: f64,
    pub warm_lower: f64,
    pub cool_upper: f64,
    pub cool_lower: f64,
}

impl Default for Bounds {
    fn default() -> Self {
        Self {
            warm_upper: DEFAULT_WARM_UPPER,
            warm_lower: DEFAULT_WARM_LOWER,
            cool_upper: DEFAULT_COOL_UPPER,
            cool_lower: DEFAULT_COOL_LOWER,
        }
    }
}

impl Bounds {
    /// Check the `lower <= upper` invariant on both sides.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.warm_lower > self.warm_upper {
            return Err(CoreError::Validation(
                "warm lower bound exceeds upper bound".to_string(),
            ));
        }
        if self.cool_lower > self.cool_upper {
            return Err(CoreError::Validation(
                "cool lower bound exceeds upper bound".to_string(),
            ));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// PollingConfig
// ---------------------------------------------------------------------------

/// Intervals reported back to the device on every interaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PollingConfig {
    /// How often the device should report temperatures, in milliseconds.
    pub temp_check_interval_ms: u64,
    /// How long the device should wait before reporting an error, in
    /// milliseconds.
    pub error_interval_ms: u64,
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            temp_check_interval_ms: DEFAULT_TEMP_CHECK_INTERVAL_MS,
            error_interval_ms: DEFAULT_ERROR_INTERVAL_MS,
        }
    }
}

impl PollingConfig {
    /// Both intervals must be strictly positive.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.temp_check_interval_ms == 0 {
            return Err(CoreError::Validation(
                "tempCheckInterval must be greater than zero".to_string(),
            ));
        }
        if self.error_interval_ms == 0 {
            return Err(CoreError::Validation(
                "errorInterval must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Settings
// ---------------------------------------------------------------------------

/// The single durable configuration record.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Settings {
    pub bounds: Bounds,
    pub polling: PollingConfig,
}

impl Settings {
    pub fn validate(&self) -> Result<(), CoreError> {
        self.bounds.validate()?;
        self.polling.validate()
    }
}

// ---------------------------------------------------------------------------
// SettingsStore
// ---------------------------------------------------------------------------

/// Error type for settings persistence failures.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("Settings file I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Settings file is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Flat-file JSON store for [`Settings`].
#[derive(Debug)]
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the whole record. `Ok(None)` means no record has ever been
    /// saved; the caller substitutes defaults.
    pub async fn load(&self) -> Result<Option<Settings>, SettingsError> {
        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        Ok(Some(serde_json::from_str(&raw)?))
    }

    /// Overwrite the whole record atomically (temp file + rename).
    pub async fn save(&self, settings: &Settings) -> Result<(), SettingsError> {
        let json = serde_json::to_string_pretty(settings)?;
        let tmp = self.path.with_extension("tmp");
        tokio::fs::write(&tmp, json).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn store_in(dir: &tempfile::TempDir) -> SettingsStore {
        SettingsStore::new(dir.path().join("settings.json"))
    }

    #[tokio::test]
    async fn load_returns_none_when_file_missing() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        assert!(store.load().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        let settings = Settings {
            bounds: Bounds {
                warm_upper: 95.0,
                warm_lower: 70.0,
                cool_upper: 85.0,
                cool_lower: 60.0,
            },
            polling: PollingConfig {
                temp_check_interval_ms: 15_000,
                error_interval_ms: 20_000,
            },
        };
        store.save(&settings).await.unwrap();

        let loaded = store.load().await.unwrap().unwrap();
        assert_eq!(loaded, settings);
    }

    #[tokio::test]
    async fn save_after_load_is_byte_identical() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        store.save(&Settings::default()).await.unwrap();
        let first = tokio::fs::read_to_string(store.path()).await.unwrap();

        let loaded = store.load().await.unwrap().unwrap();
        store.save(&loaded).await.unwrap();
        let second = tokio::fs::read_to_string(store.path()).await.unwrap();

        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn save_leaves_no_temp_file_behind() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        store.save(&Settings::default()).await.unwrap();

        let entries: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(entries, vec![std::ffi::OsString::from("settings.json")]);
    }

    #[tokio::test]
    async fn corrupt_file_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        tokio::fs::write(store.path(), "{ not json").await.unwrap();
        let err = store.load().await.unwrap_err();
        assert!(matches!(err, SettingsError::Parse(_)));
    }

    #[test]
    fn default_bounds_match_device_defaults() {
        let bounds = Bounds::default();
        assert_eq!(bounds.warm_upper, 100.0);
        assert_eq!(bounds.warm_lower, 55.0);
        assert_eq!(bounds.cool_upper, 100.0);
        assert_eq!(bounds.cool_lower, 55.0);
    }

    #[test]
    fn inverted_bounds_fail_validation() {
        let bounds = Bounds {
            warm_upper: 50.0,
            warm_lower: 60.0,
            ..Bounds::default()
        };
        assert!(bounds.validate().is_err());

        let bounds = Bounds {
            cool_upper: 50.0,
            cool_lower: 60.0,
            ..Bounds::default()
        };
        assert!(bounds.validate().is_err());
    }

    #[test]
    fn equal_bounds_pass_validation() {
        let bounds = Bounds {
            warm_upper: 70.0,
            warm_lower: 70.0,
            ..Bounds::default()
        };
        assert!(bounds.validate().is_ok());
    }

    #[test]
    fn zero_intervals_fail_validation() {
        let polling = PollingConfig {
            temp_check_interval_ms: 0,
            ..PollingConfig::default()
        };
        assert!(polling.validate().is_err());

        let polling = PollingConfig {
            error_interval_ms: 0,
            ..PollingConfig::default()
        };
        assert!(polling.validate().is_err());
    }
}
