//! Domain logic for the terrapin temperature relay.
//!
//! Everything in this crate is I/O-free except the settings store, which
//! owns the flat-file configuration record. The HTTP surface lives in
//! `terrapin-api`; outbound webhook delivery lives in `terrapin-notify`.

pub mod error;
pub mod evaluate;
pub mod reading;
pub mod settings;
pub mod throttle;

pub use error::CoreError;
pub use evaluate::{evaluate, Reading};
pub use reading::LastReading;
pub use settings::{Bounds, PollingConfig, Settings, SettingsError, SettingsStore};
pub use throttle::{NotificationThrottle, NotifyPlan};
