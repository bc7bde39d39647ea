//! Canonical webhook applet names.
//!
//! The subscriber's webhook service routes on these, so they are part of
//! the external contract and must not drift.

/// Status and alert notifications pushed to the subscriber's phone.
pub const NOTIFY: &str = "notify";

/// Temperature history log entries.
pub const TEMP_LOG: &str = "temp_log";
