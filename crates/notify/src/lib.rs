//! Outbound notification gateway for the terrapin relay.
//!
//! - [`Notifier`] — fire-and-forget webhook trigger client.
//! - [`events`] — the fixed applet names the relay triggers.

pub mod events;
pub mod webhook;

pub use webhook::{Notifier, NotifyError};
