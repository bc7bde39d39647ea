//! Threshold evaluation for a single temperature report.
//!
//! Pure logic — no I/O. The caller fetches the current bounds and passes
//! them in together with the reading.

use serde::{Deserialize, Serialize};

use crate::settings::Bounds;

/// One temperature report from the device: warm-side and cool-side probes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    pub warm: f64,
    pub cool: f64,
}

/// Evaluate a reading against the bounds and compose the notification
/// message. An empty string means both probes are in range.
///
/// The warm clause always comes first; two clauses are joined with
/// `". "`. Values exactly at a bound are not flagged.
pub fn evaluate(reading: &Reading, bounds: &Bounds) -> String {
    let mut message = String::new();
    if let Some(clause) = side_message("warm", reading.warm, bounds.warm_lower, bounds.warm_upper) {
        message.push_str(&clause);
    }
    if let Some(clause) = side_message("cool", reading.cool, bounds.cool_lower, bounds.cool_upper) {
        if !message.is_empty() {
            message.push_str(". ");
        }
        message.push_str(&clause);
    }
    message
}

/// Clause for one probe, or `None` when the value is in range.
fn side_message(side: &str, value: f64, lower: f64, upper: f64) -> Option<String> {
    let adjective = if value < lower {
        "cold"
    } else if value > upper {
        "hot"
    } else {
        return None;
    };
    Some(format!("The {side} side is too {adjective}({value})"))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
