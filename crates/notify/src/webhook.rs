//! Fire-and-forget webhook trigger delivery.
//!
//! [`Notifier`] posts a JSON `{"value1": …, "value2": …}` payload to an
//! IFTTT-style trigger URL. Delivery is one-shot: no retry, failures are
//! logged and swallowed, so a slow or dead webhook endpoint can never
//! block request handling.

use std::time::Duration;

use serde::Serialize;
use serde_json::Value;

/// HTTP request timeout for a single delivery attempt.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

/// Error type for notification delivery failures.
#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    /// The underlying HTTP request failed (network, DNS, timeout, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The remote server returned a non-2xx status code.
    #[error("Webhook returned HTTP {0}")]
    HttpStatus(u16),
}

// ---------------------------------------------------------------------------
// Notifier
// ---------------------------------------------------------------------------

/// Trigger body understood by the webhook service: up to two scalars.
#[derive(Debug, Serialize)]
struct TriggerBody<'a> {
    value1: &'a Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    value2: Option<&'a Value>,
}

/// Webhook trigger client.
///
/// Cheap to clone; handlers keep one in shared state and call
/// [`notify`](Notifier::notify) without awaiting delivery.
#[derive(Debug, Clone)]
pub struct Notifier {
    client: reqwest::Client,
    base_url: String,
    key: String,
}

impl Notifier {
    /// Create a client for the given trigger root (e.g.
    /// `http://maker.ifttt.com/trigger`) and subscriber key.
    pub fn new(base_url: impl Into<String>, key: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("Failed to build reqwest HTTP client");
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            key: key.into(),
        }
    }

    /// Fire an event without waiting for delivery.
    ///
    /// Spawns a detached task. A failed delivery is logged and permanently
    /// dropped; nothing propagates back to the caller.
    pub fn notify(&self, event: &'static str, value1: impl Into<Value>, value2: Option<Value>) {
        let notifier = self.clone();
        let value1 = value1.into();
        tokio::spawn(async move {
            if let Err(e) = notifier.deliver(event, &value1, value2.as_ref()).await {
                tracing::warn!(event, error = %e, "Notification delivery failed");
            }
        });
    }

    /// Deliver one event payload. Single attempt, no retry.
    pub async fn deliver(
        &self,
        event: &str,
        value1: &Value,
        value2: Option<&Value>,
    ) -> Result<(), NotifyError> {
        let url = self.trigger_url(event);
        let body = TriggerBody { value1, value2 };
        let response = self.client.post(&url).json(&body).send().await?;
        if !response.status().is_success() {
            return Err(NotifyError::HttpStatus(response.status().as_u16()));
        }
        tracing::debug!(event, "Notification delivered");
        Ok(())
    }

    fn trigger_url(&self, event: &str) -> String {
        format!("{}/{}/with/key/{}", self.base_url, event, self.key)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
