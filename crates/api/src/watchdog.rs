//! Device liveness deadline.
//!
//! The watchdog owns at most one pending deadline task. [`Watchdog::rearm`]
//! aborts the previous task and schedules a fresh one, so the deadline only
//! elapses when the device has been silent for the whole timeout. A firing
//! does not reschedule itself: a silent device stays silent until its next
//! check-in rearms the watchdog.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::task::JoinHandle;

/// Notification sent when the deadline elapses.
pub const DEVICE_SILENT_MESSAGE: &str = "There has been no report from the temperature sensor";

/// A single rearmable deadline that invokes a callback on elapse.
pub struct Watchdog {
    timeout: Duration,
    on_silent: Arc<dyn Fn() + Send + Sync>,
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl Watchdog {
    /// Create a disarmed watchdog. `on_silent` runs on the runtime when a
    /// deadline elapses; it must not panic and must not block.
    pub fn new(timeout: Duration, on_silent: impl Fn() + Send + Sync + 'static) -> Self {
        Self {
            timeout,
            on_silent: Arc::new(on_silent),
            pending: Mutex::new(None),
        }
    }

    /// Cancel any pending deadline and schedule a new one.
    ///
    /// The swap happens under the handle lock: the previous task is always
    /// aborted before its replacement is installed, so two deadlines are
    /// never live at once no matter how quickly the device reports.
    pub async fn rearm(&self) {
        let mut pending = self.pending.lock().await;
        if let Some(previous) = pending.take() {
            previous.abort();
        }

        let timeout = self.timeout;
        let on_silent = Arc::clone(&self.on_silent);
        *pending = Some(tokio::spawn(async move {
            tokio::time::sleep(timeout).await;
            tracing::warn!(
                timeout_secs = timeout.as_secs(),
                "No device report before the deadline"
            );
            on_silent();
        }));
    }

    /// Cancel the pending deadline without scheduling a new one.
    pub async fn disarm(&self) {
        if let Some(previous) = self.pending.lock().await.take() {
            previous.abort();
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    fn counting_watchdog(timeout: Duration) -> (Watchdog, Arc<AtomicUsize>) {
        let fired = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&fired);
        let watchdog = Watchdog::new(timeout, move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        (watchdog, fired)
    }

    #[tokio::test(start_paused = true)]
    async fn fires_exactly_once_after_timeout() {
        let (watchdog, fired) = counting_watchdog(Duration::from_secs(50));

        watchdog.rearm().await;
        tokio::time::sleep(Duration::from_secs(51)).await;

        assert_eq!(fired.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn does_not_refire_without_a_new_rearm() {
        let (watchdog, fired) = counting_watchdog(Duration::from_secs(50));

        watchdog.rearm().await;
        tokio::time::sleep(Duration::from_secs(500)).await;

        assert_eq!(fired.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn rearming_within_the_window_prevents_firing() {
        let (watchdog, fired) = counting_watchdog(Duration::from_secs(50));

        // Five rearms 10 s apart: 50 s of wall time passes but no single
        // deadline ever elapses.
        for _ in 0..5 {
            watchdog.rearm().await;
            tokio::time::sleep(Duration::from_secs(10)).await;
        }
        assert_eq!(fired.load(Ordering::SeqCst), 0);

        // Let the last deadline run out.
        tokio::time::sleep(Duration::from_secs(41)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn rearm_after_firing_arms_a_fresh_deadline() {
        let (watchdog, fired) = counting_watchdog(Duration::from_secs(50));

        watchdog.rearm().await;
        tokio::time::sleep(Duration::from_secs(51)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 1);

        watchdog.rearm().await;
        tokio::time::sleep(Duration::from_secs(51)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn disarm_cancels_the_pending_deadline() {
        let (watchdog, fired) = counting_watchdog(Duration::from_secs(50));

        watchdog.rearm().await;
        tokio::time::sleep(Duration::from_secs(10)).await;
        watchdog.disarm().await;
        tokio::time::sleep(Duration::from_secs(500)).await;

        assert_eq!(fired.load(Ordering::SeqCst), 0);
    }
}
