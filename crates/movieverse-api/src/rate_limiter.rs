use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tracing::trace;

/// Default minimum gap between requests against a quota-constrained API.
pub const DEFAULT_MIN_INTERVAL: Duration = Duration::from_millis(250);

/// Serializes dispatches to a quota-constrained API so consecutive
/// requests are spaced by a minimum interval.
///
/// Callers queue on the internal mutex, so dispatch order is arrival
/// order; the sleep happens while the lock is held, which is what
/// guarantees the gap between any two dispatches.
#[derive(Debug)]
pub struct RateLimiter {
    min_interval: Duration,
    last_dispatch: Mutex<Option<Instant>>,
}

impl RateLimiter {
    pub fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            last_dispatch: Mutex::new(None),
        }
    }

    pub fn default_interval() -> Self {
        Self::new(DEFAULT_MIN_INTERVAL)
    }

    /// Wait until at least `min_interval` has elapsed since the previous
    /// dispatch, then claim the current slot.
    pub async fn acquire(&self) {
        let mut last = self.last_dispatch.lock().await;
        if let Some(prev) = *last {
            let elapsed = prev.elapsed();
            if elapsed < self.min_interval {
                let wait = self.min_interval - elapsed;
                trace!(?wait, "rate limiter delaying dispatch");
                tokio::time::sleep(wait).await;
            }
        }
        *last = Some(Instant::now());
    }
}
