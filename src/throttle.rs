//! Caller-side pacing for the explorer API. The free tier allows five
//! requests per second, so consecutive calls are held at least 220ms apart.

use async_trait::async_trait;
use std::time::{Duration, Instant};

/// Minimum spacing between consecutive explorer requests.
pub const EXPLORER_MIN_INTERVAL: Duration = Duration::from_millis(220);

/// Time source for the pacer. Injectable so throttling behaviour can be
/// tested without real delays.
#[async_trait]
pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;
    async fn sleep(&self, duration: Duration);
}

/// Wall clock backed by the tokio timer.
pub struct SystemClock;

#[async_trait]
impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Holds each call until `min_interval` has elapsed since the previous one.
/// State is process-local; a single pipeline instance is assumed.
pub struct RequestPacer<C: Clock = SystemClock> {
    min_interval: Duration,
    last_call: Option<Instant>,
    clock: C,
}

impl RequestPacer<SystemClock> {
    pub fn new(min_interval: Duration) -> Self {
        Self::with_clock(min_interval, SystemClock)
    }
}

impl<C: Clock> RequestPacer<C> {
    pub fn with_clock(min_interval: Duration, clock: C) -> Self {
        Self {
            min_interval,
            last_call: None,
            clock,
        }
    }

    /// Returns once enough time has passed since the last completed `pace`.
    /// The first call never waits.
    pub async fn pace(&mut self) {
        if let Some(last) = self.last_call {
            let elapsed = self.clock.now().duration_since(last);
            if elapsed < self.min_interval {
                self.clock.sleep(self.min_interval - elapsed).await;
            }
        }
        self.last_call = Some(self.clock.now());
    }
}
