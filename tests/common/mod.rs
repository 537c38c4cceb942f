use async_trait::async_trait;
use contract_scout::throttle::Clock;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

/// Deterministic clock for throttle tests: `sleep` returns immediately,
/// advancing the clock and recording the requested duration.
#[derive(Clone)]
pub struct FakeClock {
    inner: Arc<Inner>,
}

struct Inner {
    now: Mutex<Instant>,
    sleeps: Mutex<Vec<Duration>>,
}

// not every test binary uses every helper
#[allow(dead_code)]
impl FakeClock {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Inner {
                now: Mutex::new(Instant::now()),
                sleeps: Mutex::new(Vec::new()),
            }),
        }
    }

    pub fn advance(&self, duration: Duration) {
        *self.inner.now.lock().unwrap() += duration;
    }

    pub fn recorded_sleeps(&self) -> Vec<Duration> {
        self.inner.sleeps.lock().unwrap().clone()
    }
}

#[async_trait]
impl Clock for FakeClock {
    fn now(&self) -> Instant {
        *self.inner.now.lock().unwrap()
    }

    async fn sleep(&self, duration: Duration) {
        *self.inner.now.lock().unwrap() += duration;
        self.inner.sleeps.lock().unwrap().push(duration);
    }
}
