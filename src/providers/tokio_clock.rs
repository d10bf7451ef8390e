//! Tokio-based clock implementation.

use std::time::{Duration, Instant};

use async_trait::async_trait;

use crate::traits::Clock;

/// Production clock backed by Tokio's time functions.
///
/// Uses the real system clock and Tokio's async sleep. Tests use a fake
/// clock that fast-forwards instead of waiting.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioClock;

impl TokioClock {
    /// Creates a new Tokio clock instance.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Clock for TokioClock {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }

    fn now(&self) -> Instant {
        Instant::now()
    }
}
