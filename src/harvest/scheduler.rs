//! Pacing for sequential history requests
//!
//! The pacer is the single suspension point of the pipeline: before every
//! history request the full configured delay has to elapse, measured on the
//! monotonic clock. Because the enricher awaits each request before asking the
//! pacer again, there is never more than one request in flight.

use crate::config::PacingConfig;
use std::time::{Duration, Instant};

/// Enforces a fixed wait before each paced request
#[derive(Debug, Clone)]
pub struct Pacer {
    /// Wait applied before every request
    delay: Duration,

    /// Number of waits served so far
    waits: u64,
}

impl Pacer {
    /// Creates a new pacer with the given delay
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            waits: 0,
        }
    }

    /// Creates a pacer from the pacing configuration
    pub fn from_config(config: &PacingConfig) -> Self {
        Self::new(Duration::from_millis(config.history_delay_ms))
    }

    /// Waits the full delay, then releases the caller to issue one request
    ///
    /// The deadline is fixed when the call starts and re-checked against the
    /// clock after every sleep, so an early wake-up never shortens the wait.
    pub async fn ready(&mut self) {
        let deadline = Instant::now() + self.delay;

        loop {
            let now = Instant::now();
            if now >= deadline {
                break;
            }

            let remaining = deadline - now;
            tracing::trace!("Pacing: waiting {:?} before next request", remaining);
            tokio::time::sleep(remaining).await;
        }

        self.waits += 1;
    }

    /// The configured delay
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Number of completed waits
    pub fn waits(&self) -> u64 {
        self.waits
    }
}
