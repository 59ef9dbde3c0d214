use std::{
    sync::{Mutex, PoisonError},
    time::{Duration, Instant},
};

/// Decides whether a request may be served right now.
pub trait RateLimiter: Send + Sync {
    /// Returns `true` and records the request if it may proceed.
    fn try_acquire(&self) -> bool;

    /// Minimum time between two accepted requests.
    fn interval(&self) -> Duration;
}

/// Lets one request through per `interval`, across all callers.
///
/// Rejected requests do not extend the cooldown.
#[derive(Debug)]
pub struct Cooldown {
    interval: Duration,
    last_request: Mutex<Option<Instant>>,
}

impl Cooldown {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_request: Mutex::new(None),
        }
    }
}

impl RateLimiter for Cooldown {
    fn try_acquire(&self) -> bool {
        let mut last_request = self
            .last_request
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let now = Instant::now();
        match *last_request {
            Some(last) if now.duration_since(last) < self.interval => false,
            _ => {
                *last_request = Some(now);
                true
            }
        }
    }

    fn interval(&self) -> Duration {
        self.interval
    }
}
