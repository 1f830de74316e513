//! Debounce and throttle helpers.
//!
//! Both are driven by caller-supplied `Instant`s instead of timers so the
//! UI loop decides when time advances.

use std::time::{Duration, Instant};

/// Delivers only the last value once `wait` has passed without a new call
#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    wait: Duration,
    pending: Option<(T, Instant)>,
}

impl<T> Debouncer<T> {
    pub fn new(wait: Duration) -> Self {
        Self { wait, pending: None }
    }

    /// Record a call, restarting the quiet period
    pub fn call(&mut self, value: T, now: Instant) {
        self.pending = Some((value, now + self.wait));
    }

    /// Take the pending value if its quiet period has elapsed
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        let ready = matches!(&self.pending, Some((_, deadline)) if now >= *deadline);
        if ready {
            self.pending.take().map(|(value, _)| value)
        } else {
            None
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

/// Lets a call through at most once per `limit`, on the leading edge
#[derive(Debug, Clone)]
pub struct Throttle {
    limit: Duration,
    last: Option<Instant>,
}

impl Throttle {
    pub fn new(limit: Duration) -> Self {
        Self { limit, last: None }
    }

    pub fn try_acquire(&mut self, now: Instant) -> bool {
        match self.last {
            Some(last) if now.duration_since(last) < self.limit => false,
            _ => {
                self.last = Some(now);
                true
            }
        }
    }
}
