use std::time::Duration;

/// Knobs for a [`TagCache`](crate::TagCache).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheOptions {
    /// Upper bound on the wait for either index lock. `None` blocks until the
    /// lock is free.
    pub lock_timeout: Option<Duration>,
}

impl CacheOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_lock_timeout(mut self, timeout: Duration) -> Self {
        self.lock_timeout = Some(timeout);
        self
    }
}
