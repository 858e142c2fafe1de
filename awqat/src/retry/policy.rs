//! Retry policy and backoff calculation.

use std::time::Duration;

/// Bounded exponential-backoff policy for one fallible operation.
///
/// Applied per operation, not globally: each call site picks (or
/// configures) the policy that matches its failure profile.
#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    /// Total attempts including the first (minimum 1)
    pub max_attempts: u32,
    /// Delay after the first failed attempt
    pub base_delay: Duration,
    /// Multiplier applied per subsequent attempt
    pub multiplier: f64,
    /// Upper bound on any single delay
    pub max_delay: Duration,
    /// Whether to spread delays by ±25% to avoid thundering herds
    pub jitter: bool,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_millis(200),
            multiplier: 2.0,
            max_delay: Duration::from_secs(10),
            jitter: true,
        }
    }
}

impl RetryPolicy {
    /// Creates a policy with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the total number of attempts.
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    /// Sets the delay after the first failure.
    pub fn with_base_delay(mut self, base_delay: Duration) -> Self {
        self.base_delay = base_delay;
        self
    }

    /// Sets the backoff multiplier.
    pub fn with_multiplier(mut self, multiplier: f64) -> Self {
        self.multiplier = multiplier;
        self
    }

    /// Sets the delay cap.
    pub fn with_max_delay(mut self, max_delay: Duration) -> Self {
        self.max_delay = max_delay;
        self
    }

    /// Enables or disables jitter.
    pub fn with_jitter(mut self, jitter: bool) -> Self {
        self.jitter = jitter;
        self
    }

    /// Policy tuned for location lookups: a little patient, bounded.
    pub fn location() -> Self {
        Self {
            max_attempts: 4,
            base_delay: Duration::from_millis(250),
            multiplier: 2.0,
            max_delay: Duration::from_secs(5),
            jitter: true,
        }
    }

    /// Delay to wait after attempt `attempt` (1-based) fails.
    ///
    /// Exponential in the attempt number, capped at `max_delay`, with
    /// optional ±25% jitter.
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        if attempt == 0 {
            return Duration::ZERO;
        }

        let exponential =
            self.base_delay.as_millis() as f64 * self.multiplier.powi(attempt.saturating_sub(1) as i32);
        let capped = exponential.min(self.max_delay.as_millis() as f64);
        let millis = if self.jitter {
            capped * jitter_factor()
        } else {
            capped
        };
        Duration::from_millis(millis as u64).min(self.max_delay)
    }
}

/// Spread factor in [0.75, 1.25) derived from thread identity and the
/// clock; avoids a random-number dependency for a value that only needs
/// to decorrelate concurrent waiters.
fn jitter_factor() -> f64 {
    use std::collections::hash_map::DefaultHasher;
    use std::hash::{Hash, Hasher};

    let mut hasher = DefaultHasher::new();
    std::thread::current().id().hash(&mut hasher);
    std::time::SystemTime::now().hash(&mut hasher);

    (hasher.finish() % 50) as f64 / 100.0 + 0.75
}
