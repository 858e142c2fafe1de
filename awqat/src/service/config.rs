//! Service and per-request configuration.

use crate::astro::CalculationMethod;
use crate::config::CalculationSettings;
use crate::madhab::Madhab;
use crate::retry::RetryPolicy;
use std::time::Duration;

/// Per-request calculation parameters.
///
/// A snapshot of the caller's settings at request time; the service never
/// stores these.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RequestConfig {
    /// Astronomical convention
    pub method: CalculationMethod,
    /// Jurisprudential school
    pub madhab: Madhab,
    /// Use the alternate depression angle for delayed-Maghrib schools
    pub astronomical_maghrib: bool,
}

impl RequestConfig {
    /// Creates a request configuration.
    pub fn new(method: CalculationMethod, madhab: Madhab, astronomical_maghrib: bool) -> Self {
        Self {
            method,
            madhab,
            astronomical_maghrib,
        }
    }
}

impl From<CalculationSettings> for RequestConfig {
    fn from(settings: CalculationSettings) -> Self {
        Self {
            method: settings.method,
            madhab: settings.madhab,
            astronomical_maghrib: settings.astronomical_maghrib,
        }
    }
}

/// Service-wide configuration.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Retry policy for location operations
    pub retry: RetryPolicy,
    /// Timeout applied to each individual remote attempt, separate from
    /// the retry budget
    pub step_timeout: Duration,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            retry: RetryPolicy::location(),
            step_timeout: Duration::from_secs(5),
        }
    }
}

impl ServiceConfig {
    /// Creates a configuration with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the retry policy for location operations.
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Sets the per-attempt timeout.
    pub fn with_step_timeout(mut self, step_timeout: Duration) -> Self {
        self.step_timeout = step_timeout;
        self
    }
}
