//! Settings structs for all configuration sections.
//!
//! Each struct represents one `[section]` of the INI config file. These
//! are pure data types; parsing lives in the `parser` module.

use crate::astro::CalculationMethod;
use crate::madhab::Madhab;

/// Complete application configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// Calculation settings: the read-only snapshot consulted per request
    pub calculation: CalculationSettings,
    /// Cache settings
    pub cache: CacheSettings,
    /// Retry settings for location operations
    pub retry: RetrySettings,
    /// Logging settings
    pub logging: LoggingSettings,
}

/// Calculation configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CalculationSettings {
    /// Astronomical convention for twilight angles
    pub method: CalculationMethod,
    /// Jurisprudential school
    pub madhab: Madhab,
    /// Use the alternate depression angle for delayed-Maghrib schools
    /// instead of the fixed minute offset
    pub astronomical_maghrib: bool,
}

/// Cache configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheSettings {
    /// Maximum number of cached day-entries
    pub capacity: usize,
}

/// Retry configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RetrySettings {
    /// Total attempts per operation, including the first
    pub max_attempts: u32,
    /// Delay after the first failure, in milliseconds
    pub base_delay_ms: u64,
    /// Backoff multiplier per attempt
    pub multiplier: f64,
    /// Upper bound on a single delay, in milliseconds
    pub max_delay_ms: u64,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingSettings {
    /// Directory for log files
    pub directory: String,
    /// Log file name
    pub file: String,
}

impl RetrySettings {
    /// Converts to a runtime retry policy (jitter always on in production).
    pub fn to_policy(&self) -> crate::retry::RetryPolicy {
        use std::time::Duration;
        crate::retry::RetryPolicy::new()
            .with_max_attempts(self.max_attempts)
            .with_base_delay(Duration::from_millis(self.base_delay_ms))
            .with_multiplier(self.multiplier)
            .with_max_delay(Duration::from_millis(self.max_delay_ms))
    }
}
