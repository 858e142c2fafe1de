//! Default values for every configuration key.

use crate::astro::CalculationMethod;
use crate::config::settings::{
    CacheSettings, CalculationSettings, LoggingSettings, RetrySettings, Settings,
};
use crate::madhab::Madhab;

pub const DEFAULT_METHOD: CalculationMethod = CalculationMethod::MuslimWorldLeague;
pub const DEFAULT_MADHAB: Madhab = Madhab::Shafii;
pub const DEFAULT_ASTRONOMICAL_MAGHRIB: bool = false;

pub const DEFAULT_CACHE_CAPACITY: usize = 512;

pub const DEFAULT_RETRY_MAX_ATTEMPTS: u32 = 4;
pub const DEFAULT_RETRY_BASE_DELAY_MS: u64 = 250;
pub const DEFAULT_RETRY_MULTIPLIER: f64 = 2.0;
pub const DEFAULT_RETRY_MAX_DELAY_MS: u64 = 5_000;

pub const DEFAULT_LOG_DIR: &str = "logs";
pub const DEFAULT_LOG_FILE: &str = "awqat.log";

/// Builds a settings tree with every key at its default.
pub fn settings() -> Settings {
    Settings {
        calculation: CalculationSettings {
            method: DEFAULT_METHOD,
            madhab: DEFAULT_MADHAB,
            astronomical_maghrib: DEFAULT_ASTRONOMICAL_MAGHRIB,
        },
        cache: CacheSettings {
            capacity: DEFAULT_CACHE_CAPACITY,
        },
        retry: RetrySettings {
            max_attempts: DEFAULT_RETRY_MAX_ATTEMPTS,
            base_delay_ms: DEFAULT_RETRY_BASE_DELAY_MS,
            multiplier: DEFAULT_RETRY_MULTIPLIER,
            max_delay_ms: DEFAULT_RETRY_MAX_DELAY_MS,
        },
        logging: LoggingSettings {
            directory: DEFAULT_LOG_DIR.to_string(),
            file: DEFAULT_LOG_FILE.to_string(),
        },
    }
}
