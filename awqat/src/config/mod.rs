//! Configuration
//!
//! INI-backed settings with per-key defaults. The `[calculation]` section
//! is the read-only snapshot (method, madhab, astronomical-Maghrib
//! toggle) the service consults at request time; the crate never persists
//! settings itself.

pub mod defaults;
mod parser;
mod settings;

pub use parser::{load_from_file, load_from_str, ConfigError};
pub use settings::{
    CacheSettings, CalculationSettings, LoggingSettings, RetrySettings, Settings,
};
