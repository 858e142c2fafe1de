//! INI config parsing with per-key fallback to defaults.

use crate::config::defaults;
use crate::config::settings::Settings;
use ini::Ini;
use std::path::Path;
use thiserror::Error;
use tracing::warn;

/// Errors from loading a config file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    /// The file is not valid INI
    #[error("Failed to parse config file: {0}")]
    Parse(String),
}

/// Loads settings from an INI file.
///
/// Missing sections and keys fall back to defaults. Keys that are present
/// but unparseable are logged and also fall back, so one bad line never
/// takes the whole config down.
pub fn load_from_file(path: &Path) -> Result<Settings, ConfigError> {
    let contents = std::fs::read_to_string(path)?;
    load_from_str(&contents)
}

/// Parses settings from INI text. See [`load_from_file`].
pub fn load_from_str(contents: &str) -> Result<Settings, ConfigError> {
    let ini = Ini::load_from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))?;
    let mut settings = defaults::settings();

    if let Some(section) = ini.section(Some("calculation")) {
        if let Some(raw) = section.get("method") {
            match raw.parse() {
                Ok(method) => settings.calculation.method = method,
                Err(_) => warn!(raw, "unknown calculation method, using default"),
            }
        }
        if let Some(raw) = section.get("madhab") {
            match raw.parse() {
                Ok(madhab) => settings.calculation.madhab = madhab,
                Err(_) => warn!(raw, "unknown madhab, using default"),
            }
        }
        if let Some(raw) = section.get("astronomical_maghrib") {
            match raw.parse() {
                Ok(flag) => settings.calculation.astronomical_maghrib = flag,
                Err(_) => warn!(raw, "invalid astronomical_maghrib flag, using default"),
            }
        }
    }

    if let Some(section) = ini.section(Some("cache")) {
        parse_key(section, "capacity", &mut settings.cache.capacity);
    }

    if let Some(section) = ini.section(Some("retry")) {
        parse_key(section, "max_attempts", &mut settings.retry.max_attempts);
        parse_key(section, "base_delay_ms", &mut settings.retry.base_delay_ms);
        parse_key(section, "multiplier", &mut settings.retry.multiplier);
        parse_key(section, "max_delay_ms", &mut settings.retry.max_delay_ms);
    }

    if let Some(section) = ini.section(Some("logging")) {
        if let Some(raw) = section.get("directory") {
            settings.logging.directory = raw.to_string();
        }
        if let Some(raw) = section.get("file") {
            settings.logging.file = raw.to_string();
        }
    }

    Ok(settings)
}

/// Parses one typed key, keeping the current value on failure.
fn parse_key<T: std::str::FromStr>(section: &ini::Properties, key: &str, target: &mut T) {
    if let Some(raw) = section.get(key) {
        match raw.parse() {
            Ok(value) => *target = value,
            Err(_) => warn!(key, raw, "invalid config value, using default"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::astro::CalculationMethod;
    use crate::madhab::Madhab;
    use std::io::Write;

    #[test]
    fn test_empty_config_is_all_defaults() {
        let settings = load_from_str("").unwrap();
        assert_eq!(settings, defaults::settings());
    }

    #[test]
    fn test_full_config() {
        let settings = load_from_str(
            r#"
[calculation]
method = tehran
madhab = jafari
astronomical_maghrib = true

[cache]
capacity = 64

[retry]
max_attempts = 6
base_delay_ms = 100
multiplier = 1.5
max_delay_ms = 2000

[logging]
directory = /tmp/awqat-logs
file = test.log
"#,
        )
        .unwrap();

        assert_eq!(settings.calculation.method, CalculationMethod::Tehran);
        assert_eq!(settings.calculation.madhab, Madhab::Jafari);
        assert!(settings.calculation.astronomical_maghrib);
        assert_eq!(settings.cache.capacity, 64);
        assert_eq!(settings.retry.max_attempts, 6);
        assert_eq!(settings.retry.multiplier, 1.5);
        assert_eq!(settings.logging.file, "test.log");
    }

    #[test]
    fn test_partial_section_keeps_other_defaults() {
        let settings = load_from_str("[calculation]\nmadhab = hanafi\n").unwrap();

        assert_eq!(settings.calculation.madhab, Madhab::Hanafi);
        assert_eq!(settings.calculation.method, defaults::DEFAULT_METHOD);
        assert_eq!(settings.cache.capacity, defaults::DEFAULT_CACHE_CAPACITY);
    }

    #[test]
    fn test_invalid_value_falls_back() {
        let settings =
            load_from_str("[calculation]\nmadhab = nonsense\n\n[cache]\ncapacity = lots\n")
                .unwrap();

        assert_eq!(settings.calculation.madhab, defaults::DEFAULT_MADHAB);
        assert_eq!(settings.cache.capacity, defaults::DEFAULT_CACHE_CAPACITY);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[calculation]\nmethod = karachi").unwrap();

        let settings = load_from_file(file.path()).unwrap();
        assert_eq!(settings.calculation.method, CalculationMethod::Karachi);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = load_from_file(Path::new("/nonexistent/awqat.ini"));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }
}
