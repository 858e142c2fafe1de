//! Calculation method conventions.
//!
//! A calculation method names the twilight convention used to derive Fajr
//! and Isha from sun-depression angles. The conventions here follow the
//! published parameters of the issuing bodies.

use std::fmt;
use std::str::FromStr;

/// Named astronomical convention for twilight-dependent prayers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CalculationMethod {
    /// Muslim World League (Fajr 18.0°, Isha 17.0°)
    MuslimWorldLeague,
    /// Egyptian General Authority of Survey (Fajr 19.5°, Isha 17.5°)
    Egyptian,
    /// University of Islamic Sciences, Karachi (Fajr 18.0°, Isha 18.0°)
    Karachi,
    /// Umm al-Qura University, Makkah (Fajr 18.5°, Isha 90 min after Maghrib)
    UmmAlQura,
    /// Islamic Society of North America (Fajr 15.0°, Isha 15.0°)
    NorthAmerica,
    /// Institute of Geophysics, University of Tehran (Fajr 17.7°, Isha 14.0°)
    Tehran,
}

/// How a method derives Isha.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum IshaRule {
    /// Sun depression angle below the horizon, in degrees
    Angle(f64),
    /// Fixed interval after Maghrib, in minutes
    FixedInterval(i64),
}

impl CalculationMethod {
    /// Fajr sun-depression angle in degrees.
    pub fn fajr_angle(&self) -> f64 {
        match self {
            CalculationMethod::MuslimWorldLeague => 18.0,
            CalculationMethod::Egyptian => 19.5,
            CalculationMethod::Karachi => 18.0,
            CalculationMethod::UmmAlQura => 18.5,
            CalculationMethod::NorthAmerica => 15.0,
            CalculationMethod::Tehran => 17.7,
        }
    }

    /// Isha derivation rule for this method.
    pub fn isha_rule(&self) -> IshaRule {
        match self {
            CalculationMethod::MuslimWorldLeague => IshaRule::Angle(17.0),
            CalculationMethod::Egyptian => IshaRule::Angle(17.5),
            CalculationMethod::Karachi => IshaRule::Angle(18.0),
            CalculationMethod::UmmAlQura => IshaRule::FixedInterval(90),
            CalculationMethod::NorthAmerica => IshaRule::Angle(15.0),
            CalculationMethod::Tehran => IshaRule::Angle(14.0),
        }
    }

    /// Short stable identifier used in config files and logs.
    pub fn id(&self) -> &'static str {
        match self {
            CalculationMethod::MuslimWorldLeague => "mwl",
            CalculationMethod::Egyptian => "egyptian",
            CalculationMethod::Karachi => "karachi",
            CalculationMethod::UmmAlQura => "umm-al-qura",
            CalculationMethod::NorthAmerica => "isna",
            CalculationMethod::Tehran => "tehran",
        }
    }
}

impl fmt::Display for CalculationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CalculationMethod::MuslimWorldLeague => write!(f, "Muslim World League"),
            CalculationMethod::Egyptian => write!(f, "Egyptian General Authority"),
            CalculationMethod::Karachi => write!(f, "University of Islamic Sciences, Karachi"),
            CalculationMethod::UmmAlQura => write!(f, "Umm al-Qura University"),
            CalculationMethod::NorthAmerica => write!(f, "Islamic Society of North America"),
            CalculationMethod::Tehran => write!(f, "Institute of Geophysics, Tehran"),
        }
    }
}

impl FromStr for CalculationMethod {
    type Err = UnknownMethod;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "mwl" | "muslim-world-league" => Ok(CalculationMethod::MuslimWorldLeague),
            "egyptian" => Ok(CalculationMethod::Egyptian),
            "karachi" => Ok(CalculationMethod::Karachi),
            "umm-al-qura" | "makkah" => Ok(CalculationMethod::UmmAlQura),
            "isna" | "north-america" => Ok(CalculationMethod::NorthAmerica),
            "tehran" => Ok(CalculationMethod::Tehran),
            other => Err(UnknownMethod(other.to_string())),
        }
    }
}

/// Error for an unrecognized calculation method identifier.
#[derive(Debug, Clone, PartialEq)]
pub struct UnknownMethod(pub String);

impl fmt::Display for UnknownMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unknown calculation method: '{}'", self.0)
    }
}

impl std::error::Error for UnknownMethod {}
