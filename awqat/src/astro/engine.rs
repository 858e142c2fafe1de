//! Astronomical engine abstraction.
//!
//! The engine trait is the seam between the orchestration layer and the
//! sun-geometry solver. The production implementation is
//! [`SolarEngine`](super::SolarEngine); tests inject deterministic doubles.

use crate::astro::method::CalculationMethod;
use crate::coord::Coordinate;
use crate::prayer::PrayerTimeSet;
use chrono::{DateTime, NaiveDate, Utc};
use thiserror::Error;

/// Errors from baseline computation.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum AstroError {
    /// The sun never crosses the required elevation on this date at this
    /// latitude (polar day/night). A function of geometry, not external
    /// state: retrying cannot change the outcome.
    #[error("No solar crossing for latitude {latitude} on {date} (polar day/night)")]
    GeometryUnsolvable { latitude: f64, date: NaiveDate },

    /// The underlying solver rejected the inputs.
    #[error("Solar computation failed: {0}")]
    Computation(String),
}

/// Which of a day's two elevation crossings is requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolarCrossing {
    /// The morning crossing, sun ascending (used for Fajr-like marks)
    MorningAscent,
    /// The evening crossing, sun descending (used for Maghrib/Isha-like marks)
    EveningDescent,
}

/// Sun-geometry solver for one location and date.
///
/// Implementations must be deterministic: identical inputs always produce
/// identical outputs, with no I/O and no hidden state.
pub trait AstronomicalEngine: Send + Sync {
    /// Computes the baseline time set for a method's convention.
    ///
    /// The returned set satisfies the strictly-increasing ordering
    /// invariant; an unsatisfiable geometry is reported as
    /// [`AstroError::GeometryUnsolvable`], never silently reordered.
    fn compute_baseline(
        &self,
        coordinate: &Coordinate,
        date: NaiveDate,
        method: CalculationMethod,
    ) -> Result<PrayerTimeSet, AstroError>;

    /// Computes the instant the sun reaches `depression_deg` below the
    /// horizon on the requested side of transit.
    ///
    /// This is the override-angle path used for astronomical Maghrib.
    fn crossing_at_depression(
        &self,
        coordinate: &Coordinate,
        date: NaiveDate,
        depression_deg: f64,
        crossing: SolarCrossing,
    ) -> Result<DateTime<Utc>, AstroError>;
}
