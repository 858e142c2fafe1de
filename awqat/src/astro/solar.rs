//! SPA-backed astronomical engine.
//!
//! Wraps the `solar-positioning` SPA solver: transit for Dhuhr, the
//! standard horizon for Sunrise/Maghrib, method depression angles for
//! Fajr/Isha, and the single-shadow-length rule for Asr. Polar edge cases
//! surface as [`AstroError::GeometryUnsolvable`].

use crate::astro::engine::{AstroError, AstronomicalEngine, SolarCrossing};
use crate::astro::method::{CalculationMethod, IshaRule};
use crate::coord::Coordinate;
use crate::prayer::PrayerTimeSet;
use chrono::{DateTime, Duration, NaiveDate, Utc};
use solar_positioning::time::DeltaT;
use solar_positioning::{spa, Horizon, SunriseResult};
use tracing::warn;

/// Production engine backed by the NREL SPA algorithm.
///
/// Stateless and cheap to construct; one instance can serve all requests.
#[derive(Debug, Clone, Copy, Default)]
pub struct SolarEngine;

impl SolarEngine {
    /// Creates a new solar engine.
    pub fn new() -> Self {
        Self
    }

    /// Reference instant for the civil day: local mean noon, expressed in
    /// UTC. Anchoring on mean noon keeps the returned crossings inside the
    /// requested civil day for any longitude.
    fn local_mean_noon(coordinate: &Coordinate, date: NaiveDate) -> Result<DateTime<Utc>, AstroError> {
        let noon = date
            .and_hms_opt(12, 0, 0)
            .ok_or_else(|| AstroError::Computation(format!("invalid date {date}")))?
            .and_utc();
        let offset_secs = (coordinate.longitude() / 15.0 * 3600.0).round() as i64;
        Ok(noon - Duration::seconds(offset_secs))
    }

    fn delta_t(date: NaiveDate) -> f64 {
        use chrono::Datelike;
        DeltaT::estimate_from_date(date.year(), date.month()).unwrap_or(69.0)
    }

    /// Solves the day's crossings for one horizon.
    ///
    /// Returns `(rise, transit, set)`; a polar day or night for this
    /// horizon is a geometry error.
    fn crossings(
        &self,
        coordinate: &Coordinate,
        date: NaiveDate,
        horizon: Horizon,
    ) -> Result<(DateTime<Utc>, DateTime<Utc>, DateTime<Utc>), AstroError> {
        let anchor = Self::local_mean_noon(coordinate, date)?;
        let result = spa::sunrise_sunset_for_horizon(
            anchor,
            coordinate.latitude(),
            coordinate.longitude(),
            Self::delta_t(date),
            horizon,
        )
        .map_err(|e| AstroError::Computation(e.to_string()))?;

        match result {
            SunriseResult::RegularDay {
                sunrise,
                transit,
                sunset,
            } => Ok((sunrise, transit, sunset)),
            SunriseResult::AllDay { .. } | SunriseResult::AllNight { .. } => {
                Err(AstroError::GeometryUnsolvable {
                    latitude: coordinate.latitude(),
                    date,
                })
            }
        }
    }

    /// Asr elevation angle from the single-shadow-length rule.
    ///
    /// An object's shadow at Asr equals its height plus the residual noon
    /// shadow: `cot(h) = 1 + tan(zenith_at_transit)`.
    fn asr_elevation(
        &self,
        coordinate: &Coordinate,
        date: NaiveDate,
        transit: DateTime<Utc>,
    ) -> Result<f64, AstroError> {
        let position = spa::solar_position(
            transit,
            coordinate.latitude(),
            coordinate.longitude(),
            0.0,
            Self::delta_t(date),
            None,
        )
        .map_err(|e| AstroError::Computation(e.to_string()))?;

        let noon_zenith = position.zenith_angle();
        if noon_zenith >= 90.0 {
            // Sun below the horizon at transit: no shadow geometry exists.
            return Err(AstroError::GeometryUnsolvable {
                latitude: coordinate.latitude(),
                date,
            });
        }

        let shadow = 1.0 + noon_zenith.to_radians().tan();
        Ok((1.0 / shadow).atan().to_degrees())
    }
}

impl AstronomicalEngine for SolarEngine {
    fn compute_baseline(
        &self,
        coordinate: &Coordinate,
        date: NaiveDate,
        method: CalculationMethod,
    ) -> Result<PrayerTimeSet, AstroError> {
        let (sunrise, transit, sunset) =
            self.crossings(coordinate, date, Horizon::SunriseSunset)?;

        let fajr = self.crossing_at_depression(
            coordinate,
            date,
            method.fajr_angle(),
            SolarCrossing::MorningAscent,
        )?;

        let asr_elevation = self.asr_elevation(coordinate, date, transit)?;
        let (_, _, asr) = self.crossings(coordinate, date, Horizon::Custom(asr_elevation))?;

        let isha = match method.isha_rule() {
            IshaRule::Angle(angle) => self.crossing_at_depression(
                coordinate,
                date,
                angle,
                SolarCrossing::EveningDescent,
            )?,
            IshaRule::FixedInterval(minutes) => sunset + Duration::minutes(minutes),
        };

        let set = PrayerTimeSet::new(fajr, sunrise, transit, asr, sunset, isha);
        if let Err(violation) = set.validate_ordering() {
            // Extreme latitudes can invert twilight marks even when every
            // individual crossing exists. Report rather than reorder.
            warn!(%violation, latitude = coordinate.latitude(), %date, "baseline ordering unsolvable");
            return Err(AstroError::GeometryUnsolvable {
                latitude: coordinate.latitude(),
                date,
            });
        }
        Ok(set)
    }

    fn crossing_at_depression(
        &self,
        coordinate: &Coordinate,
        date: NaiveDate,
        depression_deg: f64,
        crossing: SolarCrossing,
    ) -> Result<DateTime<Utc>, AstroError> {
        let (rise, _, set) =
            self.crossings(coordinate, date, Horizon::Custom(-depression_deg))?;
        Ok(match crossing {
            SolarCrossing::MorningAscent => rise,
            SolarCrossing::EveningDescent => set,
        })
    }
}
