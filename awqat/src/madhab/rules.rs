//! Per-prayer adjustment of a baseline time set.

use crate::astro::{AstroError, AstronomicalEngine, SolarCrossing};
use crate::coord::Coordinate;
use crate::madhab::school::{Madhab, MaghribRule};
use crate::prayer::{OrderingViolation, Prayer, PrayerTimeSet};
use chrono::{Duration, NaiveDate};
use tracing::warn;

/// A single adjustment applied to one prayer's baseline time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TimeAdjustment {
    /// Shift the baseline time by a fixed offset.
    FixedOffset(Duration),
    /// Recompute the time at an alternate sun-depression angle,
    /// holding every other mark from the baseline.
    DepressionAngle(f64),
}

/// Table of `{prayer → adjustment}` entries for one request.
///
/// Today only Maghrib ever receives an entry, but the table is the
/// extension point for future per-prayer overrides, so the apply loop is
/// written against entries, not against Maghrib.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AdjustmentTable {
    entries: Vec<(Prayer, TimeAdjustment)>,
}

impl AdjustmentTable {
    /// Builds the table for a school and mode toggle.
    ///
    /// Schools without a delay rule produce an empty table; for delayed
    /// schools the active parameter is selected by
    /// `use_astronomical_maghrib`, so at most one of the two parameters is
    /// ever in play.
    pub fn for_madhab(madhab: Madhab, use_astronomical_maghrib: bool) -> Self {
        let mut entries = Vec::new();
        if let MaghribRule::Delayed {
            minutes,
            depression_deg,
        } = madhab.maghrib_rule()
        {
            let adjustment = if use_astronomical_maghrib {
                TimeAdjustment::DepressionAngle(depression_deg)
            } else {
                TimeAdjustment::FixedOffset(Duration::minutes(minutes))
            };
            entries.push((Prayer::Maghrib, adjustment));
        }
        Self { entries }
    }

    /// Returns true if no prayer receives an adjustment.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over `(prayer, adjustment)` entries.
    pub fn iter(&self) -> impl Iterator<Item = &(Prayer, TimeAdjustment)> {
        self.entries.iter()
    }
}

/// Result of applying madhab rules to a baseline.
#[derive(Debug, Clone, PartialEq)]
pub struct AdjustedTimes {
    /// The adjusted (or pass-through) time set
    pub times: PrayerTimeSet,
    /// Set when an adjustment had to be clamped to preserve ordering
    pub violation: Option<OrderingViolation>,
}

/// Applies a school's rules to a baseline time set.
///
/// Pure with respect to its inputs: the same arguments always produce the
/// same output. A school without configured adjustments returns the
/// baseline unchanged. An adjustment that would push a prayer past its
/// successor is clamped to one minute before the successor and reported as
/// a non-fatal [`OrderingViolation`].
pub fn adjust(
    baseline: &PrayerTimeSet,
    madhab: Madhab,
    use_astronomical_maghrib: bool,
    engine: &impl AstronomicalEngine,
    coordinate: &Coordinate,
    date: NaiveDate,
) -> Result<AdjustedTimes, AstroError> {
    let table = AdjustmentTable::for_madhab(madhab, use_astronomical_maghrib);
    if table.is_empty() {
        return Ok(AdjustedTimes {
            times: *baseline,
            violation: None,
        });
    }

    let mut times = *baseline;
    let mut violation = None;

    for (prayer, adjustment) in table.iter() {
        let adjusted = match adjustment {
            TimeAdjustment::FixedOffset(offset) => times.time(*prayer) + *offset,
            TimeAdjustment::DepressionAngle(angle) => engine.crossing_at_depression(
                coordinate,
                date,
                *angle,
                SolarCrossing::EveningDescent,
            )?,
        };

        let adjusted = match prayer.next() {
            Some(successor) if adjusted >= times.time(successor) => {
                let clamped = times.time(successor) - Duration::minutes(1);
                let reported = OrderingViolation {
                    earlier: *prayer,
                    later: successor,
                    earlier_time: adjusted,
                    later_time: times.time(successor),
                };
                warn!(%madhab, %reported, "adjustment clamped to preserve ordering");
                violation = Some(reported);
                clamped
            }
            _ => adjusted,
        };

        times = times.with_time(*prayer, adjusted);
    }

    Ok(AdjustedTimes { times, violation })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone, Utc};

    /// Engine double returning a scripted evening crossing.
    struct FixedCrossingEngine {
        evening: DateTime<Utc>,
    }

    impl AstronomicalEngine for FixedCrossingEngine {
        fn compute_baseline(
            &self,
            _coordinate: &Coordinate,
            _date: NaiveDate,
            _method: crate::astro::CalculationMethod,
        ) -> Result<PrayerTimeSet, AstroError> {
            unreachable!("adjust() never recomputes the baseline")
        }

        fn crossing_at_depression(
            &self,
            _coordinate: &Coordinate,
            _date: NaiveDate,
            _depression_deg: f64,
            _crossing: SolarCrossing,
        ) -> Result<DateTime<Utc>, AstroError> {
            Ok(self.evening)
        }
    }

    fn t(h: u32, m: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 15, h, m, 0).unwrap()
    }

    fn baseline() -> PrayerTimeSet {
        PrayerTimeSet::new(t(1, 30), t(2, 55), t(8, 40), t(12, 10), t(14, 45), t(16, 0))
    }

    fn qom() -> Coordinate {
        Coordinate::new(34.6401, 50.8764).unwrap()
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
    }

    fn engine_at(h: u32, m: u32) -> FixedCrossingEngine {
        FixedCrossingEngine { evening: t(h, m) }
    }

    #[test]
    fn test_schools_without_rule_pass_through() {
        for madhab in [Madhab::Hanafi, Madhab::Shafii, Madhab::Maliki, Madhab::Hanbali] {
            for astronomical in [false, true] {
                let result = adjust(
                    &baseline(),
                    madhab,
                    astronomical,
                    &engine_at(15, 5),
                    &qom(),
                    date(),
                )
                .unwrap();
                assert_eq!(result.times, baseline(), "{madhab} must not modify times");
                assert!(result.violation.is_none());
            }
        }
    }

    #[test]
    fn test_jafari_fixed_delay_is_exactly_15_minutes() {
        let result = adjust(
            &baseline(),
            Madhab::Jafari,
            false,
            &engine_at(15, 5),
            &qom(),
            date(),
        )
        .unwrap();

        assert_eq!(
            result.times.time(Prayer::Maghrib) - baseline().time(Prayer::Maghrib),
            Duration::minutes(15)
        );
        assert!(result.violation.is_none());
    }

    #[test]
    fn test_jafari_fixed_delay_leaves_other_prayers() {
        let result = adjust(
            &baseline(),
            Madhab::Jafari,
            false,
            &engine_at(15, 5),
            &qom(),
            date(),
        )
        .unwrap();

        for prayer in [Prayer::Fajr, Prayer::Sunrise, Prayer::Dhuhr, Prayer::Asr, Prayer::Isha] {
            assert_eq!(result.times.time(prayer), baseline().time(prayer));
        }
    }

    #[test]
    fn test_jafari_astronomical_uses_engine_crossing() {
        let result = adjust(
            &baseline(),
            Madhab::Jafari,
            true,
            &engine_at(15, 8),
            &qom(),
            date(),
        )
        .unwrap();

        assert_eq!(result.times.time(Prayer::Maghrib), t(15, 8));
        assert!(result.violation.is_none());
    }

    #[test]
    fn test_fixed_delay_clamps_at_isha() {
        // Isha at 14:55 leaves only 10 minutes of room for the 15-minute delay.
        let tight = baseline().with_time(Prayer::Isha, t(14, 55));
        let result = adjust(
            &tight,
            Madhab::Jafari,
            false,
            &engine_at(15, 5),
            &qom(),
            date(),
        )
        .unwrap();

        assert_eq!(result.times.time(Prayer::Maghrib), t(14, 54));
        let violation = result.violation.expect("clamp must be reported");
        assert_eq!(violation.earlier, Prayer::Maghrib);
        assert_eq!(violation.later, Prayer::Isha);
        assert!(result.times.validate_ordering().is_ok());
    }

    #[test]
    fn test_astronomical_clamps_at_isha() {
        // Scripted crossing lands past Isha.
        let result = adjust(
            &baseline(),
            Madhab::Jafari,
            true,
            &engine_at(16, 30),
            &qom(),
            date(),
        )
        .unwrap();

        assert_eq!(result.times.time(Prayer::Maghrib), t(15, 59));
        assert!(result.violation.is_some());
        assert!(result.times.validate_ordering().is_ok());
    }

    #[test]
    fn test_deterministic() {
        let a = adjust(
            &baseline(),
            Madhab::Jafari,
            false,
            &engine_at(15, 5),
            &qom(),
            date(),
        )
        .unwrap();
        let b = adjust(
            &baseline(),
            Madhab::Jafari,
            false,
            &engine_at(15, 5),
            &qom(),
            date(),
        )
        .unwrap();

        assert_eq!(a, b);
    }

    #[test]
    fn test_table_shape() {
        assert!(AdjustmentTable::for_madhab(Madhab::Hanafi, false).is_empty());
        assert!(AdjustmentTable::for_madhab(Madhab::Hanafi, true).is_empty());

        let fixed = AdjustmentTable::for_madhab(Madhab::Jafari, false);
        assert_eq!(
            fixed.iter().next(),
            Some(&(Prayer::Maghrib, TimeAdjustment::FixedOffset(Duration::minutes(15))))
        );

        let astronomical = AdjustmentTable::for_madhab(Madhab::Jafari, true);
        assert_eq!(
            astronomical.iter().next(),
            Some(&(Prayer::Maghrib, TimeAdjustment::DepressionAngle(4.0)))
        );
    }
}
