//! Core types for the prayer-time cache.

use crate::astro::CalculationMethod;
use crate::coord::CoordBucket;
use crate::location::LocationInfo;
use crate::madhab::Madhab;
use crate::prayer::PrayerTimeSet;
use chrono::{DateTime, NaiveDate, Utc};

/// Cache key uniquely identifying one computed day of times.
///
/// Every input that changes the output is part of the key, so a key's
/// value is computation-deterministic: recomputing the same key always
/// yields the same times.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    /// Quantized coordinate bucket
    pub bucket: CoordBucket,
    /// Civil date the times belong to
    pub date: NaiveDate,
    /// Astronomical convention
    pub method: CalculationMethod,
    /// Jurisprudential school
    pub madhab: Madhab,
    /// Whether the astronomical-Maghrib mode was active
    pub astronomical_maghrib: bool,
}

impl CacheKey {
    /// Creates a cache key.
    pub fn new(
        bucket: CoordBucket,
        date: NaiveDate,
        method: CalculationMethod,
        madhab: Madhab,
        astronomical_maghrib: bool,
    ) -> Self {
        Self {
            bucket,
            date,
            method,
            madhab,
            astronomical_maghrib,
        }
    }

    /// True when `other` differs only in its date.
    ///
    /// This is the relaxed match used for stale-fallback lookup.
    pub fn same_except_date(&self, other: &CacheKey) -> bool {
        self.bucket == other.bucket
            && self.method == other.method
            && self.madhab == other.madhab
            && self.astronomical_maghrib == other.astronomical_maghrib
    }
}

/// A cached day of prayer times.
#[derive(Debug, Clone, PartialEq)]
pub struct CacheEntry {
    /// The computed, madhab-adjusted times
    pub times: PrayerTimeSet,
    /// Resolved location the times were computed for
    pub location: LocationInfo,
    /// When the computation finished
    pub computed_at: DateTime<Utc>,
    /// Staleness horizon: end of the represented civil day in the
    /// entry's local offset, expressed in UTC
    pub expires_at: DateTime<Utc>,
}

impl CacheEntry {
    /// Creates an entry whose staleness horizon is the end of `date` in
    /// the resolved location's UTC offset.
    pub fn new(
        times: PrayerTimeSet,
        location: LocationInfo,
        date: NaiveDate,
        computed_at: DateTime<Utc>,
    ) -> Self {
        let expires_at = end_of_local_day(date, &location);
        Self {
            times,
            location,
            computed_at,
            expires_at,
        }
    }

    /// True once the staleness horizon has passed.
    #[inline]
    pub fn is_stale(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

/// End of a civil day in a location's UTC offset, as a UTC instant.
fn end_of_local_day(date: NaiveDate, location: &LocationInfo) -> DateTime<Utc> {
    let next_midnight = date
        .succ_opt()
        .unwrap_or(date)
        .and_hms_opt(0, 0, 0)
        .expect("midnight is always a valid time")
        .and_utc();
    next_midnight - chrono::Duration::seconds(location.utc_offset.local_minus_utc() as i64)
}

/// Cache configuration.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Maximum number of entries kept; oldest-expiring entries are
    /// evicted beyond this
    pub capacity: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self { capacity: 512 }
    }
}

impl CacheConfig {
    /// Creates a configuration with the given entry capacity.
    pub fn new(capacity: usize) -> Self {
        Self { capacity }
    }
}
