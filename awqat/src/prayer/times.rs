//! Prayer enumeration and daily time set.

use chrono::{DateTime, Utc};
use std::fmt;

/// The six daily prayer marks, in chronological order.
///
/// `Sunrise` is not a prayer but is always computed and reported alongside
/// the five prayers, matching common prayer-timetable conventions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Prayer {
    Fajr,
    Sunrise,
    Dhuhr,
    Asr,
    Maghrib,
    Isha,
}

impl Prayer {
    /// All prayer marks in chronological order.
    pub const ALL: [Prayer; 6] = [
        Prayer::Fajr,
        Prayer::Sunrise,
        Prayer::Dhuhr,
        Prayer::Asr,
        Prayer::Maghrib,
        Prayer::Isha,
    ];

    /// Position of this prayer in the chronological order (0-5).
    #[inline]
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// The prayer mark that follows this one, if any.
    pub fn next(&self) -> Option<Prayer> {
        Prayer::ALL.get(self.index() + 1).copied()
    }
}

impl fmt::Display for Prayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Prayer::Fajr => write!(f, "Fajr"),
            Prayer::Sunrise => write!(f, "Sunrise"),
            Prayer::Dhuhr => write!(f, "Dhuhr"),
            Prayer::Asr => write!(f, "Asr"),
            Prayer::Maghrib => write!(f, "Maghrib"),
            Prayer::Isha => write!(f, "Isha"),
        }
    }
}

/// An ordering inversion between two adjacent prayer marks.
///
/// Produced when a time set violates the strictly-increasing invariant.
/// Non-fatal when raised by the adjustment layer (the offending time is
/// clamped); fatal when raised for a freshly computed baseline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrderingViolation {
    /// The earlier prayer in canonical order
    pub earlier: Prayer,
    /// The later prayer in canonical order
    pub later: Prayer,
    /// Time computed for the earlier prayer
    pub earlier_time: DateTime<Utc>,
    /// Time computed for the later prayer
    pub later_time: DateTime<Utc>,
}

impl fmt::Display for OrderingViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} at {} is not before {} at {}",
            self.earlier, self.earlier_time, self.later, self.later_time
        )
    }
}

impl std::error::Error for OrderingViolation {}

/// Computed prayer times for one civil day at one location.
///
/// Times are stored as UTC instants; presentation in a local offset is the
/// caller's concern. The set is an ordered collection: iteration and the
/// ordering check both follow [`Prayer::ALL`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PrayerTimeSet {
    times: [DateTime<Utc>; 6],
}

impl PrayerTimeSet {
    /// Creates a time set from the six prayer marks in chronological order.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        fajr: DateTime<Utc>,
        sunrise: DateTime<Utc>,
        dhuhr: DateTime<Utc>,
        asr: DateTime<Utc>,
        maghrib: DateTime<Utc>,
        isha: DateTime<Utc>,
    ) -> Self {
        Self {
            times: [fajr, sunrise, dhuhr, asr, maghrib, isha],
        }
    }

    /// Returns the time for the given prayer mark.
    #[inline]
    pub fn time(&self, prayer: Prayer) -> DateTime<Utc> {
        self.times[prayer.index()]
    }

    /// Returns a copy of this set with one prayer's time replaced.
    pub fn with_time(&self, prayer: Prayer, time: DateTime<Utc>) -> Self {
        let mut times = self.times;
        times[prayer.index()] = time;
        Self { times }
    }

    /// Iterates over `(prayer, time)` pairs in chronological order.
    pub fn iter(&self) -> impl Iterator<Item = (Prayer, DateTime<Utc>)> + '_ {
        Prayer::ALL.iter().map(move |p| (*p, self.time(*p)))
    }

    /// Checks the strictly-increasing ordering invariant.
    ///
    /// Returns the first adjacent inversion found, scanning in canonical
    /// order. Equal timestamps count as a violation: each mark must be
    /// strictly later than its predecessor.
    pub fn validate_ordering(&self) -> Result<(), OrderingViolation> {
        for pair in Prayer::ALL.windows(2) {
            let (earlier, later) = (pair[0], pair[1]);
            if self.time(earlier) >= self.time(later) {
                return Err(OrderingViolation {
                    earlier,
                    later,
                    earlier_time: self.time(earlier),
                    later_time: self.time(later),
                });
            }
        }
        Ok(())
    }
}
