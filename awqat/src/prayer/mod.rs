//! Prayer names and daily time sets
//!
//! Defines the [`Prayer`] enumeration and the [`PrayerTimeSet`] holding one
//! civil day of computed times, with the strictly-increasing ordering
//! invariant enforced through [`PrayerTimeSet::validate_ordering`].

mod times;

pub use times::{OrderingViolation, Prayer, PrayerTimeSet};
