//! Calendar service collaborator
//!
//! The Islamic calendar lives outside this crate; the orchestrator only
//! asks it read-only questions that influence display, never the
//! adjustment algorithm.

use chrono::NaiveDate;
use std::future::Future;

/// Read-only calendar queries.
pub trait CalendarService: Send + Sync {
    /// True when the date falls within a holy period worth annotating
    /// (Ramadan, the first ten days of Dhu al-Hijjah, ...). Implementations
    /// own the Hijri conversion; this crate treats the answer as opaque.
    fn is_holy_period(&self, date: NaiveDate) -> impl Future<Output = bool> + Send;
}

/// Calendar that annotates nothing.
///
/// The default when no calendar subsystem is wired in.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopCalendar;

impl CalendarService for NoopCalendar {
    async fn is_holy_period(&self, _date: NaiveDate) -> bool {
        false
    }
}
