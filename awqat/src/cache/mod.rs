//! Prayer-time cache
//!
//! Stores computed time sets keyed by (coordinate bucket, date, method,
//! madhab, adjustment mode). Entries are valid until the end of their
//! civil day in the entry's local offset; stale entries read as absent.
//! The [`Singleflight`] guard ensures at most one computation per key is
//! in flight across concurrent requests.

mod singleflight;
mod stats;
mod store;
mod types;

pub use singleflight::Singleflight;
pub use stats::{CacheStats, CacheStatsSnapshot};
pub use store::TimesCache;
pub use types::{CacheConfig, CacheEntry, CacheKey};
