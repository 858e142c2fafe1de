//! Offline location provider.

use crate::coord::Coordinate;
use crate::location::provider::{
    LocationCandidate, LocationError, LocationInfo, LocationProvider,
};
use chrono::FixedOffset;
use tracing::debug;

/// Offline provider that estimates the UTC offset from longitude.
///
/// Uses the nautical convention of one hour per 15 degrees. This is wrong
/// wherever political timezones diverge from solar time, but it needs no
/// network and never fails, which makes it the CLI default and the
/// degraded-environment fallback.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticLocationProvider;

impl StaticLocationProvider {
    /// Creates a new offline provider.
    pub fn new() -> Self {
        Self
    }

    fn estimate_offset(longitude: f64) -> FixedOffset {
        let hours = (longitude / 15.0).round() as i32;
        FixedOffset::east_opt(hours * 3600).expect("longitude bounds keep the offset valid")
    }
}

impl LocationProvider for StaticLocationProvider {
    async fn resolve(&self, coordinate: &Coordinate) -> Result<LocationInfo, LocationError> {
        Ok(LocationInfo {
            city: String::new(),
            country: String::new(),
            coordinate: *coordinate,
            utc_offset: Self::estimate_offset(coordinate.longitude()),
        })
    }

    async fn search_city(&self, query: &str) -> Result<Vec<LocationCandidate>, LocationError> {
        debug!(query, "static provider has no search index");
        Ok(Vec::new())
    }

    fn name(&self) -> &str {
        "static"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_resolve_estimates_offset_from_longitude() {
        let provider = StaticLocationProvider::new();

        let qom = Coordinate::new(34.6401, 50.8764).unwrap();
        let info = provider.resolve(&qom).await.unwrap();
        // 50.88 / 15 rounds to 3 hours east.
        assert_eq!(info.utc_offset, FixedOffset::east_opt(3 * 3600).unwrap());
        assert_eq!(info.coordinate, qom);

        let nyc = Coordinate::new(40.7128, -74.0060).unwrap();
        let info = provider.resolve(&nyc).await.unwrap();
        assert_eq!(info.utc_offset, FixedOffset::east_opt(-5 * 3600).unwrap());
    }

    #[tokio::test]
    async fn test_resolve_never_fails_on_extremes() {
        let provider = StaticLocationProvider::new();
        for lon in [-180.0, -7.5, 0.0, 7.49, 180.0] {
            let coord = Coordinate::new(0.0, lon).unwrap();
            assert!(provider.resolve(&coord).await.is_ok(), "lon {lon}");
        }
    }

    #[tokio::test]
    async fn test_search_returns_empty() {
        let provider = StaticLocationProvider::new();
        assert!(provider.search_city("qom").await.unwrap().is_empty());
    }
}
