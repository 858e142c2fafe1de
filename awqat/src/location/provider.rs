//! Location provider trait and types.

use crate::coord::Coordinate;
use chrono::FixedOffset;
use std::fmt;
use std::future::Future;

/// Resolved information about a coordinate.
#[derive(Debug, Clone, PartialEq)]
pub struct LocationInfo {
    /// Nearest city or locality name (may be empty for offline providers)
    pub city: String,
    /// Country name (may be empty for offline providers)
    pub country: String,
    /// The resolved coordinate
    pub coordinate: Coordinate,
    /// UTC offset in effect at this location
    pub utc_offset: FixedOffset,
}

/// A city search result.
#[derive(Debug, Clone, PartialEq)]
pub struct LocationCandidate {
    /// Locality name
    pub name: String,
    /// Country name
    pub country: String,
    /// Coordinate of the locality
    pub coordinate: Coordinate,
}

/// Errors from location providers.
#[derive(Debug, Clone)]
pub struct LocationError {
    /// Human-readable error message.
    pub message: String,
    /// Whether this error is transient (timeout, service hiccup) or
    /// permanent (won't succeed on retry).
    pub is_transient: bool,
}

impl LocationError {
    /// Creates a transient error (network timeout, temporary outage).
    pub fn transient(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            is_transient: true,
        }
    }

    /// Creates a permanent error (won't succeed on retry).
    pub fn permanent(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            is_transient: false,
        }
    }
}

impl fmt::Display for LocationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for LocationError {}

/// Trait for asynchronous location resolution.
///
/// Both operations are fallible and may be retried by the caller when the
/// error is transient. Implementations must not assume they run on any
/// particular runtime beyond `Send` futures.
pub trait LocationProvider: Send + Sync {
    /// Resolves a coordinate to locality information including the UTC
    /// offset in effect there.
    fn resolve(
        &self,
        coordinate: &Coordinate,
    ) -> impl Future<Output = Result<LocationInfo, LocationError>> + Send;

    /// Searches localities by free-text query.
    fn search_city(
        &self,
        query: &str,
    ) -> impl Future<Output = Result<Vec<LocationCandidate>, LocationError>> + Send;

    /// Returns the provider's name for logging.
    fn name(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transient_error() {
        let err = LocationError::transient("connection timed out");
        assert!(err.is_transient);
        assert_eq!(err.to_string(), "connection timed out");
    }

    #[test]
    fn test_permanent_error() {
        let err = LocationError::permanent("no locality at coordinate");
        assert!(!err.is_transient);
    }
}
