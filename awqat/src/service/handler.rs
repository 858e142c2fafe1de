//! Failure classification.

use crate::location::LocationError;
use crate::service::error::ServiceError;

/// What the orchestrator should do with a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// Transient; eligible for the retry mechanism.
    Recoverable,
    /// Serve the most recent matching cache entry, flagged stale.
    Degrade,
    /// Propagate to the caller untouched.
    Fatal,
}

/// Stateless failure classifier.
pub struct ErrorHandler;

impl ErrorHandler {
    /// Classifies a single failed attempt of a remote-dependent step,
    /// before the retry budget is spent.
    pub fn classify_attempt(error: &LocationError) -> ErrorClass {
        if error.is_transient {
            ErrorClass::Recoverable
        } else {
            ErrorClass::Fatal
        }
    }

    /// Classifies a request-level failure after retries are done.
    ///
    /// Exhausted transient I/O degrades to a stale cache entry when one
    /// exists for a relaxed key match, otherwise escalates to fatal.
    /// Cancellation is terminal but is the caller's own doing, so there is
    /// nothing to recover or degrade to.
    pub fn classify(error: &ServiceError, fallback_available: bool) -> ErrorClass {
        match error {
            ServiceError::TransientIo { .. } if fallback_available => ErrorClass::Degrade,
            ServiceError::TransientIo { .. } => ErrorClass::Fatal,
            ServiceError::InvalidInput(_)
            | ServiceError::GeometryUnsolvable { .. }
            | ServiceError::Computation(_)
            | ServiceError::Location(_)
            | ServiceError::Cancelled => ErrorClass::Fatal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn transient_exhausted() -> ServiceError {
        ServiceError::TransientIo {
            operation: "resolve location",
            attempts: 4,
            source: LocationError::transient("timeout"),
        }
    }

    #[test]
    fn test_attempt_classification() {
        assert_eq!(
            ErrorHandler::classify_attempt(&LocationError::transient("timeout")),
            ErrorClass::Recoverable
        );
        assert_eq!(
            ErrorHandler::classify_attempt(&LocationError::permanent("bad request")),
            ErrorClass::Fatal
        );
    }

    #[test]
    fn test_exhausted_transient_degrades_with_fallback() {
        assert_eq!(
            ErrorHandler::classify(&transient_exhausted(), true),
            ErrorClass::Degrade
        );
    }

    #[test]
    fn test_exhausted_transient_fatal_without_fallback() {
        assert_eq!(
            ErrorHandler::classify(&transient_exhausted(), false),
            ErrorClass::Fatal
        );
    }

    #[test]
    fn test_geometry_never_degrades() {
        let err = ServiceError::GeometryUnsolvable {
            latitude: 78.22,
            date: NaiveDate::from_ymd_opt(2024, 6, 21).unwrap(),
        };
        // Even with a cache entry available: a geometry error is a property
        // of the request, not of the environment.
        assert_eq!(ErrorHandler::classify(&err, true), ErrorClass::Fatal);
    }

    #[test]
    fn test_cancellation_is_fatal_class() {
        assert_eq!(
            ErrorHandler::classify(&ServiceError::Cancelled, true),
            ErrorClass::Fatal
        );
    }
}
