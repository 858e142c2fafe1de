//! Service error taxonomy.

use crate::astro::AstroError;
use crate::coord::CoordError;
use crate::location::LocationError;
use chrono::NaiveDate;
use thiserror::Error;

/// Errors surfaced by the prayer-time service.
///
/// Only `InvalidInput`, `GeometryUnsolvable`, and an exhausted
/// `TransientIo` with no cache fallback ever reach callers as hard
/// failures; everything else resolves to a usable (possibly stale-flagged)
/// result inside the orchestrator.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Malformed request inputs. Fatal; retrying cannot help.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The sun never reaches the required geometry at this latitude and
    /// date (polar day/night). Fatal and deliberately distinct from
    /// `InvalidInput` so callers can explain the astronomy to users.
    #[error("No solvable sun geometry for latitude {latitude} on {date}")]
    GeometryUnsolvable { latitude: f64, date: NaiveDate },

    /// The astronomical solver rejected the computation. Fatal.
    #[error("Astronomical computation failed: {0}")]
    Computation(String),

    /// A remote-dependent step kept failing transiently until the retry
    /// budget ran out.
    #[error("{operation} failed after {attempts} attempts: {source}")]
    TransientIo {
        operation: &'static str,
        attempts: u32,
        source: LocationError,
    },

    /// The location provider reported a permanent failure. Fatal.
    #[error("Location provider error: {0}")]
    Location(LocationError),

    /// The caller cancelled the request. Terminal, propagated untouched.
    #[error("Request cancelled")]
    Cancelled,
}

impl From<CoordError> for ServiceError {
    fn from(e: CoordError) -> Self {
        Self::InvalidInput(e.to_string())
    }
}

impl From<AstroError> for ServiceError {
    fn from(e: AstroError) -> Self {
        match e {
            AstroError::GeometryUnsolvable { latitude, date } => {
                Self::GeometryUnsolvable { latitude, date }
            }
            AstroError::Computation(message) => Self::Computation(message),
        }
    }
}
