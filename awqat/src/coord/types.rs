//! Coordinate type definitions

use std::fmt;

/// Valid latitude range
pub const MIN_LAT: f64 = -90.0;
pub const MAX_LAT: f64 = 90.0;

/// Valid longitude range
pub const MIN_LON: f64 = -180.0;
pub const MAX_LON: f64 = 180.0;

/// Quantization step for cache bucketing, in degrees (~1.1 km at the equator).
pub const BUCKET_STEP_DEG: f64 = 0.01;

/// A validated geographic coordinate in decimal degrees.
///
/// Construction via [`Coordinate::new`] enforces the range invariants, so
/// any `Coordinate` held by the rest of the system is known valid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    latitude: f64,
    longitude: f64,
}

impl Coordinate {
    /// Creates a coordinate, validating both axes.
    ///
    /// # Arguments
    ///
    /// * `latitude` - Degrees north, -90.0 to 90.0
    /// * `longitude` - Degrees east, -180.0 to 180.0
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, CoordError> {
        if !latitude.is_finite() || !(MIN_LAT..=MAX_LAT).contains(&latitude) {
            return Err(CoordError::InvalidLatitude(latitude));
        }
        if !longitude.is_finite() || !(MIN_LON..=MAX_LON).contains(&longitude) {
            return Err(CoordError::InvalidLongitude(longitude));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Latitude in decimal degrees.
    #[inline]
    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Longitude in decimal degrees.
    #[inline]
    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Returns the quantized cache bucket containing this coordinate.
    ///
    /// Nearby coordinates map to the same bucket so that they share cache
    /// entries. The step is [`BUCKET_STEP_DEG`].
    #[inline]
    pub fn bucket(&self) -> CoordBucket {
        CoordBucket {
            lat_centi: (self.latitude / BUCKET_STEP_DEG).round() as i32,
            lon_centi: (self.longitude / BUCKET_STEP_DEG).round() as i32,
        }
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.4}, {:.4})", self.latitude, self.longitude)
    }
}

/// Quantized coordinate used as part of a cache key.
///
/// Stored as integer centidegrees so the key is `Eq + Hash` without
/// floating-point comparison caveats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CoordBucket {
    /// Latitude in centidegrees (rounded)
    pub lat_centi: i32,
    /// Longitude in centidegrees (rounded)
    pub lon_centi: i32,
}

impl CoordBucket {
    /// Returns the bucket center as decimal degrees.
    pub fn center(&self) -> (f64, f64) {
        (
            self.lat_centi as f64 * BUCKET_STEP_DEG,
            self.lon_centi as f64 * BUCKET_STEP_DEG,
        )
    }
}

impl fmt::Display for CoordBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (lat, lon) = self.center();
        write!(f, "[{:.2}, {:.2}]", lat, lon)
    }
}

/// Errors that can occur during coordinate validation.
#[derive(Debug, Clone, PartialEq)]
pub enum CoordError {
    /// Latitude is outside the valid range (-90.0 to 90.0) or not finite
    InvalidLatitude(f64),
    /// Longitude is outside the valid range (-180.0 to 180.0) or not finite
    InvalidLongitude(f64),
}

impl fmt::Display for CoordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoordError::InvalidLatitude(lat) => {
                write!(
                    f,
                    "Invalid latitude: {} (must be between {} and {})",
                    lat, MIN_LAT, MAX_LAT
                )
            }
            CoordError::InvalidLongitude(lon) => {
                write!(
                    f,
                    "Invalid longitude: {} (must be between {} and {})",
                    lon, MIN_LON, MAX_LON
                )
            }
        }
    }
}

impl std::error::Error for CoordError {}
