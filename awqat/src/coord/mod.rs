//! Geographic coordinate module
//!
//! Provides the validated [`Coordinate`] type used throughout the calculation
//! pipeline and the quantized [`CoordBucket`] used for cache keying.

mod types;

pub use types::{Coordinate, CoordBucket, CoordError, BUCKET_STEP_DEG, MAX_LAT, MAX_LON, MIN_LAT, MIN_LON};
