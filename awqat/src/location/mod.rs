//! Location resolution collaborators
//!
//! The orchestrator consumes location data through the [`LocationProvider`]
//! trait; implementations may be remote geocoders (fallible, retryable) or
//! the offline [`StaticLocationProvider`].

mod provider;
mod static_provider;

pub use provider::{LocationCandidate, LocationError, LocationInfo, LocationProvider};
pub use static_provider::StaticLocationProvider;
