//! Astronomical prayer-time computation
//!
//! The hard part, sun-angle geometry, is consumed from the
//! `solar-positioning` SPA solver; this module adapts it to the prayer
//! domain: named calculation methods, the [`AstronomicalEngine`] seam, and
//! the production [`SolarEngine`].

mod engine;
mod method;
mod solar;

pub use engine::{AstroError, AstronomicalEngine, SolarCrossing};
pub use method::{CalculationMethod, IshaRule, UnknownMethod};
pub use solar::SolarEngine;
