//! Awqat - Islamic prayer-time calculation with a resilient service layer
//!
//! This library computes prayer times from sun geometry, adjusts them per
//! jurisprudential school (madhab), and wraps the computation in a
//! caching/retry layer that degrades gracefully under network and
//! location failures.
//!
//! # Architecture
//!
//! ```text
//! Location Provider ──┐
//!                     ▼
//!        PrayerTimeService (orchestrator)
//!          │ cache-first, single-flight per key
//!          ▼
//!        SolarEngine ──► Madhab rules ──► TimesCache
//! ```
//!
//! # High-Level API
//!
//! ```ignore
//! use awqat::coord::Coordinate;
//! use awqat::service::{PrayerTimeService, RequestConfig, ServiceConfig};
//!
//! let service = PrayerTimeService::new(
//!     location_provider,
//!     engine,
//!     calendar,
//!     cache,
//!     monitor,
//!     ServiceConfig::default(),
//! );
//! let times = service
//!     .calculate_prayer_times(coordinate, date, &request, &cancel)
//!     .await?;
//! ```

/// Astronomical baseline computation: calculation methods, the engine
/// seam, and the SPA-backed [`SolarEngine`](astro::SolarEngine).
pub mod astro;

/// Prayer-time cache keyed by (bucket, date, method, madhab, mode), with
/// single-flight computation guards.
pub mod cache;

/// Calendar service collaborator (opaque, display-only queries).
pub mod calendar;

/// INI-backed configuration with per-key defaults.
pub mod config;

/// Validated geographic coordinates and cache bucketing.
pub mod coord;

/// Location resolution collaborators.
pub mod location;

/// Tracing initialization (file + stdout).
pub mod logging;

/// Jurisprudential schools and Maghrib adjustment rules.
pub mod madhab;

/// Advisory network-state monitoring.
pub mod net;

/// Prayer names and daily time sets.
pub mod prayer;

/// Bounded exponential-backoff retry.
pub mod retry;

/// The orchestrating prayer-time service.
pub mod service;

/// Version of the awqat library and CLI.
///
/// Synchronized across the workspace; defined in `Cargo.toml` and
/// injected at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
