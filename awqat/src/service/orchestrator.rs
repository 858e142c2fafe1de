//! Request orchestration.
//!
//! Composes Location → Astronomical Engine → Madhab Adjustment → Cache,
//! with retry and failure classification around the fallible steps. Each
//! request walks an explicit state machine; the cache is consulted before
//! any computation and written only after a fully successful adjustment
//! step.

use crate::astro::AstronomicalEngine;
use crate::cache::{CacheEntry, CacheKey, Singleflight, TimesCache};
use crate::calendar::CalendarService;
use crate::coord::Coordinate;
use crate::location::{LocationCandidate, LocationError, LocationInfo, LocationProvider};
use crate::madhab;
use crate::net::{NetworkMonitor, NetworkState};
use crate::prayer::{OrderingViolation, PrayerTimeSet};
use crate::retry::{self, RetryError};
use crate::service::config::{RequestConfig, ServiceConfig};
use crate::service::error::ServiceError;
use crate::service::handler::{ErrorClass, ErrorHandler};
use chrono::{NaiveDate, Utc};
use std::fmt;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// States a request moves through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestState {
    Idle,
    ResolvingLocation,
    Retrying,
    ComputingBaseline,
    ApplyingMadhabRules,
    Caching,
    Done,
    DegradedDone,
    Failed,
}

impl fmt::Display for RequestState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::ResolvingLocation => "resolving-location",
            Self::Retrying => "retrying",
            Self::ComputingBaseline => "computing-baseline",
            Self::ApplyingMadhabRules => "applying-madhab-rules",
            Self::Caching => "caching",
            Self::Done => "done",
            Self::DegradedDone => "degraded-done",
            Self::Failed => "failed",
        };
        write!(f, "{name}")
    }
}

fn enter(state: RequestState) {
    debug!(%state, "request state");
}

/// Where a returned result came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimesSource {
    /// Freshly computed this request
    Computed,
    /// Served from a valid cache entry
    Cached,
    /// Served from a stale cache entry after live computation failed
    StaleFallback,
}

impl TimesSource {
    /// True for results the caller should present as potentially outdated.
    pub fn is_stale(&self) -> bool {
        matches!(self, TimesSource::StaleFallback)
    }
}

/// A resolved day of prayer times plus provenance.
#[derive(Debug, Clone, PartialEq)]
pub struct ComputedTimes {
    /// The madhab-adjusted time set
    pub times: PrayerTimeSet,
    /// The location the times were computed for
    pub location: LocationInfo,
    /// Provenance: fresh, cached, or stale fallback
    pub source: TimesSource,
    /// Set when the Maghrib adjustment had to be clamped
    pub ordering_violation: Option<OrderingViolation>,
    /// Calendar annotation for display purposes
    pub holy_period: bool,
}

/// Prayer-time orchestrator.
///
/// Collaborators are injected (no ambient globals): the location provider
/// and engine are generic, the cache and network monitor are shared
/// context objects with process lifetime.
pub struct PrayerTimeService<L, E, C> {
    location_provider: L,
    engine: E,
    calendar: C,
    cache: Arc<TimesCache>,
    inflight: Singleflight,
    monitor: Arc<NetworkMonitor>,
    config: ServiceConfig,
}

impl<L, E, C> PrayerTimeService<L, E, C>
where
    L: LocationProvider,
    E: AstronomicalEngine,
    C: CalendarService,
{
    /// Creates a service around its collaborators.
    pub fn new(
        location_provider: L,
        engine: E,
        calendar: C,
        cache: Arc<TimesCache>,
        monitor: Arc<NetworkMonitor>,
        config: ServiceConfig,
    ) -> Self {
        Self {
            location_provider,
            engine,
            calendar,
            cache,
            inflight: Singleflight::new(),
            monitor,
            config,
        }
    }

    /// The shared times cache.
    pub fn cache(&self) -> &TimesCache {
        &self.cache
    }

    /// The shared network monitor.
    pub fn monitor(&self) -> &NetworkMonitor {
        &self.monitor
    }

    /// Computes the prayer times for one coordinate and civil date.
    ///
    /// Checks the cache first; on a miss, resolves the location (with
    /// retry, per-attempt timeout, and advisory network gating), computes
    /// the baseline, applies the madhab rules, caches, and returns. On
    /// exhausted transient failure the most recent matching cache entry is
    /// served flagged [`TimesSource::StaleFallback`]; fatal failures
    /// propagate.
    pub async fn calculate_prayer_times(
        &self,
        coordinate: Coordinate,
        date: NaiveDate,
        request: &RequestConfig,
        cancel: &CancellationToken,
    ) -> Result<ComputedTimes, ServiceError> {
        enter(RequestState::Idle);
        let key = CacheKey::new(
            coordinate.bucket(),
            date,
            request.method,
            request.madhab,
            request.astronomical_maghrib,
        );

        if let Some(entry) = self.cache.get(&key) {
            return self.finish_cached(entry, date).await;
        }

        // One computation per key: later arrivals wait here and then find
        // the winner's entry in the cache.
        let _guard = tokio::select! {
            guard = self.inflight.acquire(&key) => guard,
            _ = cancel.cancelled() => {
                enter(RequestState::Failed);
                return Err(ServiceError::Cancelled);
            }
        };
        if let Some(entry) = self.cache.get(&key) {
            return self.finish_cached(entry, date).await;
        }

        enter(RequestState::ResolvingLocation);
        let location = match self.resolve_location(&coordinate, cancel).await {
            Ok(location) => location,
            Err(error) => return self.handle_failure(&key, error, date).await,
        };

        if cancel.is_cancelled() {
            enter(RequestState::Failed);
            return Err(ServiceError::Cancelled);
        }

        enter(RequestState::ComputingBaseline);
        let baseline = match self
            .engine
            .compute_baseline(&coordinate, date, request.method)
        {
            Ok(baseline) => baseline,
            Err(error) => {
                return self.handle_failure(&key, error.into(), date).await;
            }
        };

        enter(RequestState::ApplyingMadhabRules);
        let adjusted = match madhab::adjust(
            &baseline,
            request.madhab,
            request.astronomical_maghrib,
            &self.engine,
            &coordinate,
            date,
        ) {
            Ok(adjusted) => adjusted,
            Err(error) => {
                return self.handle_failure(&key, error.into(), date).await;
            }
        };

        enter(RequestState::Caching);
        let entry = CacheEntry::new(adjusted.times, location.clone(), date, Utc::now());
        self.cache.put(key, entry);
        self.inflight.prune();

        enter(RequestState::Done);
        Ok(ComputedTimes {
            times: adjusted.times,
            location,
            source: TimesSource::Computed,
            ordering_violation: adjusted.violation,
            holy_period: self.calendar.is_holy_period(date).await,
        })
    }

    /// Searches localities by free text, with the same retry treatment as
    /// location resolution. There is no cache of candidates, so exhausted
    /// transient failures surface rather than degrade.
    pub async fn search_city(
        &self,
        query: &str,
        cancel: &CancellationToken,
    ) -> Result<Vec<LocationCandidate>, ServiceError> {
        let step_timeout = self.config.step_timeout;
        let provider = &self.location_provider;

        let result = retry::execute(
            &self.gated_policy(),
            cancel,
            Some(self.monitor.as_ref()),
            |e: &LocationError| ErrorHandler::classify_attempt(e) == ErrorClass::Recoverable,
            || async move {
                match tokio::time::timeout(step_timeout, provider.search_city(query)).await {
                    Ok(result) => result,
                    Err(_) => Err(LocationError::transient("city search timed out")),
                }
            },
        )
        .await;

        match result {
            Ok(candidates) => Ok(candidates),
            Err(RetryError::Cancelled) => Err(ServiceError::Cancelled),
            Err(RetryError::Permanent(source)) => Err(ServiceError::Location(source)),
            Err(RetryError::Exhausted { attempts, source }) => Err(ServiceError::TransientIo {
                operation: "search city",
                attempts,
                source,
            }),
        }
    }

    /// Location resolution step: retry with per-attempt timeout.
    async fn resolve_location(
        &self,
        coordinate: &Coordinate,
        cancel: &CancellationToken,
    ) -> Result<LocationInfo, ServiceError> {
        let step_timeout = self.config.step_timeout;
        let provider = &self.location_provider;
        let coordinate = *coordinate;
        let attempt_no = AtomicU32::new(0);

        let result = retry::execute(
            &self.gated_policy(),
            cancel,
            Some(self.monitor.as_ref()),
            |e: &LocationError| ErrorHandler::classify_attempt(e) == ErrorClass::Recoverable,
            || {
                let n = attempt_no.fetch_add(1, Ordering::Relaxed);
                async move {
                    if n > 0 {
                        enter(RequestState::Retrying);
                    }
                    match tokio::time::timeout(step_timeout, provider.resolve(&coordinate)).await {
                        Ok(result) => result,
                        Err(_) => Err(LocationError::transient("location resolution timed out")),
                    }
                }
            },
        )
        .await;

        match result {
            Ok(location) => Ok(location),
            Err(RetryError::Cancelled) => Err(ServiceError::Cancelled),
            Err(RetryError::Permanent(source)) => Err(ServiceError::Location(source)),
            Err(RetryError::Exhausted { attempts, source }) => Err(ServiceError::TransientIo {
                operation: "resolve location",
                attempts,
                source,
            }),
        }
    }

    /// Retry policy, reduced to a single attempt while the network reads
    /// disconnected. Advisory: the one attempt still runs, the state may
    /// simply be late.
    fn gated_policy(&self) -> crate::retry::RetryPolicy {
        if self.monitor.state() == NetworkState::Disconnected {
            debug!("network reported disconnected, limiting to a single attempt");
            self.config.retry.clone().with_max_attempts(1)
        } else {
            self.config.retry.clone()
        }
    }

    /// Terminal handling of a failed step: degrade to a stale fallback
    /// when the classification allows, otherwise fail.
    async fn handle_failure(
        &self,
        key: &CacheKey,
        error: ServiceError,
        date: NaiveDate,
    ) -> Result<ComputedTimes, ServiceError> {
        let fallback = self.cache.find_fallback(key);
        match (
            ErrorHandler::classify(&error, fallback.is_some()),
            fallback,
        ) {
            (ErrorClass::Degrade, Some((fallback_key, entry))) => {
                warn!(
                    %error,
                    fallback_date = %fallback_key.date,
                    "serving stale cache fallback"
                );
                enter(RequestState::DegradedDone);
                Ok(ComputedTimes {
                    times: entry.times,
                    location: entry.location,
                    source: TimesSource::StaleFallback,
                    ordering_violation: None,
                    holy_period: self.calendar.is_holy_period(date).await,
                })
            }
            _ => {
                enter(RequestState::Failed);
                Err(error)
            }
        }
    }

    async fn finish_cached(
        &self,
        entry: CacheEntry,
        date: NaiveDate,
    ) -> Result<ComputedTimes, ServiceError> {
        enter(RequestState::Done);
        Ok(ComputedTimes {
            times: entry.times,
            location: entry.location,
            source: TimesSource::Cached,
            ordering_violation: None,
            holy_period: self.calendar.is_holy_period(date).await,
        })
    }
}
