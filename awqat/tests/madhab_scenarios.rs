//! End-to-end madhab scenarios against the real solar engine.
//!
//! Exercises the full stack (offline location provider, SPA engine,
//! adjustment rules) for a fixed representative location: Qom, Iran
//! (34.6401 N, 50.8764 E).

use awqat::astro::{CalculationMethod, SolarEngine};
use awqat::cache::{CacheConfig, TimesCache};
use awqat::calendar::NoopCalendar;
use awqat::coord::Coordinate;
use awqat::location::StaticLocationProvider;
use awqat::madhab::Madhab;
use awqat::net::NetworkMonitor;
use awqat::prayer::Prayer;
use awqat::service::{
    ComputedTimes, PrayerTimeService, RequestConfig, ServiceConfig, ServiceError,
};
use chrono::{Duration, NaiveDate};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

fn qom() -> Coordinate {
    Coordinate::new(34.6401, 50.8764).unwrap()
}

fn fixed_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
}

fn build_service() -> PrayerTimeService<StaticLocationProvider, SolarEngine, NoopCalendar> {
    PrayerTimeService::new(
        StaticLocationProvider::new(),
        SolarEngine::new(),
        NoopCalendar,
        Arc::new(TimesCache::new(CacheConfig::default())),
        Arc::new(NetworkMonitor::new()),
        ServiceConfig::default(),
    )
}

async fn compute_on(
    service: &PrayerTimeService<StaticLocationProvider, SolarEngine, NoopCalendar>,
    madhab: Madhab,
    astronomical: bool,
    date: NaiveDate,
) -> ComputedTimes {
    let request = RequestConfig::new(CalculationMethod::MuslimWorldLeague, madhab, astronomical);
    service
        .calculate_prayer_times(qom(), date, &request, &CancellationToken::new())
        .await
        .unwrap()
}

async fn compute(
    service: &PrayerTimeService<StaticLocationProvider, SolarEngine, NoopCalendar>,
    madhab: Madhab,
    astronomical: bool,
) -> ComputedTimes {
    compute_on(service, madhab, astronomical, fixed_date()).await
}

#[tokio::test]
async fn test_jafari_fixed_maghrib_is_sunset_plus_15_minutes() {
    let service = build_service();

    let hanafi = compute(&service, Madhab::Hanafi, false).await;
    let jafari = compute(&service, Madhab::Jafari, false).await;

    // Hanafi Maghrib is the unadjusted sunset for the same inputs.
    assert_eq!(
        jafari.times.time(Prayer::Maghrib) - hanafi.times.time(Prayer::Maghrib),
        Duration::minutes(15)
    );
}

#[tokio::test]
async fn test_unadjusted_schools_share_every_mark() {
    let service = build_service();

    let hanafi = compute(&service, Madhab::Hanafi, false).await;
    let shafii = compute(&service, Madhab::Shafii, false).await;
    let jafari = compute(&service, Madhab::Jafari, false).await;

    assert_eq!(hanafi.times, shafii.times);

    // Ja'fari differs only in Maghrib.
    for prayer in [Prayer::Fajr, Prayer::Sunrise, Prayer::Dhuhr, Prayer::Asr, Prayer::Isha] {
        assert_eq!(jafari.times.time(prayer), hanafi.times.time(prayer));
    }
}

#[tokio::test]
async fn test_astronomical_mode_differs_from_fixed_mode_within_bounds() {
    let service = build_service();

    // A solstice date: the sun's descent through 4 degrees is slowest
    // there, putting the two modes furthest apart.
    let winter = NaiveDate::from_ymd_opt(2024, 12, 21).unwrap();
    let fixed = compute_on(&service, Madhab::Jafari, false, winter).await;
    let astronomical = compute_on(&service, Madhab::Jafari, true, winter).await;

    let difference = (astronomical.times.time(Prayer::Maghrib)
        - fixed.times.time(Prayer::Maghrib))
    .num_seconds()
    .abs();

    assert!(
        difference > 60,
        "modes must be distinguishable (difference {difference}s)"
    );
    assert!(
        difference < 1800,
        "astronomical Maghrib must stay near sunset (difference {difference}s)"
    );
}

#[tokio::test]
async fn test_astronomical_maghrib_follows_sunset() {
    let service = build_service();

    let hanafi = compute(&service, Madhab::Hanafi, false).await;
    let astronomical = compute(&service, Madhab::Jafari, true).await;

    assert!(
        astronomical.times.time(Prayer::Maghrib) > hanafi.times.time(Prayer::Maghrib),
        "a 4-degree descent ends after sunset"
    );
}

#[tokio::test]
async fn test_ordering_holds_for_all_schools_and_modes() {
    let service = build_service();

    for madhab in [
        Madhab::Hanafi,
        Madhab::Shafii,
        Madhab::Maliki,
        Madhab::Hanbali,
        Madhab::Jafari,
    ] {
        for astronomical in [false, true] {
            let result = compute(&service, madhab, astronomical).await;
            assert!(
                result.times.validate_ordering().is_ok(),
                "{madhab} astronomical={astronomical} must stay ordered (or have been clamped)"
            );
        }
    }
}

#[tokio::test]
async fn test_all_methods_solve_at_qom() {
    let service = build_service();

    for method in [
        CalculationMethod::MuslimWorldLeague,
        CalculationMethod::Egyptian,
        CalculationMethod::Karachi,
        CalculationMethod::UmmAlQura,
        CalculationMethod::NorthAmerica,
        CalculationMethod::Tehran,
    ] {
        let request = RequestConfig::new(method, Madhab::Shafii, false);
        let result = service
            .calculate_prayer_times(qom(), fixed_date(), &request, &CancellationToken::new())
            .await
            .unwrap();
        assert!(result.times.validate_ordering().is_ok(), "{method}");
    }
}

#[tokio::test]
async fn test_polar_latitude_reports_geometry_not_invalid_input() {
    let service = build_service();
    let svalbard = Coordinate::new(78.22, 15.65).unwrap();
    let midsummer = NaiveDate::from_ymd_opt(2024, 6, 21).unwrap();
    let request = RequestConfig::new(CalculationMethod::MuslimWorldLeague, Madhab::Shafii, false);

    let error = service
        .calculate_prayer_times(svalbard, midsummer, &request, &CancellationToken::new())
        .await
        .unwrap_err();

    assert!(
        matches!(error, ServiceError::GeometryUnsolvable { .. }),
        "polar geometry must be reported distinctly, got {error:?}"
    );
}
