//! Awqat CLI - Command-line interface
//!
//! This binary provides a command-line interface to the awqat library:
//! it computes one day of prayer times for a coordinate and prints them
//! in the location's UTC offset.

use awqat::astro::SolarEngine;
use awqat::cache::{CacheConfig, TimesCache};
use awqat::calendar::NoopCalendar;
use awqat::config::{self, Settings};
use awqat::coord::Coordinate;
use awqat::location::StaticLocationProvider;
use awqat::net::{NetworkMonitor, NetworkMonitorDaemon, NetworkState, StaticProbe};
use awqat::service::{ComputedTimes, PrayerTimeService, RequestConfig, ServiceConfig};
use chrono::{NaiveDate, Utc};
use clap::Parser;
use std::path::PathBuf;
use std::process;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

#[derive(Parser)]
#[command(name = "awqat")]
#[command(version = awqat::VERSION)]
#[command(about = "Compute Islamic prayer times for a location and date", long_about = None)]
struct Args {
    /// Latitude in decimal degrees
    #[arg(long, allow_hyphen_values = true)]
    lat: f64,

    /// Longitude in decimal degrees
    #[arg(long, allow_hyphen_values = true)]
    lon: f64,

    /// Civil date (YYYY-MM-DD); defaults to today
    #[arg(long)]
    date: Option<NaiveDate>,

    /// Jurisprudential school (hanafi, shafii, maliki, hanbali, jafari)
    #[arg(long)]
    madhab: Option<String>,

    /// Calculation method (mwl, egyptian, karachi, umm-al-qura, isna, tehran)
    #[arg(long)]
    method: Option<String>,

    /// Use the astronomical Maghrib angle instead of the fixed delay
    #[arg(long)]
    astronomical_maghrib: bool,

    /// Path to an INI config file
    #[arg(long)]
    config: Option<PathBuf>,
}

fn load_settings(args: &Args) -> Result<Settings, String> {
    let mut settings = match &args.config {
        Some(path) => config::load_from_file(path).map_err(|e| e.to_string())?,
        None => config::defaults::settings(),
    };

    if let Some(raw) = &args.madhab {
        settings.calculation.madhab = raw.parse().map_err(|e| format!("{e}"))?;
    }
    if let Some(raw) = &args.method {
        settings.calculation.method = raw.parse().map_err(|e| format!("{e}"))?;
    }
    if args.astronomical_maghrib {
        settings.calculation.astronomical_maghrib = true;
    }
    Ok(settings)
}

fn print_times(result: &ComputedTimes, date: NaiveDate) {
    let offset = result.location.utc_offset;
    println!("Prayer times for {} on {} (UTC{})", result.location.coordinate, date, offset);

    for (prayer, time) in result.times.iter() {
        println!(
            "  {:<8} {}",
            prayer.to_string(),
            time.with_timezone(&offset).format("%H:%M")
        );
    }

    if result.source.is_stale() {
        println!("  (stale: served from cache after a live computation failure)");
    }
    if let Some(violation) = &result.ordering_violation {
        println!("  (adjustment clamped: {violation})");
    }
    if result.holy_period {
        println!("  (holy period)");
    }
}

async fn run(args: Args) -> Result<(), String> {
    let settings = load_settings(&args)?;

    let _logging_guard = awqat::logging::init_logging(
        &settings.logging.directory,
        &settings.logging.file,
    )
    .map_err(|e| format!("Failed to initialize logging: {e}"))?;

    let coordinate = Coordinate::new(args.lat, args.lon).map_err(|e| e.to_string())?;
    let date = args.date.unwrap_or_else(|| Utc::now().date_naive());

    let cache = Arc::new(TimesCache::new(CacheConfig::new(settings.cache.capacity)));
    let monitor = Arc::new(NetworkMonitor::new());
    let daemon = NetworkMonitorDaemon::spawn(
        monitor.clone(),
        StaticProbe(NetworkState::Connected),
        Duration::from_secs(60),
    );

    let service = PrayerTimeService::new(
        StaticLocationProvider::new(),
        SolarEngine::new(),
        NoopCalendar,
        cache,
        monitor,
        ServiceConfig::new().with_retry(settings.retry.to_policy()),
    );

    let request = RequestConfig::from(settings.calculation);
    let cancel = CancellationToken::new();

    let result = service
        .calculate_prayer_times(coordinate, date, &request, &cancel)
        .await
        .map_err(|e| e.to_string())?;

    print_times(&result, date);

    daemon.shutdown().await;
    Ok(())
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    if let Err(message) = run(args).await {
        eprintln!("Error: {message}");
        process::exit(1);
    }
}
