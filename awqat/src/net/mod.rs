//! Network state awareness
//!
//! Tracks connectivity as advisory state: a reported `Disconnected` lets
//! callers skip attempts that are doomed anyway, but no operation treats
//! `Connected` as a guarantee.

mod daemon;
mod monitor;

pub use daemon::{ConnectivityProbe, NetworkMonitorDaemon, StaticProbe};
pub use monitor::{NetworkMonitor, NetworkState};
