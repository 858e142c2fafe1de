//! Background connectivity probing.

use crate::net::monitor::{NetworkMonitor, NetworkState};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Trait for connectivity checks.
///
/// A probe answers "does the network look usable right now?" however it
/// can: a socket connect, a platform API, or a fixed answer in tests.
pub trait ConnectivityProbe: Send + Sync + 'static {
    /// Performs one connectivity check.
    fn probe(&self) -> impl Future<Output = NetworkState> + Send;
}

/// Probe that always reports a fixed state.
///
/// The offline default (CLI, tests): report `Connected` so the advisory
/// gate never suppresses attempts, or any scripted state a test needs.
#[derive(Debug, Clone, Copy)]
pub struct StaticProbe(pub NetworkState);

impl ConnectivityProbe for StaticProbe {
    async fn probe(&self) -> NetworkState {
        self.0
    }
}

/// Background task that keeps a [`NetworkMonitor`] current.
///
/// Polls the probe on an interval and publishes transitions until shut
/// down. The daemon is the monitor's single writer.
pub struct NetworkMonitorDaemon {
    handle: JoinHandle<()>,
    cancel: CancellationToken,
}

impl NetworkMonitorDaemon {
    /// Spawns the probe loop on the current runtime.
    ///
    /// The first probe runs immediately so the monitor leaves `Unknown`
    /// without waiting a full interval.
    pub fn spawn<P: ConnectivityProbe>(
        monitor: Arc<NetworkMonitor>,
        probe: P,
        interval: Duration,
    ) -> Self {
        let cancel = CancellationToken::new();
        let loop_cancel = cancel.clone();

        let handle = tokio::spawn(async move {
            loop {
                let state = probe.probe().await;
                monitor.publish(state);

                tokio::select! {
                    _ = loop_cancel.cancelled() => {
                        debug!("network monitor daemon shutting down");
                        break;
                    }
                    _ = tokio::time::sleep(interval) => {}
                }
            }
        });

        Self { handle, cancel }
    }

    /// Stops the probe loop and waits for it to exit.
    pub async fn shutdown(self) {
        self.cancel.cancel();
        let _ = self.handle.await;
    }
}
