//! Connectivity state holder.

use std::fmt;
use tokio::sync::watch;
use tracing::info;

/// Process-wide connectivity state.
///
/// Updated asynchronously and possibly late relative to true
/// connectivity; readers must treat it as advisory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NetworkState {
    /// Connectivity was recently confirmed.
    Connected,
    /// Connectivity was recently ruled out.
    Disconnected,
    /// No probe has reported yet.
    #[default]
    Unknown,
}

impl fmt::Display for NetworkState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Connected => write!(f, "Connected"),
            Self::Disconnected => write!(f, "Disconnected"),
            Self::Unknown => write!(f, "Unknown"),
        }
    }
}

/// Shared-read, single-writer connectivity holder.
///
/// The monitor daemon is the only component that publishes; everything
/// else reads a snapshot via [`NetworkMonitor::state`] or follows changes
/// via [`NetworkMonitor::subscribe`].
pub struct NetworkMonitor {
    tx: watch::Sender<NetworkState>,
}

impl NetworkMonitor {
    /// Creates a monitor starting in [`NetworkState::Unknown`].
    pub fn new() -> Self {
        let (tx, _) = watch::channel(NetworkState::default());
        Self { tx }
    }

    /// Current state snapshot.
    pub fn state(&self) -> NetworkState {
        *self.tx.borrow()
    }

    /// Subscribes to state changes.
    pub fn subscribe(&self) -> watch::Receiver<NetworkState> {
        self.tx.subscribe()
    }

    /// Publishes a new state. Single writer: only the monitor daemon (or
    /// a test standing in for it) should call this.
    pub fn publish(&self, state: NetworkState) {
        self.tx.send_if_modified(|current| {
            if *current == state {
                return false;
            }
            info!(from = %current, to = %state, "network state changed");
            *current = state;
            true
        });
    }
}

impl Default for NetworkMonitor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_unknown() {
        let monitor = NetworkMonitor::new();
        assert_eq!(monitor.state(), NetworkState::Unknown);
    }

    #[test]
    fn test_publish_updates_snapshot() {
        let monitor = NetworkMonitor::new();
        monitor.publish(NetworkState::Connected);
        assert_eq!(monitor.state(), NetworkState::Connected);

        monitor.publish(NetworkState::Disconnected);
        assert_eq!(monitor.state(), NetworkState::Disconnected);
    }

    #[tokio::test]
    async fn test_subscribers_see_changes() {
        let monitor = NetworkMonitor::new();
        let mut rx = monitor.subscribe();

        monitor.publish(NetworkState::Connected);
        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow(), NetworkState::Connected);
    }

    #[tokio::test]
    async fn test_republishing_same_state_is_silent() {
        let monitor = NetworkMonitor::new();
        monitor.publish(NetworkState::Connected);

        let mut rx = monitor.subscribe();
        rx.mark_unchanged();
        monitor.publish(NetworkState::Connected);
        assert!(!rx.has_changed().unwrap());
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", NetworkState::Connected), "Connected");
        assert_eq!(format!("{}", NetworkState::Unknown), "Unknown");
    }
}
