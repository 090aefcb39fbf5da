//! Single-writer, latest-value-wins channel carrying the alert state to the
//! presentation layer.

use std::sync::{Arc, Condvar, Mutex, PoisonError};
use std::time::Duration;

use crate::domain::AlertState;

/// One published alert state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusUpdate {
    /// The alert state.
    pub state: AlertState,
    /// Frame that produced this state; `None` at session start and end.
    pub frame: Option<u64>,
    /// Increases by one with every publish. Version 0 is the initial value.
    pub version: u64,
}

struct Cell {
    latest: StatusUpdate,
    closed: bool,
}

struct Shared {
    cell: Mutex<Cell>,
    changed: Condvar,
}

/// Creates a connected publisher and watcher, starting at
/// [`AlertState::Monitoring`].
#[must_use]
pub fn status_channel() -> (StatusPublisher, StatusWatcher) {
    let shared = Arc::new(Shared {
        cell: Mutex::new(Cell {
            latest: StatusUpdate {
                state: AlertState::Monitoring,
                frame: None,
                version: 0,
            },
            closed: false,
        }),
        changed: Condvar::new(),
    });
    (
        StatusPublisher {
            shared: Arc::clone(&shared),
        },
        StatusWatcher { shared },
    )
}

/// The writing half. Not cloneable: there is exactly one writer.
pub struct StatusPublisher {
    shared: Arc<Shared>,
}

impl StatusPublisher {
    /// Replaces the latest value and wakes all watchers. Returns the new
    /// version.
    pub fn publish(&self, state: AlertState, frame: Option<u64>) -> u64 {
        let mut cell = self
            .shared
            .cell
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let version = cell.latest.version + 1;
        cell.latest = StatusUpdate {
            state,
            frame,
            version,
        };
        drop(cell);
        self.shared.changed.notify_all();
        version
    }
}

impl Drop for StatusPublisher {
    fn drop(&mut self) {
        self.shared
            .cell
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .closed = true;
        self.shared.changed.notify_all();
    }
}

/// A read-only view of the latest alert state.
#[derive(Clone)]
pub struct StatusWatcher {
    shared: Arc<Shared>,
}

impl StatusWatcher {
    /// The most recently published value.
    #[must_use]
    pub fn latest(&self) -> StatusUpdate {
        self.shared
            .cell
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .latest
    }

    /// Returns true once the publisher is gone.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.shared
            .cell
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .closed
    }

    /// Waits up to `timeout` for a value newer than version `seen`.
    ///
    /// Returns `None` on timeout, or when the publisher closed without
    /// publishing anything newer.
    #[must_use]
    pub fn wait_newer(&self, seen: u64, timeout: Duration) -> Option<StatusUpdate> {
        let guard = self
            .shared
            .cell
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let (cell, _) = self
            .shared
            .changed
            .wait_timeout_while(guard, timeout, |c| c.latest.version <= seen && !c.closed)
            .unwrap_or_else(PoisonError::into_inner);
        (cell.latest.version > seen).then_some(cell.latest)
    }
}

#[cfg(test)]
mod tests {
    use std::thread;

    use super::*;

    #[test]
    fn test_initial_value() {
        let (_publisher, watcher) = status_channel();
        let initial = watcher.latest();
        assert_eq!(initial.state, AlertState::Monitoring);
        assert_eq!(initial.version, 0);
        assert!(initial.frame.is_none());
    }

    #[test]
    fn test_latest_value_wins() {
        let (publisher, watcher) = status_channel();
        publisher.publish(AlertState::Alerting, Some(1));
        publisher.publish(AlertState::Alerting, Some(2));
        let version = publisher.publish(AlertState::Monitoring, Some(3));

        let latest = watcher.latest();
        assert_eq!(latest.state, AlertState::Monitoring);
        assert_eq!(latest.frame, Some(3));
        assert_eq!(latest.version, version);
        assert_eq!(version, 3);
    }

    #[test]
    fn test_wait_newer_times_out() {
        let (_publisher, watcher) = status_channel();
        assert!(watcher
            .wait_newer(0, Duration::from_millis(10))
            .is_none());
    }

    #[test]
    fn test_wait_newer_sees_publish_from_other_thread() {
        let (publisher, watcher) = status_channel();
        let handle = thread::spawn(move || {
            publisher.publish(AlertState::Alerting, Some(5));
        });

        let update = watcher.wait_newer(0, Duration::from_secs(5));
        handle.join().unwrap_or_else(|_| panic!("publisher panicked"));
        assert_eq!(update.map(|u| u.state), Some(AlertState::Alerting));
    }

    #[test]
    fn test_closed_after_publisher_dropped() {
        let (publisher, watcher) = status_channel();
        publisher.publish(AlertState::Alerting, None);
        drop(publisher);

        assert!(watcher.is_closed());
        // The last value is still delivered once.
        let last = watcher.wait_newer(0, Duration::from_secs(1));
        assert_eq!(last.map(|u| u.version), Some(1));
        assert!(watcher.wait_newer(1, Duration::from_secs(1)).is_none());
    }

    #[test]
    fn test_watchers_share_state() {
        let (publisher, watcher) = status_channel();
        let other = watcher.clone();
        publisher.publish(AlertState::Alerting, Some(0));
        assert_eq!(watcher.latest(), other.latest());
    }
}
