//! Concrete observer implementations.

use crossbeam_channel::Sender;
use tracing::{debug, info, warn};

use crate::observer::ProgressObserver;
use crate::progress::MapEvent;

/// Observer that sends events through a channel (non-blocking).
///
/// Events are dropped when the channel is full or disconnected.
pub struct ChannelObserver {
    sender: Sender<MapEvent>,
}

impl ChannelObserver {
    #[must_use]
    pub fn new(sender: Sender<MapEvent>) -> Self {
        Self { sender }
    }
}

impl ProgressObserver for ChannelObserver {
    fn on_event(&self, event: &MapEvent) {
        let _ = self.sender.try_send(event.clone());
    }
}

/// Observer that forwards events to `tracing`.
pub struct LoggingObserver;

impl LoggingObserver {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Default for LoggingObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressObserver for LoggingObserver {
    fn on_event(&self, event: &MapEvent) {
        match event {
            MapEvent::RunStarted { workers } => info!(workers, "Run started"),
            MapEvent::MapStarted { index, unit } => debug!(index, unit = %unit, "Map started"),
            MapEvent::MapFinished {
                index,
                unit,
                elapsed,
            } => debug!(index, unit = %unit, elapsed = ?elapsed, "Map finished"),
            MapEvent::MapFailed { index, unit, error } => {
                warn!(index, unit = %unit, error = %error, "Map failed");
            }
            MapEvent::Merged { index } => debug!(index, "Merged into accumulator"),
            MapEvent::RunFinished { success, elapsed } => {
                info!(success, elapsed = ?elapsed, "Run finished");
            }
        }
    }
}

/// Null object pattern: discards every event.
pub struct NoOpObserver;

impl NoOpObserver {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Default for NoOpObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressObserver for NoOpObserver {
    fn on_event(&self, _event: &MapEvent) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn noop_observer_does_nothing() {
        NoOpObserver::new().on_event(&MapEvent::RunStarted { workers: 1 });
    }

    #[test]
    fn channel_observer_sends() {
        let (tx, rx) = crossbeam_channel::bounded(10);
        let observer = ChannelObserver::new(tx);
        observer.on_event(&MapEvent::Merged { index: 3 });
        assert_eq!(rx.try_recv().unwrap(), MapEvent::Merged { index: 3 });
    }

    #[test]
    fn channel_observer_full_channel_does_not_block() {
        let (tx, rx) = crossbeam_channel::bounded(1);
        let observer = ChannelObserver::new(tx);
        observer.on_event(&MapEvent::Merged { index: 1 });
        observer.on_event(&MapEvent::Merged { index: 2 });
        assert_eq!(rx.len(), 1);
    }

    #[test]
    fn channel_observer_disconnected_does_not_panic() {
        let (tx, rx) = crossbeam_channel::bounded(1);
        drop(rx);
        ChannelObserver::new(tx).on_event(&MapEvent::Merged { index: 1 });
    }

    #[test]
    fn logging_observer_handles_every_event() {
        let observer = LoggingObserver::new();
        let events = [
            MapEvent::RunStarted { workers: 1 },
            MapEvent::MapStarted {
                index: 0,
                unit: "u".into(),
            },
            MapEvent::MapFinished {
                index: 0,
                unit: "u".into(),
                elapsed: Duration::from_millis(2),
            },
            MapEvent::MapFailed {
                index: 0,
                unit: "u".into(),
                error: "e".into(),
            },
            MapEvent::Merged { index: 0 },
            MapEvent::RunFinished {
                success: true,
                elapsed: Duration::from_millis(3),
            },
        ];
        for event in &events {
            observer.on_event(event);
        }
    }
}
