//! Progress events emitted by the executor.

use std::time::Duration;

/// Lifecycle event of a map-reduce run.
///
/// `index` is the worker's position in enumeration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MapEvent {
    /// Fan-out is about to start.
    RunStarted {
        /// Number of workers in the run.
        workers: usize,
    },
    /// A map thread started.
    MapStarted { index: usize, unit: String },
    /// A map thread completed successfully.
    MapFinished {
        index: usize,
        unit: String,
        elapsed: Duration,
    },
    /// A map thread failed or panicked.
    MapFailed {
        index: usize,
        unit: String,
        error: String,
    },
    /// Worker `index` was merged into the accumulator.
    Merged { index: usize },
    /// The run finished, successfully or not.
    RunFinished { success: bool, elapsed: Duration },
}

impl MapEvent {
    /// Worker index the event concerns, if any.
    #[must_use]
    pub fn index(&self) -> Option<usize> {
        match self {
            Self::MapStarted { index, .. }
            | Self::MapFinished { index, .. }
            | Self::MapFailed { index, .. }
            | Self::Merged { index } => Some(*index),
            Self::RunStarted { .. } | Self::RunFinished { .. } => None,
        }
    }

    /// Whether this event ends a map thread.
    #[must_use]
    pub fn is_map_terminal(&self) -> bool {
        matches!(self, Self::MapFinished { .. } | Self::MapFailed { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_of_worker_events() {
        let ev = MapEvent::MapStarted {
            index: 2,
            unit: "u".into(),
        };
        assert_eq!(ev.index(), Some(2));
        assert_eq!(MapEvent::Merged { index: 4 }.index(), Some(4));
        assert_eq!(MapEvent::RunStarted { workers: 3 }.index(), None);
    }

    #[test]
    fn terminal_map_events() {
        let done = MapEvent::MapFinished {
            index: 0,
            unit: "u".into(),
            elapsed: Duration::from_millis(1),
        };
        let failed = MapEvent::MapFailed {
            index: 0,
            unit: "u".into(),
            error: "boom".into(),
        };
        assert!(done.is_map_terminal());
        assert!(failed.is_map_terminal());
        assert!(!MapEvent::Merged { index: 0 }.is_map_terminal());
    }
}
