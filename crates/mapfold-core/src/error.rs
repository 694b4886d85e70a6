//! Error types for workers and for the map-reduce engine.

use std::io;

/// Failure raised by a single worker, either from `map()` or `reduce()`.
#[derive(Debug, thiserror::Error)]
pub enum WorkerError {
    /// The input unit could not be read.
    #[error("failed to read input: {0}")]
    Read(#[from] io::Error),

    /// The input was read but its contents could not be processed.
    #[error("malformed input: {0}")]
    Malformed(String),

    /// `reduce()` was called on a worker whose `map()` has not completed.
    #[error("worker has no partial result (map has not completed)")]
    NotMapped,

    /// The merge itself failed.
    #[error("merge failed: {0}")]
    Merge(String),
}

/// Error type for a whole map-reduce run.
///
/// Every variant that concerns a particular worker carries the index of that
/// worker in enumeration order and the identifier of its input unit.
#[derive(Debug, thiserror::Error)]
pub enum MapReduceError {
    /// The input source could not enumerate its units.
    #[error("failed to discover inputs at {location}: {source}")]
    Discovery {
        /// Location that was being enumerated.
        location: String,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },

    /// The input source yielded no units.
    #[error("input source yielded no units")]
    EmptyInput,

    /// A worker's `map()` failed.
    #[error("map failed for unit #{index} ({unit}): {source}")]
    Compute {
        /// Index of the worker in enumeration order.
        index: usize,
        /// Identifier of the worker's input unit.
        unit: String,
        /// The worker's failure.
        #[source]
        source: WorkerError,
    },

    /// The operating system refused to start a map thread.
    #[error("failed to spawn map thread for unit #{index} ({unit}): {source}")]
    Spawn {
        /// Index of the worker in enumeration order.
        index: usize,
        /// Identifier of the worker's input unit.
        unit: String,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },

    /// A worker's map thread panicked.
    #[error("map panicked for unit #{index} ({unit})")]
    Panicked {
        /// Index of the worker in enumeration order.
        index: usize,
        /// Identifier of the worker's input unit.
        unit: String,
    },

    /// Merging a worker into the accumulator failed.
    #[error("reduce failed merging unit #{index} ({unit}): {source}")]
    Merge {
        /// Index of the worker being merged into the accumulator.
        index: usize,
        /// Identifier of that worker's input unit.
        unit: String,
        /// The merge failure.
        #[source]
        source: WorkerError,
    },

    /// Configuration was missing or invalid.
    #[error("configuration error: {0}")]
    Config(String),
}

impl MapReduceError {
    /// Index of the worker this error pertains to, if any.
    #[must_use]
    pub fn worker_index(&self) -> Option<usize> {
        match self {
            Self::Compute { index, .. }
            | Self::Spawn { index, .. }
            | Self::Panicked { index, .. }
            | Self::Merge { index, .. } => Some(*index),
            Self::Discovery { .. } | Self::EmptyInput | Self::Config(_) => None,
        }
    }
}
