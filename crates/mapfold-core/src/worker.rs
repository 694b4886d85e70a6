//! Worker trait consumed by orchestration.
//!
//! A worker owns exactly one input unit and a partial result slot. The
//! executor calls `map()` once per worker on its own thread, then folds the
//! workers left to right with `reduce()` on the caller's thread.

use crate::error::WorkerError;

/// Map/reduce logic over a single input unit.
pub trait Worker: Send + Sized {
    /// Partial and final result type.
    type Output: Send;

    /// Identifier of the wrapped input unit, used to attribute failures.
    fn unit_id(&self) -> &str;

    /// Read the input unit and store the partial result.
    ///
    /// Called exactly once. Must not touch state shared with other workers.
    fn map(&mut self) -> Result<(), WorkerError>;

    /// Merge `other`'s partial result into this one.
    ///
    /// Both workers must have completed `map()`. `other` is consumed, so a
    /// worker can never be merged into two accumulators.
    fn reduce(&mut self, other: Self) -> Result<(), WorkerError>;

    /// The partial result, if `map()` has completed.
    fn result(&self) -> Option<&Self::Output>;

    /// Consume the worker and return its partial result.
    fn into_result(self) -> Option<Self::Output>;
}
