//! Orchestration interfaces.

use std::time::Duration;

use serde::Serialize;

use mapfold_core::CountKind;

/// Outcome of a successful run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunReport<T> {
    /// Aggregated result held by the accumulator after fan-in.
    pub output: T,
    /// Number of workers that took part.
    pub workers: usize,
    /// Wall-clock time of fan-out plus fan-in.
    pub duration: Duration,
}

/// Trait for presenting results to the user.
pub trait ResultPresenter: Send + Sync {
    /// Present the result of a counting run.
    fn present_result(&self, kind: CountKind, report: &RunReport<u64>);

    /// Present an error.
    fn present_error(&self, error: &str);
}

/// Presenter that discards everything.
pub struct NullPresenter;

impl ResultPresenter for NullPresenter {
    fn present_result(&self, _kind: CountKind, _report: &RunReport<u64>) {}
    fn present_error(&self, _error: &str) {}
}
