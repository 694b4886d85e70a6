//! Fan-out/fan-in execution of a fixed list of workers.
//!
//! 1. **Fan-out**: one scoped OS thread per worker runs `map()`. Every
//!    thread is spawned before any is joined.
//! 2. **Barrier**: all threads are joined, failed or not. Map failures do
//!    not cancel siblings.
//! 3. **Fan-in**: if every map succeeded, the first worker becomes the
//!    accumulator and the others are merged into it strictly in their
//!    original order on the caller's thread.
//!
//! The reduce order depends only on the order of the input vector, never on
//! map completion order, so non-commutative merges are reproducible.

use std::sync::Arc;
use std::thread;
use std::time::Instant;

use tracing::warn;

use mapfold_core::constants::MAP_THREAD_PREFIX;
use mapfold_core::error::{MapReduceError, WorkerError};
use mapfold_core::observer::ProgressObserver;
use mapfold_core::observers::NoOpObserver;
use mapfold_core::progress::MapEvent;
use mapfold_core::worker::Worker;

use crate::interfaces::RunReport;

/// Runs the fan-out/fan-in protocol.
#[derive(Clone)]
pub struct Executor {
    observer: Arc<dyn ProgressObserver>,
}

impl Executor {
    /// Create an executor that reports to no one.
    #[must_use]
    pub fn new() -> Self {
        Self {
            observer: Arc::new(NoOpObserver::new()),
        }
    }

    /// Report progress events to `observer`.
    #[must_use]
    pub fn with_observer(mut self, observer: Arc<dyn ProgressObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// Run all workers and return the aggregated result.
    ///
    /// `workers` must be non-empty; an empty vector is rejected with
    /// [`MapReduceError::EmptyInput`] before any thread is started.
    pub fn run<W: Worker>(&self, workers: Vec<W>) -> Result<W::Output, MapReduceError> {
        self.run_with_report(workers).map(|report| report.output)
    }

    /// Like [`run`](Self::run), also returning worker count and timing.
    pub fn run_with_report<W: Worker>(
        &self,
        mut workers: Vec<W>,
    ) -> Result<RunReport<W::Output>, MapReduceError> {
        if workers.is_empty() {
            return Err(MapReduceError::EmptyInput);
        }

        let start = Instant::now();
        let count = workers.len();
        self.observer.on_event(&MapEvent::RunStarted { workers: count });

        let outcome = self
            .fan_out(&mut workers)
            .and_then(|()| self.fan_in(workers));

        let duration = start.elapsed();
        self.observer.on_event(&MapEvent::RunFinished {
            success: outcome.is_ok(),
            elapsed: duration,
        });

        let output = outcome?;
        Ok(RunReport {
            output,
            workers: count,
            duration,
        })
    }

    /// Map every worker on its own thread and wait for all of them.
    ///
    /// Returns the failure with the lowest worker index, if any.
    fn fan_out<W: Worker>(&self, workers: &mut [W]) -> Result<(), MapReduceError> {
        let observer: &dyn ProgressObserver = self.observer.as_ref();

        let outcomes: Vec<Result<(), MapReduceError>> = thread::scope(|s| {
            let spawned: Vec<_> = workers
                .iter_mut()
                .enumerate()
                .map(|(index, worker)| {
                    let unit = worker.unit_id().to_owned();
                    let handle = thread::Builder::new()
                        .name(format!("{MAP_THREAD_PREFIX}-{index}"))
                        .spawn_scoped(s, move || map_worker(index, worker, observer));
                    (index, unit, handle)
                })
                .collect();

            // Barrier: every thread is joined before any outcome is used.
            spawned
                .into_iter()
                .map(|(index, unit, handle)| match handle {
                    Ok(handle) => handle.join().unwrap_or_else(|_| {
                        observer.on_event(&MapEvent::MapFailed {
                            index,
                            unit: unit.clone(),
                            error: "panicked".into(),
                        });
                        Err(MapReduceError::Panicked { index, unit })
                    }),
                    Err(source) => Err(MapReduceError::Spawn {
                        index,
                        unit,
                        source,
                    }),
                })
                .collect()
        });

        let mut first_error = None;
        let mut failed = 0usize;
        for outcome in outcomes {
            if let Err(err) = outcome {
                failed += 1;
                first_error.get_or_insert(err);
            }
        }

        match first_error {
            Some(err) => {
                warn!(failed, "Skipping fan-in after map failures");
                Err(err)
            }
            None => Ok(()),
        }
    }

    /// Fold workers left to right into the first one.
    fn fan_in<W: Worker>(&self, workers: Vec<W>) -> Result<W::Output, MapReduceError> {
        let mut rest = workers.into_iter().enumerate();
        let Some((_, mut accumulator)) = rest.next() else {
            return Err(MapReduceError::EmptyInput);
        };

        for (index, worker) in rest {
            let unit = worker.unit_id().to_owned();
            accumulator
                .reduce(worker)
                .map_err(|source| MapReduceError::Merge {
                    index,
                    unit,
                    source,
                })?;
            self.observer.on_event(&MapEvent::Merged { index });
        }

        let unit = accumulator.unit_id().to_owned();
        accumulator
            .into_result()
            .ok_or(MapReduceError::Compute {
                index: 0,
                unit,
                source: WorkerError::NotMapped,
            })
    }
}

impl Default for Executor {
    fn default() -> Self {
        Self::new()
    }
}

fn map_worker<W: Worker>(
    index: usize,
    worker: &mut W,
    observer: &dyn ProgressObserver,
) -> Result<(), MapReduceError> {
    let unit = worker.unit_id().to_owned();
    observer.on_event(&MapEvent::MapStarted {
        index,
        unit: unit.clone(),
    });

    let start = Instant::now();
    match worker.map() {
        Ok(()) => {
            observer.on_event(&MapEvent::MapFinished {
                index,
                unit,
                elapsed: start.elapsed(),
            });
            Ok(())
        }
        Err(source) => {
            observer.on_event(&MapEvent::MapFailed {
                index,
                unit: unit.clone(),
                error: source.to_string(),
            });
            Err(MapReduceError::Compute {
                index,
                unit,
                source,
            })
        }
    }
}
