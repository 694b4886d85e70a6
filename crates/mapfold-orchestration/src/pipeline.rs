//! Composed entry point: generate → build → run.

use tracing::info;

use mapfold_core::config::Config;
use mapfold_core::error::MapReduceError;
use mapfold_core::input::InputSource;
use mapfold_core::worker::Worker;

use crate::executor::Executor;
use crate::factory::WorkerFactory;
use crate::interfaces::RunReport;

/// Enumerate `source`, build one worker per unit, and run them.
///
/// Fails with [`MapReduceError::EmptyInput`] without starting any thread
/// when the source yields no units.
///
/// # Example
/// ```
/// use mapfold_core::{Config, CountWorker, MemorySource};
/// use mapfold_orchestration::factory::WorkerFactory;
/// use mapfold_orchestration::pipeline::run_map_reduce;
///
/// let source = MemorySource::from_strs([("a", "x\n"), ("b", "y\nz\n")]);
/// let lines = run_map_reduce(&source, &WorkerFactory::new(CountWorker::lines), &Config::new());
/// assert_eq!(lines.unwrap(), 3);
/// ```
pub fn run_map_reduce<S, F, W>(
    source: &S,
    factory: &WorkerFactory<F>,
    config: &Config,
) -> Result<W::Output, MapReduceError>
where
    S: InputSource,
    F: Fn(S::Unit) -> W,
    W: Worker,
{
    run_map_reduce_with(&Executor::new(), source, factory, config).map(|report| report.output)
}

/// Like [`run_map_reduce`], on a caller-supplied executor, returning the
/// full [`RunReport`].
pub fn run_map_reduce_with<S, F, W>(
    executor: &Executor,
    source: &S,
    factory: &WorkerFactory<F>,
    config: &Config,
) -> Result<RunReport<W::Output>, MapReduceError>
where
    S: InputSource,
    F: Fn(S::Unit) -> W,
    W: Worker,
{
    let workers = factory.build(source, config)?;
    if workers.is_empty() {
        return Err(MapReduceError::EmptyInput);
    }
    info!(workers = workers.len(), "Discovered input units");
    executor.run_with_report(workers)
}
