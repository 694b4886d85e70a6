//! Worker construction from an input source.

use tracing::debug;

use mapfold_core::config::Config;
use mapfold_core::error::MapReduceError;
use mapfold_core::input::InputSource;
use mapfold_core::worker::Worker;

/// Builds one worker per input unit through an explicit constructor.
///
/// Order is preserved: the i-th unit yielded by the source becomes the
/// i-th worker, which fixes both map indexing and reduce order.
///
/// # Example
/// ```
/// use mapfold_core::{Config, CountWorker, MemorySource};
/// use mapfold_orchestration::factory::WorkerFactory;
///
/// let source = MemorySource::from_strs([("a", "1\n"), ("b", "2\n3\n")]);
/// let factory = WorkerFactory::new(CountWorker::lines);
/// let workers = factory.build(&source, &Config::new()).unwrap();
/// assert_eq!(workers.len(), 2);
/// ```
pub struct WorkerFactory<F> {
    constructor: F,
}

impl<F> WorkerFactory<F> {
    /// Create a factory around a constructor taking one input unit.
    pub fn new(constructor: F) -> Self {
        Self { constructor }
    }

    /// Enumerate `source` with `config` and build one worker per unit.
    ///
    /// The first discovery failure aborts the build. An empty source
    /// yields an empty vector.
    pub fn build<S, W>(&self, source: &S, config: &Config) -> Result<Vec<W>, MapReduceError>
    where
        S: InputSource,
        F: Fn(S::Unit) -> W,
        W: Worker,
    {
        let units = source.generate(config)?;
        let workers = units
            .map(|unit| unit.map(&self.constructor))
            .collect::<Result<Vec<W>, _>>()?;
        debug!(workers = workers.len(), "Built workers");
        Ok(workers)
    }

    /// Build workers from units that were already enumerated.
    pub fn from_units<U, W>(&self, units: impl IntoIterator<Item = U>) -> Vec<W>
    where
        F: Fn(U) -> W,
        W: Worker,
    {
        units.into_iter().map(&self.constructor).collect()
    }
}
