//! # mapfold-orchestration
//!
//! Worker construction, fan-out/fan-in execution, and worker selection.

pub mod executor;
pub mod factory;
pub mod interfaces;
pub mod pipeline;
pub mod selection;

pub use executor::Executor;
pub use factory::WorkerFactory;
pub use interfaces::{ResultPresenter, RunReport};
pub use pipeline::{run_map_reduce, run_map_reduce_with};
