//! # mapfold-core
//!
//! Building blocks for the mapfold fan-out/fan-in engine: the `InputUnit`,
//! `InputSource` and `Worker` traits, the opaque run `Config`, the error
//! taxonomy, built-in file and memory inputs, a counting worker, and
//! progress events with their observers.

pub mod config;
pub mod constants;
pub mod count;
pub mod error;
pub mod input;
pub mod inputs;
pub mod observer;
pub mod observers;
pub mod progress;
pub mod worker;

// Re-exports
pub use config::Config;
pub use constants::exit_codes;
pub use count::{CountKind, CountWorker};
pub use error::{MapReduceError, WorkerError};
pub use input::{InputSource, InputUnit};
pub use inputs::{
    ByteRangeInput, ChunkedFileSource, DirectorySource, MemoryInput, MemorySource, PathInput,
};
pub use observer::{ProgressObserver, ProgressSubject};
pub use observers::{ChannelObserver, LoggingObserver, NoOpObserver};
pub use progress::MapEvent;
pub use worker::Worker;
