//! Error handling and exit codes.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use mapfold_core::constants::exit_codes;
use mapfold_core::MapReduceError;

/// Failures of the application around the engine.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Engine(#[from] MapReduceError),

    #[error("cannot read config file {}: {source}", path.display())]
    ConfigFile { path: PathBuf, source: io::Error },

    #[error("cannot write output file {}: {source}", path.display())]
    Output { path: PathBuf, source: io::Error },
}

/// Exit code for an engine error.
#[must_use]
pub fn engine_exit_code(err: &MapReduceError) -> i32 {
    match err {
        MapReduceError::Discovery { .. } => exit_codes::ERROR_DISCOVERY,
        MapReduceError::EmptyInput => exit_codes::ERROR_EMPTY_INPUT,
        MapReduceError::Compute { .. }
        | MapReduceError::Spawn { .. }
        | MapReduceError::Panicked { .. } => exit_codes::ERROR_COMPUTE,
        MapReduceError::Merge { .. } => exit_codes::ERROR_MERGE,
        MapReduceError::Config(_) => exit_codes::ERROR_CONFIG,
    }
}

/// Exit code for an application error.
#[must_use]
pub fn handle_error(err: &AppError) -> i32 {
    match err {
        AppError::Engine(inner) => engine_exit_code(inner),
        AppError::ConfigFile { .. } => exit_codes::ERROR_CONFIG,
        AppError::Output { .. } => exit_codes::ERROR_GENERIC,
    }
}

/// Exit code for whatever error reached `main`.
#[must_use]
pub fn exit_code(err: &anyhow::Error) -> i32 {
    if let Some(app) = err.downcast_ref::<AppError>() {
        handle_error(app)
    } else if let Some(engine) = err.downcast_ref::<MapReduceError>() {
        engine_exit_code(engine)
    } else {
        exit_codes::ERROR_GENERIC
    }
}
