//! Application entry point and dispatch.

use std::sync::Arc;

use anyhow::Result;
use tracing::info;

use mapfold_cli::output::write_to_file;
use mapfold_cli::presenter::{CLIResultPresenter, OutputMode};
use mapfold_cli::ui::print_success;
use mapfold_cli::ProgressBarObserver;
use mapfold_core::input::InputSource;
use mapfold_core::{
    ChunkedFileSource, Config, CountKind, CountWorker, DirectorySource, LoggingObserver,
    MapReduceError, ProgressSubject,
};
use mapfold_orchestration::interfaces::{ResultPresenter, RunReport};
use mapfold_orchestration::selection::{select_count_kind, SourceKind};
use mapfold_orchestration::{run_map_reduce_with, Executor, WorkerFactory};

use crate::config::AppConfig;
use crate::errors::AppError;
use crate::version::full_version;

/// Run the application.
pub fn run(config: &AppConfig) -> Result<()> {
    if let Some(shell) = config.completion {
        let mut cmd = <AppConfig as clap::CommandFactory>::command();
        mapfold_cli::completion::generate_completion(&mut cmd, shell, &mut std::io::stdout());
        return Ok(());
    }

    let mode = if config.json {
        OutputMode::Json
    } else if config.quiet {
        OutputMode::Quiet
    } else {
        OutputMode::Human
    };

    let engine = match config.engine_config() {
        Ok(engine) => engine,
        Err(err) => {
            CLIResultPresenter::new(mode, "-").present_error(&err.to_string());
            return Err(err.into());
        }
    };
    let presenter = CLIResultPresenter::new(mode, config.input_label(&engine));

    run_cli(config, &engine, &presenter).map_err(|err| {
        presenter.present_error(&err.to_string());
        err.into()
    })
}

fn run_cli(
    config: &AppConfig,
    engine: &Config,
    presenter: &dyn ResultPresenter,
) -> Result<(), AppError> {
    info!(version = %full_version(), "Starting");

    let kind = select_count_kind(&config.worker)?;
    let source: SourceKind = config.source.parse()?;
    let executor = build_executor(config.progress && !config.quiet && !config.json);

    info!(%source, %kind, "Running map-reduce");
    let report = match source {
        SourceKind::Directory => count_with(&executor, &DirectorySource::new(), kind, engine)?,
        SourceKind::Chunks => count_with(&executor, &ChunkedFileSource::new(), kind, engine)?,
    };

    presenter.present_result(kind, &report);

    if let Some(path) = &config.output {
        write_to_file(path, report.output).map_err(|source| AppError::Output {
            path: path.clone(),
            source,
        })?;
        if !config.quiet && !config.json {
            print_success(&format!("Result written to {}", path.display()));
        }
    }

    Ok(())
}

/// Executor reporting to the log, plus a progress bar when requested.
fn build_executor(progress: bool) -> Executor {
    let subject = ProgressSubject::new();
    subject.register(Arc::new(LoggingObserver::new()));
    if progress {
        subject.register(Arc::new(ProgressBarObserver::new()));
    }
    Executor::new().with_observer(Arc::new(subject))
}

fn count_with<S: InputSource>(
    executor: &Executor,
    source: &S,
    kind: CountKind,
    engine: &Config,
) -> Result<RunReport<u64>, MapReduceError> {
    let factory = WorkerFactory::new(move |unit: S::Unit| CountWorker::new(unit, kind));
    run_map_reduce_with(executor, source, &factory, engine)
}
