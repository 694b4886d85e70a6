//! CLI result presenter.

use mapfold_core::CountKind;
use mapfold_orchestration::interfaces::{ResultPresenter, RunReport};

use crate::output::{format_duration, format_number, to_json};
use crate::ui::print_error;

/// How results are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Labelled human-readable summary.
    Human,
    /// The bare number only.
    Quiet,
    /// One JSON object per run.
    Json,
}

/// CLI result presenter.
pub struct CLIResultPresenter {
    mode: OutputMode,
    label: String,
}

impl CLIResultPresenter {
    /// `label` names the input (directory or file) in the summary.
    #[must_use]
    pub fn new(mode: OutputMode, label: impl Into<String>) -> Self {
        Self {
            mode,
            label: label.into(),
        }
    }

    /// Render the output for `report` without printing it.
    #[must_use]
    pub fn render(&self, kind: CountKind, report: &RunReport<u64>) -> String {
        match self.mode {
            OutputMode::Quiet => report.output.to_string(),
            OutputMode::Json => to_json(kind, &self.label, report)
                .unwrap_or_else(|e| format!("{{\"error\":\"{e}\"}}")),
            OutputMode::Human => format!(
                "Input: {}\nWorkers: {}\nDuration: {}\nThere are {} {}",
                self.label,
                report.workers,
                format_duration(report.duration),
                format_number(report.output),
                kind,
            ),
        }
    }
}

impl ResultPresenter for CLIResultPresenter {
    fn present_result(&self, kind: CountKind, report: &RunReport<u64>) {
        println!("{}", self.render(kind, report));
    }

    fn present_error(&self, error: &str) {
        print_error(error);
    }
}
