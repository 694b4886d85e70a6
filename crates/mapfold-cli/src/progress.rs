//! Terminal progress bar driven by map events.

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

use mapfold_core::{MapEvent, ProgressObserver};

const TEMPLATE: &str = "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}";

/// Advances a bar once per finished or failed map step.
pub struct ProgressBarObserver {
    bar: ProgressBar,
}

impl ProgressBarObserver {
    /// Bar drawn on stderr. The length is set when the run starts.
    #[must_use]
    pub fn new() -> Self {
        Self::with_bar(ProgressBar::new(0))
    }

    #[cfg(test)]
    fn hidden() -> Self {
        Self::with_bar(ProgressBar::with_draw_target(Some(0), ProgressDrawTarget::hidden()))
    }

    fn with_bar(bar: ProgressBar) -> Self {
        let style = ProgressStyle::default_bar()
            .template(TEMPLATE)
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("█▓▒░ ");
        bar.set_style(style);
        Self { bar }
    }
}

impl Default for ProgressBarObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressObserver for ProgressBarObserver {
    fn on_event(&self, event: &MapEvent) {
        match event {
            MapEvent::RunStarted { workers } => {
                self.bar.set_length(*workers as u64);
                self.bar.set_position(0);
            }
            MapEvent::MapFinished { unit, .. } => {
                self.bar.set_message(unit.clone());
                self.bar.inc(1);
            }
            MapEvent::MapFailed { unit, .. } => {
                self.bar.set_message(format!("failed: {unit}"));
                self.bar.inc(1);
            }
            MapEvent::RunFinished { success, .. } => {
                if *success {
                    self.bar.finish_with_message("done");
                } else {
                    self.bar.abandon_with_message("failed");
                }
            }
            MapEvent::MapStarted { .. } | MapEvent::Merged { .. } => {}
        }
    }
}
