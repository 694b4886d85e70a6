//! CLI output formatting.

use std::io::{self, Write};
use std::path::Path;
use std::time::Duration;

use serde::Serialize;

use mapfold_core::CountKind;
use mapfold_orchestration::interfaces::RunReport;

/// Format a duration for display.
#[must_use]
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
pub fn format_duration(d: Duration) -> String {
    let secs = d.as_secs_f64();
    if secs < 0.001 {
        format!("{:.2}µs", secs * 1_000_000.0)
    } else if secs < 1.0 {
        format!("{:.2}ms", secs * 1000.0)
    } else if secs < 60.0 {
        format!("{secs:.3}s")
    } else {
        let mins = (secs / 60.0).floor() as u64;
        let remaining = secs - (mins as f64 * 60.0);
        format!("{mins}m{remaining:.1}s")
    }
}

/// Format a number with thousand separators.
#[must_use]
pub fn format_number(n: u64) -> String {
    let s = n.to_string();
    let mut result = String::new();
    for (i, c) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }
    result.chars().rev().collect()
}

/// Machine-readable summary of a counting run.
#[derive(Debug, Serialize)]
pub struct JsonSummary<'a> {
    pub kind: CountKind,
    pub total: u64,
    pub workers: usize,
    pub duration_ms: f64,
    pub label: &'a str,
}

/// Render a run as a single-line JSON object.
pub fn to_json(kind: CountKind, label: &str, report: &RunReport<u64>) -> serde_json::Result<String> {
    serde_json::to_string(&JsonSummary {
        kind,
        total: report.output,
        workers: report.workers,
        duration_ms: report.duration.as_secs_f64() * 1000.0,
        label,
    })
}

/// Write the aggregated value to a file, followed by a newline.
///
/// # Errors
///
/// Returns an I/O error if the file cannot be created or written.
pub fn write_to_file(path: &Path, value: u64) -> io::Result<()> {
    let mut file = std::fs::File::create(path)?;
    writeln!(file, "{value}")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_duration_micro() {
        assert!(format_duration(Duration::from_nanos(500)).contains("µs"));
    }

    #[test]
    fn format_duration_milli() {
        assert!(format_duration(Duration::from_millis(42)).contains("ms"));
    }

    #[test]
    fn format_duration_minutes() {
        assert_eq!(format_duration(Duration::from_secs(90)), "1m30.0s");
    }

    #[test]
    fn format_number_thousands() {
        assert_eq!(format_number(1_000_000), "1,000,000");
        assert_eq!(format_number(42), "42");
        assert_eq!(format_number(1234), "1,234");
        assert_eq!(format_number(0), "0");
    }

    #[test]
    fn json_summary_fields() {
        let report = RunReport {
            output: 12,
            workers: 3,
            duration: Duration::from_millis(5),
        };
        let json = to_json(CountKind::Words, "/data", &report).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["kind"], "words");
        assert_eq!(value["total"], 12);
        assert_eq!(value["workers"], 3);
        assert_eq!(value["label"], "/data");
    }

    #[test]
    fn write_value_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.txt");
        write_to_file(&path, 4096).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "4096\n");
    }
}
