//! Application configuration from CLI flags and environment.

use std::path::PathBuf;

use clap::{ArgAction, Parser};

use mapfold_core::constants::{KEY_CHUNK_SIZE, KEY_DATA_DIR, KEY_PATH};
use mapfold_core::Config;

use crate::errors::AppError;

/// mapfold: fan-out/fan-in map-reduce over files.
///
/// Splits the input into units, maps each unit on its own thread, and folds
/// the partial results in input order.
#[derive(Parser, Debug)]
#[command(name = "mapfold", version, about)]
#[allow(clippy::struct_excessive_bools)]
pub struct AppConfig {
    /// Directory whose files are the input units (source `dir`).
    #[arg(short = 'd', long, env = "MAPFOLD_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Input source: dir or chunks.
    #[arg(short, long, default_value = "dir")]
    pub source: String,

    /// File to split into byte ranges (source `chunks`).
    #[arg(short, long)]
    pub path: Option<PathBuf>,

    /// Chunk length in bytes (source `chunks`).
    #[arg(long)]
    pub chunk_size: Option<u64>,

    /// What to count: lines, words, chars, or bytes.
    #[arg(short, long, default_value = "lines")]
    pub worker: String,

    /// Extra source configuration as key=value; may be repeated.
    #[arg(long = "set", value_name = "KEY=VALUE", action = ArgAction::Append)]
    pub set: Vec<String>,

    /// JSON file with source configuration (an object of strings).
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Write the aggregated value to this file.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Print the result as JSON.
    #[arg(long, conflicts_with = "quiet")]
    pub json: bool,

    /// Quiet mode (only output the number).
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase log verbosity (-v info, -vv debug).
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Show a progress bar on stderr.
    #[arg(long)]
    pub progress: bool,

    /// Generate shell completion.
    #[arg(long, value_enum)]
    pub completion: Option<clap_complete::Shell>,
}

impl AppConfig {
    /// Parse CLI arguments.
    #[must_use]
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    /// Default log level for the requested verbosity.
    #[must_use]
    pub fn log_level(&self) -> tracing::Level {
        match self.verbose {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            _ => tracing::Level::DEBUG,
        }
    }

    /// Engine configuration: the JSON file first, then `--set`, then the
    /// dedicated flags.
    pub fn engine_config(&self) -> Result<Config, AppError> {
        let mut config = match &self.config {
            Some(path) => {
                let text = std::fs::read_to_string(path).map_err(|source| AppError::ConfigFile {
                    path: path.clone(),
                    source,
                })?;
                Config::from_json(&text)?
            }
            None => Config::new(),
        };

        for assignment in &self.set {
            config.apply_assignment(assignment)?;
        }
        if let Some(dir) = &self.data_dir {
            config.set(KEY_DATA_DIR, dir.to_string_lossy());
        }
        if let Some(path) = &self.path {
            config.set(KEY_PATH, path.to_string_lossy());
        }
        if let Some(size) = self.chunk_size {
            config.set(KEY_CHUNK_SIZE, size.to_string());
        }
        Ok(config)
    }

    /// Name of the input shown in the summary.
    #[must_use]
    pub fn input_label(&self, config: &Config) -> String {
        config
            .get(KEY_DATA_DIR)
            .or_else(|| config.get(KEY_PATH))
            .unwrap_or("-")
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mapfold_core::MapReduceError;

    fn parse(args: &[&str]) -> AppConfig {
        AppConfig::try_parse_from(std::iter::once("mapfold").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn defaults() {
        let config = parse(&[]);
        assert_eq!(config.source, "dir");
        assert_eq!(config.worker, "lines");
        assert_eq!(config.log_level(), tracing::Level::WARN);
        assert!(!config.json);
    }

    #[test]
    fn verbosity_levels() {
        assert_eq!(parse(&["-v"]).log_level(), tracing::Level::INFO);
        assert_eq!(parse(&["-vv"]).log_level(), tracing::Level::DEBUG);
    }

    #[test]
    fn json_conflicts_with_quiet() {
        let result = AppConfig::try_parse_from(["mapfold", "--json", "-q"]);
        assert!(result.is_err());
    }

    #[test]
    fn flags_fill_engine_config() {
        let config = parse(&[
            "--data-dir",
            "/data",
            "--path",
            "/big.txt",
            "--chunk-size",
            "128",
            "--set",
            "extra=1",
        ]);
        let engine = config.engine_config().unwrap();
        assert_eq!(engine.get(KEY_DATA_DIR), Some("/data"));
        assert_eq!(engine.get(KEY_PATH), Some("/big.txt"));
        assert_eq!(engine.get(KEY_CHUNK_SIZE), Some("128"));
        assert_eq!(engine.get("extra"), Some("1"));
    }

    #[test]
    fn flags_override_json_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("cfg.json");
        std::fs::write(&file, r#"{"data_dir": "/from-file", "chunk_size": "7"}"#).unwrap();
        let config = parse(&[
            "--config",
            file.to_str().unwrap(),
            "--data-dir",
            "/from-flag",
        ]);
        let engine = config.engine_config().unwrap();
        assert_eq!(engine.get(KEY_DATA_DIR), Some("/from-flag"));
        assert_eq!(engine.get(KEY_CHUNK_SIZE), Some("7"));
    }

    #[test]
    fn missing_json_file_is_config_file_error() {
        let config = parse(&["--config", "/definitely/not/here.json"]);
        assert!(matches!(
            config.engine_config(),
            Err(AppError::ConfigFile { .. })
        ));
    }

    #[test]
    fn bad_assignment_is_config_error() {
        let config = parse(&["--set", "novalue"]);
        assert!(matches!(
            config.engine_config(),
            Err(AppError::Engine(MapReduceError::Config(_)))
        ));
    }

    #[test]
    fn input_label_prefers_data_dir() {
        let config = parse(&[]);
        let engine = Config::from_pairs([(KEY_DATA_DIR, "/d"), (KEY_PATH, "/p")]);
        assert_eq!(config.input_label(&engine), "/d");
        assert_eq!(config.input_label(&Config::new()), "-");
    }
}
