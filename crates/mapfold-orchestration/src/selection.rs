//! Name-based selection of workers and input sources.

use std::fmt;
use std::str::FromStr;

use mapfold_core::error::MapReduceError;
use mapfold_core::CountKind;

/// Names accepted by [`select_count_kind`].
#[must_use]
pub fn available_workers() -> Vec<&'static str> {
    CountKind::ALL.iter().map(|k| k.name()).collect()
}

/// Resolve a worker name to a [`CountKind`].
pub fn select_count_kind(name: &str) -> Result<CountKind, MapReduceError> {
    name.parse::<CountKind>().map_err(|_| {
        MapReduceError::Config(format!(
            "unknown worker '{name}' (available: {})",
            available_workers().join(", ")
        ))
    })
}

/// Built-in input sources.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    /// One unit per file in `data_dir`.
    Directory,
    /// Fixed-size byte ranges of the file at `path`.
    Chunks,
}

impl SourceKind {
    /// All kinds, in display order.
    pub const ALL: [SourceKind; 2] = [Self::Directory, Self::Chunks];

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Directory => "dir",
            Self::Chunks => "chunks",
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SourceKind {
    type Err = MapReduceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dir" | "directory" => Ok(Self::Directory),
            "chunks" | "chunked" => Ok(Self::Chunks),
            other => Err(MapReduceError::Config(format!(
                "unknown source '{other}' (available: dir, chunks)"
            ))),
        }
    }
}
