//! Counting worker: lines, words, chars, or bytes per unit, summed.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{MapReduceError, WorkerError};
use crate::input::InputUnit;
use crate::worker::Worker;

/// What a [`CountWorker`] counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CountKind {
    /// Newline bytes.
    Lines,
    /// Whitespace-separated words (UTF-8 required).
    Words,
    /// Unicode scalar values (UTF-8 required).
    Chars,
    /// Raw bytes.
    Bytes,
}

impl CountKind {
    /// All kinds, in display order.
    pub const ALL: [CountKind; 4] = [Self::Lines, Self::Words, Self::Chars, Self::Bytes];

    /// Lowercase name, as accepted by `FromStr`.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Lines => "lines",
            Self::Words => "words",
            Self::Chars => "chars",
            Self::Bytes => "bytes",
        }
    }

    /// Count `data` according to this kind.
    pub fn count(self, data: &[u8]) -> Result<u64, WorkerError> {
        let n = match self {
            Self::Lines => data.iter().filter(|&&b| b == b'\n').count(),
            Self::Bytes => data.len(),
            Self::Words => as_utf8(data)?.split_whitespace().count(),
            Self::Chars => as_utf8(data)?.chars().count(),
        };
        Ok(n as u64)
    }
}

fn as_utf8(data: &[u8]) -> Result<&str, WorkerError> {
    std::str::from_utf8(data).map_err(|e| WorkerError::Malformed(e.to_string()))
}

impl fmt::Display for CountKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CountKind {
    type Err = MapReduceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|k| k.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| MapReduceError::Config(format!("unknown count kind: {s}")))
    }
}

/// Counts one input unit; `reduce` is checked addition.
pub struct CountWorker<U> {
    unit_id: String,
    input: Option<U>,
    kind: CountKind,
    count: Option<u64>,
}

impl<U: InputUnit> CountWorker<U> {
    #[must_use]
    pub fn new(input: U, kind: CountKind) -> Self {
        Self {
            unit_id: input.id(),
            input: Some(input),
            kind,
            count: None,
        }
    }

    /// Constructor for line counting.
    #[must_use]
    pub fn lines(input: U) -> Self {
        Self::new(input, CountKind::Lines)
    }

    #[must_use]
    pub fn kind(&self) -> CountKind {
        self.kind
    }
}

impl<U: InputUnit> Worker for CountWorker<U> {
    type Output = u64;

    fn unit_id(&self) -> &str {
        &self.unit_id
    }

    fn map(&mut self) -> Result<(), WorkerError> {
        // The unit is dropped once read; a second map() finds it gone.
        let input = self
            .input
            .take()
            .ok_or_else(|| WorkerError::Malformed("map() called twice".into()))?;
        let data = input.read()?;
        let count = self.kind.count(&data)?;
        debug!(unit = %self.unit_id, kind = %self.kind, count, "Mapped unit");
        self.count = Some(count);
        Ok(())
    }

    fn reduce(&mut self, other: Self) -> Result<(), WorkerError> {
        let (Some(mine), Some(theirs)) = (self.count, other.count) else {
            return Err(WorkerError::NotMapped);
        };
        let sum = mine.checked_add(theirs).ok_or_else(|| {
            WorkerError::Merge(format!("count overflow adding {theirs} to {mine}"))
        })?;
        self.count = Some(sum);
        Ok(())
    }

    fn result(&self) -> Option<&u64> {
        self.count.as_ref()
    }

    fn into_result(self) -> Option<u64> {
        self.count
    }
}
