//! Property-based tests for the executor.
//!
//! These exercise ordering and determinism with random worker counts and
//! random map delays, so map completion order varies between cases.

use std::thread;
use std::time::Duration;

use proptest::prelude::*;

use mapfold_core::error::WorkerError;
use mapfold_core::constants::{KEY_CHUNK_SIZE, KEY_PATH};
use mapfold_core::inputs::{ByteRangeInput, ChunkedFileSource, MemoryInput, MemorySource};
use mapfold_core::{Config, CountKind, CountWorker, Worker};
use mapfold_orchestration::{run_map_reduce, Executor, WorkerFactory};

/// Ordered concatenation: not commutative.
struct Concat {
    tag: String,
    delay: Duration,
    out: Option<String>,
}

impl Worker for Concat {
    type Output = String;

    fn unit_id(&self) -> &str {
        &self.tag
    }

    fn map(&mut self) -> Result<(), WorkerError> {
        thread::sleep(self.delay);
        self.out = Some(format!("[{}]", self.tag));
        Ok(())
    }

    fn reduce(&mut self, other: Self) -> Result<(), WorkerError> {
        let theirs = other.out.ok_or(WorkerError::NotMapped)?;
        self.out
            .as_mut()
            .ok_or(WorkerError::NotMapped)?
            .push_str(&theirs);
        Ok(())
    }

    fn result(&self) -> Option<&String> {
        self.out.as_ref()
    }

    fn into_result(self) -> Option<String> {
        self.out
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    /// Concatenation follows input order whatever the map delays are.
    #[test]
    fn reduce_order_is_input_order(delays in proptest::collection::vec(0u64..15, 1..12)) {
        let workers: Vec<Concat> = delays
            .iter()
            .enumerate()
            .map(|(i, ms)| Concat {
                tag: i.to_string(),
                delay: Duration::from_millis(*ms),
                out: None,
            })
            .collect();
        let expected: String = (0..delays.len()).map(|i| format!("[{i}]")).collect();

        let out = Executor::new().run(workers).unwrap();
        prop_assert_eq!(out, expected);
    }

    /// Summed byte counts equal the total length and are stable across runs.
    #[test]
    fn sums_are_deterministic(texts in proptest::collection::vec("[a-z\\n ]{0,40}", 1..16)) {
        let units: Vec<MemoryInput> = texts
            .iter()
            .enumerate()
            .map(|(i, t)| MemoryInput::new(format!("t{i}"), t.as_bytes()))
            .collect();
        let expected: u64 = texts.iter().map(|t| t.len() as u64).sum();

        let factory = WorkerFactory::new(CountWorker::<MemoryInput>::lines);
        let bytes = WorkerFactory::new(|u: MemoryInput| CountWorker::new(u, mapfold_core::CountKind::Bytes));

        let first = Executor::new().run(bytes.from_units(units.clone())).unwrap();
        let second = Executor::new().run(bytes.from_units(units.clone())).unwrap();
        prop_assert_eq!(first, expected);
        prop_assert_eq!(first, second);

        // Line counts agree between a direct run and a source-driven build.
        let source = MemorySource::new(units.clone());
        let direct = Executor::new().run(factory.from_units(units)).unwrap();
        let built = Executor::new()
            .run(factory.build(&source, &Config::new()).unwrap())
            .unwrap();
        prop_assert_eq!(direct, built);
    }

    /// Counting a file in chunks gives the whole-file count for every kind.
    #[test]
    fn chunked_counts_match_whole_file(
        text in "[a-zé日🦀 \t\n]{0,60}",
        chunk_size in 1u64..16,
    ) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("input.txt");
        std::fs::write(&path, &text).unwrap();
        let config = Config::from_pairs([
            (KEY_PATH, path.to_str().unwrap().to_string()),
            (KEY_CHUNK_SIZE, chunk_size.to_string()),
        ]);

        for kind in CountKind::ALL {
            let factory = WorkerFactory::new(move |u: ByteRangeInput| CountWorker::new(u, kind));
            let result = run_map_reduce(&ChunkedFileSource::new(), &factory, &config);
            if text.is_empty() {
                prop_assert!(result.is_err());
            } else {
                prop_assert_eq!(result.unwrap(), kind.count(text.as_bytes()).unwrap());
            }
        }
    }
}
