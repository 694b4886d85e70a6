#![no_main]

use libfuzzer_sys::fuzz_target;

use mapfold_core::{CountKind, CountWorker, MemoryInput};
use mapfold_orchestration::{Executor, WorkerFactory};

fuzz_target!(|data: &[u8]| {
    let Some((&pieces, body)) = data.split_first() else {
        return;
    };
    // Up to 8 units of roughly equal size.
    let pieces = usize::from(pieces % 8) + 1;
    let step = body.len().div_ceil(pieces).max(1);
    let units: Vec<MemoryInput> = body
        .chunks(step)
        .enumerate()
        .map(|(i, chunk)| MemoryInput::new(format!("chunk-{i}"), chunk))
        .collect();
    if units.is_empty() {
        return;
    }

    let executor = Executor::new();
    for kind in [CountKind::Lines, CountKind::Bytes] {
        let factory = WorkerFactory::new(move |unit: MemoryInput| CountWorker::new(unit, kind));
        let total = executor
            .run(factory.from_units(units.clone()))
            .expect("lines and bytes never fail");
        assert_eq!(total, kind.count(body).unwrap(), "{kind} not additive");
    }

    // Chars are additive whenever every chunk is valid UTF-8 on its own.
    let factory =
        WorkerFactory::new(|unit: MemoryInput| CountWorker::new(unit, CountKind::Chars));
    if let Ok(total) = executor.run(factory.from_units(units)) {
        assert_eq!(Ok(total), CountKind::Chars.count(body).map_err(|_| ()));
    }
});
