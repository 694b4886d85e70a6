#![no_main]

use libfuzzer_sys::fuzz_target;

use mapfold_core::config::{parse_assignment, Config};

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    if let Ok((key, value)) = parse_assignment(text) {
        assert!(!key.is_empty());
        assert_eq!(key, key.trim());
        assert!(!key.contains('='));

        let reparsed = parse_assignment(&format!("{key}={value}")).expect("reparse");
        assert_eq!(reparsed, (key.clone(), value.clone()));

        let mut config = Config::new();
        config.apply_assignment(text).expect("assignment accepted once");
        assert_eq!(config.get(&key), Some(value.as_str()));
    }

    let _ = Config::from_json(text);
});
