//! Cross-crate integration tests for the mapfold workspace live in `tests/`.
