//! mapfold library: application logic for the `mapfold` binary.

pub mod app;
pub mod config;
pub mod errors;
pub mod version;
