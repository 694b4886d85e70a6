//! Configuration keys, defaults, and exit codes.

/// Config key naming the directory scanned by `DirectorySource`.
pub const KEY_DATA_DIR: &str = "data_dir";

/// Config key naming the file split by `ChunkedFileSource`.
pub const KEY_PATH: &str = "path";

/// Config key for the chunk length (bytes) used by `ChunkedFileSource`.
pub const KEY_CHUNK_SIZE: &str = "chunk_size";

/// Default chunk length for `ChunkedFileSource` (64 KiB).
pub const DEFAULT_CHUNK_SIZE: u64 = 64 * 1024;

/// Prefix for the names of fan-out threads.
pub const MAP_THREAD_PREFIX: &str = "mapfold-map";

/// Process exit codes.
pub mod exit_codes {
    /// Successful execution.
    pub const SUCCESS: i32 = 0;
    /// Generic error.
    pub const ERROR_GENERIC: i32 = 1;
    /// Input discovery failed.
    pub const ERROR_DISCOVERY: i32 = 2;
    /// The input source yielded no units.
    pub const ERROR_EMPTY_INPUT: i32 = 3;
    /// Invalid configuration.
    pub const ERROR_CONFIG: i32 = 4;
    /// A worker's map step failed.
    pub const ERROR_COMPUTE: i32 = 5;
    /// A merge in the reduce chain failed.
    pub const ERROR_MERGE: i32 = 6;
}
