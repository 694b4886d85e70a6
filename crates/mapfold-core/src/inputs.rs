//! Built-in input units and sources.

use std::fs::{self, File};
use std::io::{self, BufReader, Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};
use std::vec;

use tracing::debug;

use crate::config::Config;
use crate::constants::{DEFAULT_CHUNK_SIZE, KEY_CHUNK_SIZE, KEY_DATA_DIR, KEY_PATH};
use crate::error::MapReduceError;
use crate::input::{InputSource, InputUnit};

fn discovery_error(location: &Path, source: io::Error) -> MapReduceError {
    MapReduceError::Discovery {
        location: location.display().to_string(),
        source,
    }
}

// ---------------------------------------------------------------------------
// Whole files
// ---------------------------------------------------------------------------

/// A whole file on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathInput {
    path: PathBuf,
}

impl PathInput {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl InputUnit for PathInput {
    fn id(&self) -> String {
        self.path.display().to_string()
    }

    fn read(&self) -> io::Result<Vec<u8>> {
        fs::read(&self.path)
    }
}

/// Yields one [`PathInput`] per regular file directly under `data_dir`.
///
/// Entries are sorted by file name so that enumeration order, and with it
/// the reduce order, does not depend on the filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct DirectorySource;

impl DirectorySource {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

/// Iterator returned by [`DirectorySource::generate`].
pub struct DirectoryEntries {
    paths: vec::IntoIter<PathBuf>,
}

impl Iterator for DirectoryEntries {
    type Item = Result<PathInput, MapReduceError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.paths.next().map(|path| Ok(PathInput::new(path)))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.paths.size_hint()
    }
}

impl InputSource for DirectorySource {
    type Unit = PathInput;
    type Units = DirectoryEntries;

    fn generate(&self, config: &Config) -> Result<Self::Units, MapReduceError> {
        let dir = Path::new(config.require(KEY_DATA_DIR)?);
        let entries = fs::read_dir(dir).map_err(|e| discovery_error(dir, e))?;

        let mut paths = Vec::new();
        for entry in entries {
            let path = entry.map_err(|e| discovery_error(dir, e))?.path();
            if path.is_file() {
                paths.push(path);
            } else {
                debug!(path = %path.display(), "Skipping non-file entry");
            }
        }
        paths.sort();

        debug!(dir = %dir.display(), units = paths.len(), "Enumerated directory");
        Ok(DirectoryEntries {
            paths: paths.into_iter(),
        })
    }
}

// ---------------------------------------------------------------------------
// Byte ranges
// ---------------------------------------------------------------------------

/// A contiguous byte range of a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ByteRangeInput {
    path: PathBuf,
    offset: u64,
    len: u64,
}

impl ByteRangeInput {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, offset: u64, len: u64) -> Self {
        Self {
            path: path.into(),
            offset,
            len,
        }
    }

    #[must_use]
    pub fn offset(&self) -> u64 {
        self.offset
    }

    #[must_use]
    pub fn len(&self) -> u64 {
        self.len
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl InputUnit for ByteRangeInput {
    fn id(&self) -> String {
        format!("{}@{}+{}", self.path.display(), self.offset, self.len)
    }

    fn read(&self) -> io::Result<Vec<u8>> {
        let mut file = File::open(&self.path)?;
        file.seek(SeekFrom::Start(self.offset))?;
        let capacity = usize::try_from(self.len).unwrap_or(0);
        let mut buf = Vec::with_capacity(capacity);
        file.take(self.len).read_to_end(&mut buf)?;
        if (buf.len() as u64) < self.len {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                format!(
                    "range {}+{} extends past end of {}",
                    self.offset,
                    self.len,
                    self.path.display()
                ),
            ));
        }
        Ok(buf)
    }
}

/// Splits the file named by `path` into consecutive [`ByteRangeInput`]s of
/// at least `chunk_size` bytes.
///
/// Each chunk ends just past an ASCII whitespace byte (or at end of file),
/// so no word and no UTF-8 character spans two chunks. A file without
/// whitespace past `chunk_size` becomes a single chunk.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChunkedFileSource;

impl ChunkedFileSource {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

/// Iterator returned by [`ChunkedFileSource::generate`].
pub struct ByteRanges {
    path: PathBuf,
    reader: BufReader<File>,
    next_offset: u64,
    total: u64,
    chunk_size: u64,
}

impl ByteRanges {
    /// Smallest offset `>= target` that follows an ASCII whitespace byte,
    /// or the file length.
    fn boundary_from(&mut self, target: u64) -> io::Result<u64> {
        if target >= self.total {
            return Ok(self.total);
        }
        // target > next_offset >= 0, so target - 1 is in range.
        self.reader.seek(SeekFrom::Start(target - 1))?;
        let mut end = target - 1;
        for byte in (&mut self.reader).bytes() {
            end += 1;
            if byte?.is_ascii_whitespace() {
                return Ok(end);
            }
        }
        Ok(self.total)
    }
}

impl Iterator for ByteRanges {
    type Item = Result<ByteRangeInput, MapReduceError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next_offset >= self.total {
            return None;
        }
        let target = self.next_offset.saturating_add(self.chunk_size);
        let end = match self.boundary_from(target) {
            Ok(end) => end,
            Err(e) => {
                self.next_offset = self.total;
                return Some(Err(discovery_error(&self.path, e)));
            }
        };
        let unit = ByteRangeInput::new(self.path.clone(), self.next_offset, end - self.next_offset);
        self.next_offset = end;
        Some(Ok(unit))
    }
}

impl InputSource for ChunkedFileSource {
    type Unit = ByteRangeInput;
    type Units = ByteRanges;

    fn generate(&self, config: &Config) -> Result<Self::Units, MapReduceError> {
        let path = PathBuf::from(config.require(KEY_PATH)?);
        let chunk_size = config
            .get_parsed::<u64>(KEY_CHUNK_SIZE)?
            .unwrap_or(DEFAULT_CHUNK_SIZE);
        if chunk_size == 0 {
            return Err(MapReduceError::Config(format!(
                "'{KEY_CHUNK_SIZE}' must be greater than zero"
            )));
        }

        let file = File::open(&path).map_err(|e| discovery_error(&path, e))?;
        let meta = file.metadata().map_err(|e| discovery_error(&path, e))?;
        if !meta.is_file() {
            return Err(discovery_error(
                &path,
                io::Error::new(io::ErrorKind::InvalidInput, "not a regular file"),
            ));
        }

        debug!(path = %path.display(), bytes = meta.len(), chunk_size, "Splitting file");
        Ok(ByteRanges {
            path,
            reader: BufReader::new(file),
            next_offset: 0,
            total: meta.len(),
            chunk_size,
        })
    }
}

// ---------------------------------------------------------------------------
// In-memory
// ---------------------------------------------------------------------------

/// A named in-memory buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryInput {
    name: String,
    data: Vec<u8>,
}

impl MemoryInput {
    #[must_use]
    pub fn new(name: impl Into<String>, data: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            data: data.into(),
        }
    }
}

impl InputUnit for MemoryInput {
    fn id(&self) -> String {
        self.name.clone()
    }

    fn read(&self) -> io::Result<Vec<u8>> {
        Ok(self.data.clone())
    }
}

/// Yields a fixed list of [`MemoryInput`]s in insertion order. Ignores the
/// configuration.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    units: Vec<MemoryInput>,
}

impl MemorySource {
    #[must_use]
    pub fn new(units: Vec<MemoryInput>) -> Self {
        Self { units }
    }

    /// Build from `(name, contents)` pairs.
    pub fn from_strs<'a>(items: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        Self::new(
            items
                .into_iter()
                .map(|(name, data)| MemoryInput::new(name, data.as_bytes()))
                .collect(),
        )
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.units.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }
}

impl InputSource for MemorySource {
    type Unit = MemoryInput;
    type Units = std::iter::Map<
        vec::IntoIter<MemoryInput>,
        fn(MemoryInput) -> Result<MemoryInput, MapReduceError>,
    >;

    fn generate(&self, _config: &Config) -> Result<Self::Units, MapReduceError> {
        let wrap: fn(MemoryInput) -> Result<MemoryInput, MapReduceError> = Ok;
        Ok(self.units.clone().into_iter().map(wrap))
    }
}
