//! The Chunk type and zero-copy splitting of in-memory content.

use std::fmt;
use std::ops::Range;

use bytes::Bytes;

use super::ChunkHash;
use crate::chunker::Boundary;
use crate::config::HashConfig;

/// A materialized chunk.
///
/// # Example
///
/// ```
/// use bytes::Bytes;
/// use rabinchunk::Chunk;
///
/// let chunk = Chunk::new(Bytes::from_static(b"hello world"), 5).with_level(1);
/// assert_eq!(chunk.len(), 11);
/// assert_eq!(chunk.range(), 5..16);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    /// The chunk bytes.
    pub data: Bytes,

    /// Offset of the first byte in the stream.
    pub offset: u64,

    /// Level of the boundary that closed the chunk, or `None` for the
    /// trailing chunk closed by end of input.
    pub level: Option<usize>,

    /// BLAKE3 digest of `data`, if hashing was enabled.
    pub hash: Option<ChunkHash>,
}

impl Chunk {
    /// Creates a chunk without level or digest.
    pub fn new(data: impl Into<Bytes>, offset: u64) -> Self {
        Self {
            data: data.into(),
            offset,
            level: None,
            hash: None,
        }
    }

    /// Sets the boundary level.
    pub fn with_level(mut self, level: usize) -> Self {
        self.level = Some(level);
        self
    }

    /// Sets the digest.
    pub fn with_hash(mut self, hash: ChunkHash) -> Self {
        self.hash = Some(hash);
        self
    }

    /// Attaches a digest when `config` enables it.
    pub(crate) fn hashed(self, config: HashConfig) -> Self {
        #[cfg(feature = "hash-blake3")]
        if config.enabled {
            let hash = ChunkHash::digest(&self.data);
            return self.with_hash(hash);
        }
        #[cfg(not(feature = "hash-blake3"))]
        let _ = config;

        self
    }

    /// Returns the length in bytes.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if the chunk holds no bytes.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns the stream offset just past the last byte.
    pub fn end(&self) -> u64 {
        self.offset + self.data.len() as u64
    }

    /// Returns the stream range covered by the chunk.
    pub fn range(&self) -> Range<u64> {
        self.offset..self.end()
    }

    /// Consumes the chunk and returns its bytes.
    pub fn into_data(self) -> Bytes {
        self.data
    }
}

impl fmt::Display for Chunk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Chunk({} bytes @ {}", self.len(), self.offset)?;
        if let Some(level) = self.level {
            write!(f, ", level {level}")?;
        }
        if let Some(hash) = &self.hash {
            write!(f, ", hash={hash}")?;
        }
        write!(f, ")")
    }
}

/// Slices `data` at `boundaries` into chunks without copying.
///
/// Boundaries are positions into `data` as produced by one scan over it.
/// Positions that do not advance, or that lie past the end, are skipped.
/// Bytes after the last boundary form a trailing chunk with no level.
///
/// # Example
///
/// ```
/// use bytes::Bytes;
/// use rabinchunk::{split_chunks, Boundary, HashConfig};
///
/// let data = Bytes::from_static(b"aaabbc");
/// let chunks = split_chunks(
///     data,
///     &[Boundary::new(3, 1), Boundary::new(5, 0)],
///     HashConfig::disabled(),
/// );
/// assert_eq!(chunks.len(), 3);
/// assert_eq!(&chunks[1].data[..], b"bb");
/// assert_eq!(chunks[2].level, None);
/// ```
pub fn split_chunks(data: Bytes, boundaries: &[Boundary], hash_config: HashConfig) -> Vec<Chunk> {
    let mut chunks = Vec::with_capacity(boundaries.len() + 1);
    let mut start = 0;

    for boundary in boundaries {
        let end = boundary.position;
        if end <= start || end > data.len() {
            continue;
        }
        chunks.push(
            Chunk::new(data.slice(start..end), start as u64)
                .with_level(boundary.level)
                .hashed(hash_config),
        );
        start = end;
    }

    if start < data.len() {
        chunks.push(Chunk::new(data.slice(start..), start as u64).hashed(hash_config));
    }

    chunks
}
