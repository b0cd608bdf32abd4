//! Fixed-size chunking.

use crate::chunker::BoundaryChunker;
use crate::error::ChunkError;

/// Emits a boundary every `chunk_size` bytes.
///
/// The count carries over between calls, and priming advances it, so
/// `prepend` zero bytes shift the phase the same way they do for the
/// content-defined chunkers.
///
/// # Example
///
/// ```
/// use rabinchunk::{BoundaryChunker, StaticChunker};
///
/// let mut chunker = StaticChunker::new(4)?;
/// assert_eq!(chunker.next_boundaries(&[0; 12], 2), vec![2, 6, 10]);
/// # Ok::<(), rabinchunk::ChunkError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticChunker {
    chunk_size: usize,
    /// Bytes since the last boundary, always `< chunk_size`.
    since: usize,
}

impl StaticChunker {
    /// Creates a chunker with the given chunk size.
    ///
    /// # Errors
    ///
    /// Returns [`ChunkError::InvalidConfig`] if `chunk_size` is zero.
    pub fn new(chunk_size: usize) -> Result<Self, ChunkError> {
        if chunk_size == 0 {
            return Err(ChunkError::InvalidConfig {
                message: "chunk size must be non-zero",
            });
        }
        Ok(Self {
            chunk_size,
            since: 0,
        })
    }

    /// Returns the chunk size.
    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }
}

impl BoundaryChunker for StaticChunker {
    fn levels(&self) -> usize {
        1
    }

    fn prime(&mut self, padding: usize) {
        self.since = (self.since + padding % self.chunk_size) % self.chunk_size;
    }

    #[inline]
    fn scan(&mut self, _byte: u8, _padding: usize) -> Option<usize> {
        self.since += 1;
        if self.since == self.chunk_size {
            self.since = 0;
            Some(0)
        } else {
            None
        }
    }

    fn reset(&mut self) {
        self.since = 0;
    }
}
