//! Push-based chunking for callers that own the I/O.
//!
//! - [`StreamChunker`] - Wraps any [`BoundaryChunker`] with a `push()`/`finish()` API
//!
//! # Example
//!
//! ```
//! use bytes::Bytes;
//! use rabinchunk::{HashConfig, StaticChunker, StreamChunker};
//!
//! let mut stream = StreamChunker::new(StaticChunker::new(4)?, 0, HashConfig::disabled());
//!
//! let mut chunks = stream.push(Bytes::from_static(b"abcdef"));
//! chunks.extend(stream.push(Bytes::from_static(b"ghij")));
//! chunks.extend(stream.finish());
//!
//! let lens: Vec<_> = chunks.iter().map(|c| c.len()).collect();
//! assert_eq!(lens, vec![4, 4, 2]);
//! # Ok::<(), rabinchunk::ChunkError>(())
//! ```

use bytes::{Bytes, BytesMut};

use super::BoundaryChunker;
use crate::chunk::Chunk;
use crate::config::HashConfig;

/// Streams pushed buffers through a [`BoundaryChunker`].
///
/// Boundaries do not depend on how the input is split into pushes. Chunks
/// that lie within one pushed buffer are zero-copy slices of it; chunks that
/// span pushes are assembled from the carried-over bytes.
#[derive(Debug)]
pub struct StreamChunker<C> {
    chunker: C,
    padding: usize,
    hash_config: HashConfig,
    /// Scanned bytes of earlier pushes not yet closed by a boundary.
    pending: BytesMut,
    offset: u64,
}

impl<C: BoundaryChunker> StreamChunker<C> {
    /// Primes `chunker` with `prepend` zero bytes and wraps it. `prepend` is
    /// also the restart padding for multi-level chunkers.
    pub fn new(mut chunker: C, prepend: usize, hash_config: HashConfig) -> Self {
        chunker.prime(prepend);
        Self {
            chunker,
            padding: prepend,
            hash_config,
            pending: BytesMut::new(),
            offset: 0,
        }
    }

    /// Scans `data` and returns the chunks it completes.
    pub fn push(&mut self, data: Bytes) -> Vec<Chunk> {
        let mut chunks = Vec::new();
        let mut start = 0;

        for (i, &byte) in data.iter().enumerate() {
            let Some(level) = self.chunker.scan(byte, self.padding) else {
                continue;
            };

            let body = if self.pending.is_empty() {
                data.slice(start..=i)
            } else {
                self.pending.extend_from_slice(&data[start..=i]);
                self.pending.split().freeze()
            };
            chunks.push(self.emit(body, Some(level)));
            start = i + 1;
        }

        self.pending.extend_from_slice(&data[start..]);
        chunks
    }

    /// Flushes the bytes after the last boundary as a chunk with no level.
    ///
    /// The chunker keeps its state, so later pushes continue the stream.
    pub fn finish(&mut self) -> Option<Chunk> {
        if self.pending.is_empty() {
            return None;
        }
        let body = self.pending.split().freeze();
        Some(self.emit(body, None))
    }

    /// Resets the chunker, drops pending bytes and re-primes for a new
    /// stream.
    pub fn reset(&mut self) {
        self.chunker.reset();
        self.chunker.prime(self.padding);
        self.pending.clear();
        self.offset = 0;
    }

    /// Returns the stream offset of the next chunk.
    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// Returns the number of bytes waiting for a boundary.
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Returns the wrapped chunker.
    pub fn chunker(&self) -> &C {
        &self.chunker
    }

    fn emit(&mut self, data: Bytes, level: Option<usize>) -> Chunk {
        let mut chunk = Chunk::new(data, self.offset);
        chunk.level = level;
        self.offset += chunk.len() as u64;
        chunk.hashed(self.hash_config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cdc::{MultiLevelChunker, StaticChunker, Threshold};
    use crate::config::ChunkConfig;

    fn sample(len: usize) -> Vec<u8> {
        (0..len as u32).map(|i| (i.wrapping_mul(0x9E37_79B9) >> 11) as u8).collect()
    }

    #[test]
    fn test_zero_copy_within_push() {
        let mut stream = StreamChunker::new(StaticChunker::new(3).unwrap(), 0, HashConfig::disabled());
        let data = Bytes::from_static(b"abcdefg");
        let chunks = stream.push(data.clone());

        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[1].data.as_ptr(), data[3..].as_ptr());
        assert_eq!(stream.pending_len(), 1);
        assert_eq!(stream.offset(), 6);
    }

    #[test]
    fn test_chunk_spanning_pushes() {
        let mut stream = StreamChunker::new(StaticChunker::new(4).unwrap(), 0, HashConfig::disabled());
        assert!(stream.push(Bytes::from_static(b"ab")).is_empty());
        assert!(stream.push(Bytes::from_static(b"c")).is_empty());

        let chunks = stream.push(Bytes::from_static(b"de"));
        assert_eq!(chunks.len(), 1);
        assert_eq!(&chunks[0].data[..], b"abcd");
        assert_eq!(chunks[0].offset, 0);

        let tail = stream.finish().unwrap();
        assert_eq!(&tail.data[..], b"e");
        assert_eq!(tail.offset, 4);
        assert_eq!(tail.level, None);
        assert!(stream.finish().is_none());
    }

    #[test]
    fn test_push_size_does_not_matter() {
        let data = sample(30_000);
        let config = ChunkConfig::new(16, 4).unwrap();
        let thresholds = [
            Threshold::from_chunk_size(64).unwrap(),
            Threshold::from_chunk_size(512).unwrap(),
        ];

        let collect = |step: usize| {
            let chunker = MultiLevelChunker::new(&config, &thresholds).unwrap();
            let mut stream = StreamChunker::new(chunker, 16, HashConfig::disabled());
            let mut chunks = Vec::new();
            for piece in data.chunks(step) {
                chunks.extend(stream.push(Bytes::copy_from_slice(piece)));
            }
            chunks.extend(stream.finish());
            chunks
                .into_iter()
                .map(|c| (c.offset, c.len(), c.level))
                .collect::<Vec<_>>()
        };

        let whole = collect(data.len());
        assert_eq!(collect(1), whole);
        assert_eq!(collect(977), whole);
    }

    #[test]
    fn test_reset() {
        let mut stream = StreamChunker::new(StaticChunker::new(4).unwrap(), 1, HashConfig::disabled());
        let first = stream.push(Bytes::from_static(b"abcdef"));
        stream.reset();
        assert_eq!(stream.offset(), 0);
        assert_eq!(stream.pending_len(), 0);

        let again = stream.push(Bytes::from_static(b"abcdef"));
        assert_eq!(first, again);
        assert_eq!(first[0].len(), 3);
    }
}
