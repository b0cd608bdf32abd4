//! Chunking of [`std::io::Read`] sources.
//!
//! - [`ChunkIter`] - Iterator that yields chunks from a reader
//!
//! # Example
//!
//! ```no_run
//! use std::fs::File;
//! use rabinchunk::{ChunkConfig, ChunkIter, HashConfig, RabinKarpChunker, Threshold};
//!
//! let file = File::open("data.bin")?;
//! let chunker = RabinKarpChunker::new(&ChunkConfig::default(), Threshold::from_chunk_size(4096)?)?;
//!
//! for chunk in ChunkIter::new(file, chunker, 48, HashConfig::enabled()) {
//!     let chunk = chunk?;
//!     println!("{chunk}");
//! }
//! # Ok::<(), rabinchunk::ChunkError>(())
//! ```

use std::io::{ErrorKind, Read};
use std::iter::FusedIterator;

use bytes::BytesMut;
use tracing::debug;

use super::BoundaryChunker;
use crate::buffer::ScratchBuffer;
use crate::chunk::Chunk;
use crate::config::HashConfig;
use crate::error::ChunkError;

/// Bytes read from a source but not yet emitted as a chunk.
#[derive(Debug, Default)]
pub(crate) struct Pending {
    bytes: BytesMut,
    /// Prefix of `bytes` already fed to the chunker.
    scanned: usize,
    /// Stream offset of `bytes[0]`.
    offset: u64,
}

impl Pending {
    pub(crate) fn extend(&mut self, data: &[u8]) {
        self.bytes.extend_from_slice(data);
    }

    /// Feeds unscanned bytes to `chunker` and returns the chunk closed by the
    /// first boundary, if any.
    pub(crate) fn next_chunk<C: BoundaryChunker>(
        &mut self,
        chunker: &mut C,
        padding: usize,
        hash_config: HashConfig,
    ) -> Option<Chunk> {
        while self.scanned < self.bytes.len() {
            let byte = self.bytes[self.scanned];
            self.scanned += 1;
            if let Some(level) = chunker.scan(byte, padding) {
                let len = self.scanned;
                return Some(self.emit(len, Some(level), hash_config));
            }
        }
        None
    }

    /// Emits whatever is left as the trailing chunk.
    pub(crate) fn finish(&mut self, hash_config: HashConfig) -> Option<Chunk> {
        if self.bytes.is_empty() {
            return None;
        }
        let len = self.bytes.len();
        Some(self.emit(len, None, hash_config))
    }

    pub(crate) fn offset(&self) -> u64 {
        self.offset
    }

    pub(crate) fn len(&self) -> usize {
        self.bytes.len()
    }

    fn emit(&mut self, len: usize, level: Option<usize>, hash_config: HashConfig) -> Chunk {
        let data = self.bytes.split_to(len).freeze();
        self.scanned -= len;

        let mut chunk = Chunk::new(data, self.offset);
        chunk.level = level;
        self.offset += len as u64;
        chunk.hashed(hash_config)
    }
}

/// An iterator that yields chunks from a reader.
///
/// The chunker is primed once with `prepend` zero bytes; every boundary it
/// reports, at any level, closes a chunk. Bytes after the last boundary form
/// a final chunk with no level. Interrupted reads are retried; after the end
/// of input or any other error the iterator is exhausted.
pub struct ChunkIter<R, C> {
    reader: R,
    chunker: C,
    padding: usize,
    hash_config: HashConfig,
    scratch: ScratchBuffer,
    pending: Pending,
    finished: bool,
}

impl<R: Read, C: BoundaryChunker> ChunkIter<R, C> {
    /// Creates an iterator over `reader`, primes `chunker` with `prepend`
    /// zero bytes, and uses `prepend` again as the restart padding.
    pub fn new(reader: R, mut chunker: C, prepend: usize, hash_config: HashConfig) -> Self {
        chunker.prime(prepend);
        Self {
            reader,
            chunker,
            padding: prepend,
            hash_config,
            scratch: ScratchBuffer::take(),
            pending: Pending::default(),
            finished: false,
        }
    }

    /// Returns the stream offset of the next chunk.
    pub fn offset(&self) -> u64 {
        self.pending.offset()
    }

    /// Returns the chunker.
    pub fn chunker(&self) -> &C {
        &self.chunker
    }

    /// Returns the reader and the chunker.
    pub fn into_parts(self) -> (R, C) {
        (self.reader, self.chunker)
    }
}

impl<R: Read, C: BoundaryChunker> Iterator for ChunkIter<R, C> {
    type Item = Result<Chunk, ChunkError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        loop {
            if let Some(chunk) =
                self.pending
                    .next_chunk(&mut self.chunker, self.padding, self.hash_config)
            {
                return Some(Ok(chunk));
            }

            match self.reader.read(self.scratch.as_mut_slice()) {
                Ok(0) => {
                    self.finished = true;
                    debug!(offset = self.pending.offset(), pending = self.pending.len(), "reader exhausted");
                    return self.pending.finish(self.hash_config).map(Ok);
                }
                Ok(n) => self.pending.extend(self.scratch.filled(n)),
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => {
                    self.finished = true;
                    debug!(offset = self.pending.offset(), error = %e, "read failed");
                    return Some(Err(e.into()));
                }
            }
        }
    }
}

impl<R: Read, C: BoundaryChunker> FusedIterator for ChunkIter<R, C> {}
