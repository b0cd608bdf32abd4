//! rabinchunk
//!
//! Single-pass, multi-level content-defined chunking (CDC) for Rust.
//!
//! `rabinchunk` splits a byte stream into variable-length chunks whose
//! boundaries depend only on nearby content, using a seeded Rabin-Karp
//! rolling hash. Inserting or deleting bytes only moves boundaries close to
//! the edit. It is a small primitive for:
//!
//! - deduplication and content-addressable storage
//! - delta synchronization
//! - Merkle-style trees over large content
//!
//! Besides plain chunking it computes a *nested* chunking in one pass: one
//! threshold per level, where each coarser chunk is exactly a run of finer
//! chunks and finer boundaries never depend on content outside their
//! enclosing chunk.
//!
//! The crate intentionally:
//! - does NOT manage files, paths or persistence
//! - does NOT enforce minimum or maximum chunk sizes
//! - does NOT manage concurrency
//!
//! # Boundaries
//!
//! ```
//! use rabinchunk::{BoundaryChunker, ChunkConfig, ChunkingStrategy, RabinKarpCdc};
//!
//! let strategy = RabinKarpCdc::new(ChunkConfig::default());
//! let mut chunker = strategy.create_multilevel_chunker(&[64, 512, 4096])?;
//!
//! let data = vec![0x5Au8; 100_000];
//! for boundary in chunker.boundaries(&data, 48) {
//!     println!("level {} chunk ends at {}", boundary.level, boundary.position);
//! }
//! # Ok::<(), rabinchunk::ChunkError>(())
//! ```
//!
//! # Sync
//!
//! ```no_run
//! use std::fs::File;
//! use rabinchunk::{ChunkConfig, ChunkError, ChunkIter, ChunkingStrategy, HashConfig, RabinKarpCdc};
//!
//! fn main() -> Result<(), ChunkError> {
//!     let file = File::open("data.bin")?;
//!     let chunker = RabinKarpCdc::new(ChunkConfig::default()).create_chunker(8192)?;
//!
//!     for chunk in ChunkIter::new(file, chunker, 48, HashConfig::enabled()) {
//!         let chunk = chunk?;
//!         println!("chunk {} bytes", chunk.data.len());
//!     }
//!     Ok(())
//! }
//! ```
//!
//! # Async (feature = "async-io")
//!
//! ```ignore
//! use futures_util::StreamExt;
//! use rabinchunk::{chunk_async, HashConfig, StaticChunker};
//! use futures_io::AsyncRead;
//!
//! async fn demo<R: AsyncRead + Unpin>(reader: R) -> Result<(), rabinchunk::ChunkError> {
//!     let mut stream = chunk_async(reader, StaticChunker::new(4096)?, 0, HashConfig::enabled());
//!
//!     while let Some(chunk) = stream.next().await {
//!         let chunk = chunk?;
//!         println!("chunk {}", chunk.data.len());
//!     }
//!     Ok(())
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod cdc;
mod chunk;
mod chunker;
mod config;
mod error;
mod table;

mod buffer; // internal (thread-local read slots)

#[cfg(feature = "async-io")]
mod async_stream;

pub use cdc::{
    LevelStack, MultiLevelChunker, RabinKarp, RabinKarpChunker, RollingHash,
    RollingWindow, StaticChunker, Threshold, BASE, HASH_BITS, HASH_MASK, HASH_MODULUS,
};
pub use chunk::{split_chunks, Chunk, ChunkHash, ChunkNode, ChunkTree};
pub use chunker::{
    Boundaries, Boundary, BoundaryChunker, ChunkIter, ChunkingStrategy, RabinKarpCdc,
    StaticChunking, StreamChunker,
};
pub use config::{ChunkConfig, HashConfig, DEFAULT_SEED, DEFAULT_WINDOW_SIZE};
pub use error::ChunkError;
pub use table::{SubstitutionTable, TABLE_SIZE};

#[cfg(feature = "async-io")]
pub use async_stream::{chunk_async, ChunkStream};
