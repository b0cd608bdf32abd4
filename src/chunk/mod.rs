//! Chunk types.
//!
//! - [`Chunk`] - Materialized chunk with data, offset, level and digest
//! - [`ChunkHash`] - 32-byte BLAKE3 digest
//! - [`ChunkTree`] - Nested chunks rebuilt from multi-level boundaries

mod data;
mod hash;
mod tree;

pub use data::{split_chunks, Chunk};
pub use hash::ChunkHash;
pub use tree::{ChunkNode, ChunkTree};
