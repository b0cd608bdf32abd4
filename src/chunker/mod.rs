//! Boundary detection contract and the adapters built on it.
//!
//! - [`BoundaryChunker`] - Stateful byte-at-a-time boundary detector
//! - [`ChunkingStrategy`] - Factories for single- and multi-level chunkers
//! - [`StreamChunker`] - `push()`/`finish()` engine over pushed buffers
//! - [`ChunkIter`] - Iterator over a [`std::io::Read`] source

mod boundary;
mod engine;
mod iter;
mod strategy;

pub use boundary::{Boundaries, Boundary, BoundaryChunker};
pub use engine::StreamChunker;
pub use iter::ChunkIter;
#[cfg(feature = "async-io")]
pub(crate) use iter::Pending;
pub use strategy::{ChunkingStrategy, RabinKarpCdc, StaticChunking};
