//! Async streaming support for chunking.
//!
//! Chunks any `futures_io::AsyncRead`, so it works with tokio (through
//! `tokio_util::compat`), async-std, smol and other runtimes.
//!
//! - [`ChunkStream`] - Stream of chunks from an async reader
//! - [`chunk_async`] - Convenience constructor
//!
//! This module requires the `async-io` feature.

mod stream;

pub use stream::{chunk_async, ChunkStream};
