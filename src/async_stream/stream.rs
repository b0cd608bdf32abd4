//! Async stream adapter for chunking.

use std::io::ErrorKind;
use std::pin::Pin;
use std::task::{Context, Poll};

use futures_core::Stream;
use futures_io::AsyncRead;
use pin_project_lite::pin_project;
use tracing::debug;

use crate::buffer::ScratchBuffer;
use crate::chunk::Chunk;
use crate::chunker::{BoundaryChunker, Pending};
use crate::config::HashConfig;
use crate::error::ChunkError;

pin_project! {
    /// A stream that yields chunks from an async reader.
    ///
    /// Yields the same chunks as [`ChunkIter`](crate::ChunkIter) would for
    /// the same bytes: one per boundary at any level, then a trailing chunk
    /// with no level. Interrupted reads are retried; after the end of input
    /// or an error the stream is exhausted.
    pub struct ChunkStream<R, C> {
        #[pin]
        reader: R,
        chunker: C,
        padding: usize,
        hash_config: HashConfig,
        scratch: ScratchBuffer,
        pending: Pending,
        finished: bool,
    }
}

impl<R: AsyncRead, C: BoundaryChunker> ChunkStream<R, C> {
    /// Creates a stream over `reader`, priming `chunker` with `prepend` zero
    /// bytes.
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
}

impl<R: AsyncRead, C: BoundaryChunker> Stream for ChunkStream<R, C> {
    type Item = Result<Chunk, ChunkError>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let mut this = self.project();

        if *this.finished {
            return Poll::Ready(None);
        }

        loop {
            if let Some(chunk) = this
                .pending
                .next_chunk(&mut *this.chunker, *this.padding, *this.hash_config)
            {
                return Poll::Ready(Some(Ok(chunk)));
            }

            match this.reader.as_mut().poll_read(cx, this.scratch.as_mut_slice()) {
                Poll::Pending => return Poll::Pending,
                Poll::Ready(Ok(0)) => {
                    *this.finished = true;
                    debug!(offset = this.pending.offset(), "async reader exhausted");
                    return Poll::Ready(this.pending.finish(*this.hash_config).map(Ok));
                }
                Poll::Ready(Ok(n)) => this.pending.extend(this.scratch.filled(n)),
                Poll::Ready(Err(e)) if e.kind() == ErrorKind::Interrupted => continue,
                Poll::Ready(Err(e)) => {
                    *this.finished = true;
                    debug!(offset = this.pending.offset(), error = %e, "async read failed");
                    return Poll::Ready(Some(Err(ChunkError::Io(e))));
                }
            }
        }
    }
}

/// Creates a chunk stream from an async reader.
///
/// For tokio readers, convert with `tokio_util::compat`:
///
/// ```ignore
/// use tokio_util::compat::TokioAsyncReadCompatExt;
/// use rabinchunk::{chunk_async, HashConfig, StaticChunker};
///
/// let file = tokio::fs::File::open("file").await?;
/// let stream = chunk_async(file.compat(), StaticChunker::new(4096)?, 0, HashConfig::enabled());
/// ```
///
/// # Example
///
/// ```ignore
/// use futures_util::StreamExt;
/// use futures_io::AsyncRead;
/// use rabinchunk::{chunk_async, ChunkConfig, ChunkingStrategy, HashConfig, RabinKarpCdc};
///
/// async fn demo<R: AsyncRead>(reader: R) -> Result<(), rabinchunk::ChunkError> {
///     let chunker = RabinKarpCdc::new(ChunkConfig::default()).create_multilevel_chunker(&[1024, 8192])?;
///     let stream = chunk_async(reader, chunker, 48, HashConfig::enabled());
///     futures_util::pin_mut!(stream);
///
///     while let Some(chunk) = stream.next().await {
///         let chunk = chunk?;
///         println!("{chunk}");
///     }
///     Ok(())
/// }
/// ```
pub fn chunk_async<R: AsyncRead, C: BoundaryChunker>(
    reader: R,
    chunker: C,
    prepend: usize,
    hash_config: HashConfig,
) -> ChunkStream<R, C> {
    ChunkStream::new(reader, chunker, prepend, hash_config)
}
