//! Chunking strategies: factories of chunkers for a target chunk size.

use super::BoundaryChunker;
use crate::cdc::{LevelStack, MultiLevelChunker, RabinKarpChunker, StaticChunker, Threshold};
use crate::config::ChunkConfig;
use crate::error::ChunkError;

/// Creates chunkers from expected chunk sizes.
///
/// # Example
///
/// ```
/// use rabinchunk::{BoundaryChunker, ChunkConfig, ChunkingStrategy, RabinKarpCdc, StaticChunking};
///
/// fn levels<S: ChunkingStrategy>(strategy: &S) -> Result<usize, rabinchunk::ChunkError> {
///     Ok(strategy.create_multilevel_chunker(&[16, 64, 256])?.levels())
/// }
///
/// assert_eq!(levels(&RabinKarpCdc::new(ChunkConfig::default()))?, 3);
/// assert_eq!(levels(&StaticChunking)?, 3);
/// # Ok::<(), rabinchunk::ChunkError>(())
/// ```
pub trait ChunkingStrategy {
    /// Single-level chunker type.
    type Chunker: BoundaryChunker;

    /// Multi-level chunker type.
    type MultiLevel: BoundaryChunker;

    /// Creates a chunker with an expected chunk size of `chunk_size` bytes.
    fn create_chunker(&self, chunk_size: usize) -> Result<Self::Chunker, ChunkError>;

    /// Creates a chunker with one level per chunk size, finest first.
    fn create_multilevel_chunker(&self, chunk_sizes: &[usize])
    -> Result<Self::MultiLevel, ChunkError>;
}

/// Content-defined chunking with Rabin-Karp rolling hashes.
///
/// A chunk size `s` becomes a match probability of `1 / s`. Multi-level
/// chunk sizes must be ascending.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RabinKarpCdc {
    config: ChunkConfig,
}

impl RabinKarpCdc {
    /// Creates the strategy with the window size and seed of `config`.
    pub fn new(config: ChunkConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration.
    pub fn config(&self) -> &ChunkConfig {
        &self.config
    }
}

impl ChunkingStrategy for RabinKarpCdc {
    type Chunker = RabinKarpChunker;
    type MultiLevel = MultiLevelChunker;

    fn create_chunker(&self, chunk_size: usize) -> Result<RabinKarpChunker, ChunkError> {
        RabinKarpChunker::new(&self.config, Threshold::from_chunk_size(chunk_size)?)
    }

    fn create_multilevel_chunker(
        &self,
        chunk_sizes: &[usize],
    ) -> Result<MultiLevelChunker, ChunkError> {
        let thresholds = chunk_sizes
            .iter()
            .map(|&size| Threshold::from_chunk_size(size))
            .collect::<Result<Vec<_>, _>>()?;
        MultiLevelChunker::new(&self.config, &thresholds)
    }
}

/// Fixed-size chunking.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StaticChunking;

impl ChunkingStrategy for StaticChunking {
    type Chunker = StaticChunker;
    type MultiLevel = LevelStack<StaticChunker>;

    fn create_chunker(&self, chunk_size: usize) -> Result<StaticChunker, ChunkError> {
        StaticChunker::new(chunk_size)
    }

    fn create_multilevel_chunker(
        &self,
        chunk_sizes: &[usize],
    ) -> Result<LevelStack<StaticChunker>, ChunkError> {
        let levels = chunk_sizes
            .iter()
            .map(|&size| StaticChunker::new(size))
            .collect::<Result<Vec<_>, _>>()?;
        LevelStack::new(levels)
    }
}
