//! Single-level Rabin-Karp chunker.

use tracing::debug;

use super::rabin_karp::{RollingHash, Threshold};
use crate::chunker::BoundaryChunker;
use crate::config::ChunkConfig;
use crate::error::ChunkError;

/// Emits a boundary after every byte at which the full window's hash falls
/// below the threshold.
///
/// No minimum or maximum chunk size is enforced: boundaries may be adjacent,
/// and content shorter than the window never produces one.
///
/// # Example
///
/// ```
/// use rabinchunk::{BoundaryChunker, ChunkConfig, RabinKarpChunker, Threshold};
///
/// let config = ChunkConfig::default();
/// let mut chunker = RabinKarpChunker::new(&config, Threshold::from_chunk_size(64)?)?;
///
/// let data: Vec<u8> = (0..4096u32).map(|i| (i * 7 % 251) as u8).collect();
/// let positions = chunker.next_boundaries(&data, 0);
/// assert!(positions.windows(2).all(|w| w[0] < w[1]));
/// # Ok::<(), rabinchunk::ChunkError>(())
/// ```
#[derive(Debug, Clone)]
pub struct RabinKarpChunker {
    hash: RollingHash,
    threshold: Threshold,
}

impl RabinKarpChunker {
    /// Creates a chunker over the window and seed of `config`.
    ///
    /// # Errors
    ///
    /// Returns [`ChunkError::InvalidConfig`] if the window size is zero.
    pub fn new(config: &ChunkConfig, threshold: Threshold) -> Result<Self, ChunkError> {
        config.validate()?;
        let hash = RollingHash::new(config.window_size(), config.seed())?;

        debug!(
            window_size = config.window_size(),
            seed = config.seed(),
            threshold = threshold.value(),
            "rabin-karp chunker ready"
        );

        Ok(Self { hash, threshold })
    }

    /// Creates a chunker matching with probability `probability`.
    pub fn with_probability(config: &ChunkConfig, probability: f64) -> Result<Self, ChunkError> {
        Self::new(config, Threshold::from_probability(probability)?)
    }

    /// Lazily yields boundary positions in `content`, after priming with
    /// `prepend` zero bytes.
    pub fn positions<'a>(
        &'a mut self,
        content: &'a [u8],
        prepend: usize,
    ) -> impl Iterator<Item = usize> + 'a {
        self.boundaries(content, prepend).map(|boundary| boundary.position)
    }

    /// Returns the threshold.
    pub fn threshold(&self) -> Threshold {
        self.threshold
    }

    /// Returns the window size.
    pub fn window_size(&self) -> usize {
        self.hash.window_size()
    }

    /// Returns the rolling hash state.
    pub fn rolling_hash(&self) -> &RollingHash {
        &self.hash
    }
}

impl BoundaryChunker for RabinKarpChunker {
    fn levels(&self) -> usize {
        1
    }

    fn prime(&mut self, padding: usize) {
        self.hash.pad(padding);
    }

    #[inline]
    fn scan(&mut self, byte: u8, _padding: usize) -> Option<usize> {
        self.hash.update(byte);
        (self.hash.is_full() && self.threshold.matches(self.hash.value())).then_some(0)
    }

    fn reset(&mut self) {
        self.hash.clear();
    }
}
