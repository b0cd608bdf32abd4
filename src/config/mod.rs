//! Configuration for chunking behavior.
//!
//! - [`ChunkConfig`] - Rolling window size and table seed
//! - [`HashConfig`] - Chunk digest control for the adapters
//!
//! # Example
//!
//! ```
//! use rabinchunk::{ChunkConfig, HashConfig};
//!
//! // Custom window and seed
//! let config = ChunkConfig::new(64, 7)?;
//!
//! // Chunk digests are chosen per adapter
//! let hashing = HashConfig::disabled();
//! assert!(!hashing.enabled);
//!
//! # Ok::<(), rabinchunk::ChunkError>(())
//! ```

use crate::error::ChunkError;

/// Default rolling window size in bytes.
pub const DEFAULT_WINDOW_SIZE: usize = 48;

/// Default seed of the substitution table.
pub const DEFAULT_SEED: u32 = 0;

/// Configuration shared by the Rabin-Karp chunkers.
///
/// Two chunkers built from equal configurations and thresholds produce
/// identical boundaries for identical content, on any machine.
///
/// # Example
///
/// ```
/// use rabinchunk::ChunkConfig;
///
/// let config = ChunkConfig::default()
///     .with_window_size(32)
///     .with_seed(42);
/// assert_eq!(config.window_size(), 32);
/// assert_eq!(config.seed(), 42);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChunkConfig {
    /// Number of bytes covered by the rolling hash.
    window_size: usize,

    /// Seed of the pseudo-random substitution table.
    seed: u32,
}

impl ChunkConfig {
    /// Creates a new configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ChunkError::InvalidConfig`] if `window_size` is zero.
    pub fn new(window_size: usize, seed: u32) -> Result<Self, ChunkError> {
        if window_size == 0 {
            return Err(ChunkError::InvalidConfig {
                message: "window size must be non-zero",
            });
        }

        Ok(Self { window_size, seed })
    }

    /// Sets the rolling window size.
    ///
    /// Note: This does not validate the configuration. Use [`ChunkConfig::validate`]
    /// or let the chunker constructors reject it.
    pub fn with_window_size(mut self, window_size: usize) -> Self {
        self.window_size = window_size;
        self
    }

    /// Sets the substitution table seed.
    pub fn with_seed(mut self, seed: u32) -> Self {
        self.seed = seed;
        self
    }

    /// Returns the rolling window size.
    pub fn window_size(&self) -> usize {
        self.window_size
    }

    /// Returns the substitution table seed.
    pub fn seed(&self) -> u32 {
        self.seed
    }

    /// Validates the current configuration.
    pub fn validate(&self) -> Result<(), ChunkError> {
        Self::new(self.window_size, self.seed).map(|_| ())
    }
}

impl Default for ChunkConfig {
    fn default() -> Self {
        Self {
            window_size: DEFAULT_WINDOW_SIZE,
            seed: DEFAULT_SEED,
        }
    }
}

/// Configuration for chunk digests.
///
/// Controls whether BLAKE3 digests are attached to materialized [`Chunk`]s.
/// Each adapter ([`ChunkIter`], [`StreamChunker`], [`split_chunks`]) takes
/// one; boundary detection never depends on it.
///
/// [`Chunk`]: crate::Chunk
/// [`ChunkIter`]: crate::ChunkIter
/// [`StreamChunker`]: crate::StreamChunker
/// [`split_chunks`]: crate::split_chunks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HashConfig {
    /// Whether to compute BLAKE3 digests.
    pub enabled: bool,
}

impl HashConfig {
    /// Creates a new hash configuration.
    pub const fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    /// Enables hashing.
    pub const fn enabled() -> Self {
        Self { enabled: true }
    }

    /// Disables hashing.
    pub const fn disabled() -> Self {
        Self { enabled: false }
    }
}

impl Default for HashConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}
