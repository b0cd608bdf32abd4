//! Error types for rabinchunk.

use thiserror::Error;

/// Errors that can occur while configuring chunkers or reading input.
///
/// Configuration problems surface when a chunker is constructed; scanning
/// itself never fails. Only the reader adapters can report [`ChunkError::Io`].
#[derive(Debug, Error)]
pub enum ChunkError {
    /// An I/O error occurred while reading input data.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid configuration parameter.
    #[error("invalid config: {message}")]
    InvalidConfig {
        /// Description of what was invalid.
        message: &'static str,
    },

    /// The substitution table cannot be built for this word width.
    #[error("unsupported hash width: {bits} bits (expected 1..=32 or 64)")]
    UnsupportedHashWidth {
        /// Requested width in bits.
        bits: u32,
    },

    /// A match probability outside `(0, 1]`.
    #[error("invalid match probability: {probability} (expected 0 < p <= 1)")]
    InvalidProbability {
        /// The rejected probability.
        probability: f64,
    },

    /// Thresholds of a multi-level chunker must not grow with the level.
    #[error(
        "thresholds out of order at level {level}: {current} is less restrictive than {previous}"
    )]
    UnorderedThresholds {
        /// Index of the offending level.
        level: usize,
        /// Absolute threshold of the level before it.
        previous: u32,
        /// Absolute threshold of the offending level.
        current: u32,
    },
}
