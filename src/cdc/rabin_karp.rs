//! Rabin-Karp rolling hash over a fixed window.
//!
//! The hash of a window `w[0..n]` is
//!
//! ```text
//! H = sum(T[w[i]] * B^(n-1-i)) mod 2^29
//! ```
//!
//! where `T` is the seeded [`SubstitutionTable`] and `B = 37`. All arithmetic
//! wraps in `u32` and is masked down to 29 bits; because the modulus is a
//! power of two, wrapping intermediates never change the masked result.

use crate::config::ChunkConfig;
use crate::error::ChunkError;
use crate::table::SubstitutionTable;

use super::ring::RingBuffer;

/// Multiplier of the polynomial hash.
pub const BASE: u32 = 37;

/// Width of hash values in bits.
pub const HASH_BITS: u32 = 29;

/// Mask selecting the low [`HASH_BITS`] bits.
pub const HASH_MASK: u32 = (1 << HASH_BITS) - 1;

/// Number of distinct hash values.
pub const HASH_MODULUS: u64 = 1 << HASH_BITS;

/// The immutable part of a rolling hash: substitution table, window size and
/// the precomputed `B^n mod 2^29`.
///
/// One engine can drive any number of [`RollingWindow`]s of the same size.
/// This is how the multi-level chunker keeps one window per level while
/// sharing a single table.
#[derive(Debug, Clone)]
pub struct RabinKarp {
    table: SubstitutionTable,
    window_size: usize,
    b_to_n: u32,
}

impl RabinKarp {
    /// Creates an engine for windows of `window_size` bytes, with a table
    /// seeded by `seed`.
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

        let table = SubstitutionTable::build(seed, HASH_BITS)?;
        let b_to_n = (0..window_size).fold(1u32, |acc, _| acc.wrapping_mul(BASE) & HASH_MASK);

        Ok(Self {
            table,
            window_size,
            b_to_n,
        })
    }

    /// Creates an engine from the window size and seed of `config`.
    pub fn from_config(config: &ChunkConfig) -> Result<Self, ChunkError> {
        Self::new(config.window_size(), config.seed())
    }

    /// Returns a fresh, empty window sized for this engine.
    pub fn window(&self) -> RollingWindow {
        RollingWindow {
            bytes: RingBuffer::new(self.window_size),
            hash: 0,
        }
    }

    /// Returns the window size in bytes.
    pub fn window_size(&self) -> usize {
        self.window_size
    }

    /// Returns `B^n mod 2^29` for this window size.
    pub fn b_to_n(&self) -> u32 {
        self.b_to_n
    }

    /// Returns the substitution table.
    pub fn table(&self) -> &SubstitutionTable {
        &self.table
    }

    #[inline]
    fn substitute(&self, byte: u8) -> u32 {
        // 29-bit entries always fit.
        self.table.get(byte) as u32
    }

    /// Rolls `byte` into `window`, evicting the oldest byte once full.
    #[inline]
    pub fn update(&self, window: &mut RollingWindow, byte: u8) {
        debug_assert_eq!(window.bytes.capacity(), self.window_size);

        let shifted = BASE
            .wrapping_mul(window.hash)
            .wrapping_add(self.substitute(byte));

        window.hash = match window.bytes.push(byte) {
            None => shifted & HASH_MASK,
            Some(outgoing) => {
                shifted.wrapping_sub(self.b_to_n.wrapping_mul(self.substitute(outgoing))) & HASH_MASK
            }
        };
    }

    /// Rolls `count` zero bytes into `window`.
    pub fn pad(&self, window: &mut RollingWindow, count: usize) {
        // A full all-zero window is a fixed point of `update`; beyond the
        // first full window only the head phase changes.
        let count = if count > self.window_size {
            self.window_size + (count - self.window_size) % self.window_size
        } else {
            count
        };

        for _ in 0..count {
            self.update(window, 0);
        }
    }

    /// Computes the hash of `bytes` from scratch, without a window.
    ///
    /// Equals the rolling value of a window whose contents are exactly
    /// `bytes`, oldest first.
    pub fn hash_of(&self, bytes: &[u8]) -> u32 {
        bytes.iter().fold(0u32, |acc, &b| {
            BASE.wrapping_mul(acc).wrapping_add(self.substitute(b)) & HASH_MASK
        })
    }
}

/// The mutable part of a rolling hash: the window contents and current hash.
///
/// Created by [`RabinKarp::window`] and advanced by [`RabinKarp::update`].
#[derive(Debug, PartialEq, Eq)]
pub struct RollingWindow {
    bytes: RingBuffer,
    hash: u32,
}

impl RollingWindow {
    /// Returns the current hash value.
    #[inline]
    pub fn value(&self) -> u32 {
        self.hash
    }

    /// Returns how many bytes the window holds, saturating at its size.
    pub fn fill(&self) -> usize {
        self.bytes.len()
    }

    /// Returns true once the window has seen at least `window_size` bytes.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.bytes.is_full()
    }

    /// Iterates the window bytes, oldest first.
    pub fn bytes(&self) -> impl Iterator<Item = u8> + '_ {
        self.bytes.iter()
    }

    /// Resets the window to its initial empty state.
    pub fn clear(&mut self) {
        self.bytes.clear();
        self.hash = 0;
    }
}

impl Clone for RollingWindow {
    fn clone(&self) -> Self {
        Self {
            bytes: self.bytes.clone(),
            hash: self.hash,
        }
    }

    fn clone_from(&mut self, source: &Self) {
        self.bytes.clone_from(&source.bytes);
        self.hash = source.hash;
    }
}

/// A self-contained rolling hash: an engine plus one window.
///
/// # Example
///
/// ```
/// use rabinchunk::RollingHash;
///
/// let mut hash = RollingHash::new(4, 1)?;
/// for &b in b"abcdef" {
///     hash.update(b);
/// }
/// assert!(hash.is_full());
///
/// // The rolling value depends only on the last four bytes.
/// let mut fresh = RollingHash::new(4, 1)?;
/// for &b in b"cdef" {
///     fresh.update(b);
/// }
/// assert_eq!(hash.value(), fresh.value());
/// # Ok::<(), rabinchunk::ChunkError>(())
/// ```
#[derive(Debug, Clone)]
pub struct RollingHash {
    engine: RabinKarp,
    window: RollingWindow,
}

impl RollingHash {
    /// Creates an empty rolling hash.
    ///
    /// # Errors
    ///
    /// Returns [`ChunkError::InvalidConfig`] if `window_size` is zero.
    pub fn new(window_size: usize, seed: u32) -> Result<Self, ChunkError> {
        let engine = RabinKarp::new(window_size, seed)?;
        let window = engine.window();
        Ok(Self { engine, window })
    }

    /// Feeds one byte.
    #[inline]
    pub fn update(&mut self, byte: u8) {
        self.engine.update(&mut self.window, byte);
    }

    /// Feeds `count` zero bytes.
    pub fn pad(&mut self, count: usize) {
        self.engine.pad(&mut self.window, count);
    }

    /// Returns the current hash value.
    #[inline]
    pub fn value(&self) -> u32 {
        self.window.value()
    }

    /// Returns true once at least `window_size` bytes were fed.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.window.is_full()
    }

    /// Returns the number of bytes in the window.
    pub fn fill(&self) -> usize {
        self.window.fill()
    }

    /// Returns the window size.
    pub fn window_size(&self) -> usize {
        self.engine.window_size()
    }

    /// Returns the underlying engine.
    pub fn engine(&self) -> &RabinKarp {
        &self.engine
    }

    /// Returns the window state.
    pub fn window(&self) -> &RollingWindow {
        &self.window
    }

    /// Resets to the initial empty state.
    pub fn clear(&mut self) {
        self.window.clear();
    }
}

/// An absolute match threshold: a full window matches when its hash is
/// strictly below the threshold.
///
/// The threshold for a probability `p` is `round(p * 2^29)`, so a uniformly
/// distributed hash matches with probability `p`. Lower thresholds are more
/// restrictive and yield longer expected chunks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Threshold(u32);

impl Threshold {
    /// Converts a match probability in `(0, 1]` to a threshold.
    ///
    /// Probabilities below `2^-30` round to a threshold of zero, which never
    /// matches.
    ///
    /// # Errors
    ///
    /// Returns [`ChunkError::InvalidProbability`] for probabilities outside
    /// `(0, 1]`, including NaN.
    pub fn from_probability(probability: f64) -> Result<Self, ChunkError> {
        if !(probability > 0.0 && probability <= 1.0) {
            return Err(ChunkError::InvalidProbability { probability });
        }

        Ok(Self((probability * HASH_MODULUS as f64).round() as u32))
    }

    /// Threshold for an expected chunk size of `chunk_size` bytes, that is a
    /// probability of `1 / chunk_size`.
    ///
    /// # Errors
    ///
    /// Returns [`ChunkError::InvalidConfig`] if `chunk_size` is zero.
    pub fn from_chunk_size(chunk_size: usize) -> Result<Self, ChunkError> {
        if chunk_size == 0 {
            return Err(ChunkError::InvalidConfig {
                message: "chunk size must be non-zero",
            });
        }
        Self::from_probability(1.0 / chunk_size as f64)
    }

    /// Wraps an absolute threshold.
    pub const fn from_raw(value: u32) -> Self {
        Self(value)
    }

    /// Returns the absolute threshold.
    pub const fn value(self) -> u32 {
        self.0
    }

    /// Returns the match probability this threshold encodes.
    pub fn probability(self) -> f64 {
        self.0 as f64 / HASH_MODULUS as f64
    }

    /// Returns true if `hash` falls below the threshold.
    #[inline]
    pub const fn matches(self, hash: u32) -> bool {
        hash < self.0
    }
}
