//! Seeded substitution tables.
//!
//! A [`SubstitutionTable`] maps every byte value to a pseudo-random word. It is
//! the only source of randomness in the rolling hash, and it is fully
//! determined by `(seed, bits)`: chunkers on different machines that agree on
//! the seed agree on every boundary.

mod mt;

use crate::error::ChunkError;

use mt::Mt19937;

/// Number of entries in a table (one per byte value).
pub const TABLE_SIZE: usize = 256;

/// Pseudo-random word for every byte value.
///
/// # Example
///
/// ```
/// use rabinchunk::SubstitutionTable;
///
/// let table = SubstitutionTable::build(7, 29)?;
/// assert!(table.get(b'a') <= table.mask());
/// assert_eq!(table, SubstitutionTable::build(7, 29)?);
/// # Ok::<(), rabinchunk::ChunkError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubstitutionTable {
    values: [u64; TABLE_SIZE],
    bits: u32,
}

impl SubstitutionTable {
    /// Builds the table for `seed`, masking every entry to `bits` bits.
    ///
    /// Widths up to 32 bits draw from one 32-bit Mersenne Twister seeded with
    /// `seed`. A 64-bit table combines two 32-bit streams: the high halves
    /// come from a generator seeded with `seed`, the low halves from one
    /// seeded with `!seed`.
    ///
    /// # Errors
    ///
    /// Returns [`ChunkError::UnsupportedHashWidth`] for `bits == 0` and for
    /// widths in `33..=63` or above 64.
    pub fn build(seed: u32, bits: u32) -> Result<Self, ChunkError> {
        let mut values = [0u64; TABLE_SIZE];

        match bits {
            1..=32 => {
                let max = word_mask(bits) as u32;
                let mut rng = Mt19937::new(seed);
                for value in values.iter_mut() {
                    *value = u64::from(rng.next_bounded(max));
                }
            }
            64 => {
                let mut high = Mt19937::new(seed);
                let mut low = Mt19937::new(!seed);
                for value in values.iter_mut() {
                    let lo = u64::from(low.next_bounded(u32::MAX));
                    let hi = u64::from(high.next_bounded(u32::MAX));
                    *value = lo | (hi << 32);
                }
            }
            _ => return Err(ChunkError::UnsupportedHashWidth { bits }),
        }

        Ok(Self { values, bits })
    }

    /// Returns the word for `byte`.
    #[inline]
    pub fn get(&self, byte: u8) -> u64 {
        self.values[byte as usize]
    }

    /// Returns the entry width in bits.
    pub fn bits(&self) -> u32 {
        self.bits
    }

    /// Returns the all-ones mask of the entry width.
    pub fn mask(&self) -> u64 {
        word_mask(self.bits)
    }

    /// Returns all entries, indexed by byte value.
    pub fn as_slice(&self) -> &[u64; TABLE_SIZE] {
        &self.values
    }
}

/// All-ones mask covering the low `bits` bits.
pub(crate) const fn word_mask(bits: u32) -> u64 {
    if bits >= 64 {
        u64::MAX
    } else {
        (1u64 << bits) - 1
    }
}
