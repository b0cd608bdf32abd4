//! Strong digest of a chunk's bytes.

use std::fmt;

/// A 32-byte BLAKE3 digest identifying chunk content.
///
/// Rolling hash values decide boundaries; this digest only names the bytes
/// between them, e.g. as a deduplication key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChunkHash([u8; ChunkHash::SIZE]);

impl ChunkHash {
    /// Digest length in bytes.
    pub const SIZE: usize = 32;

    /// Wraps raw digest bytes.
    pub const fn new(bytes: [u8; Self::SIZE]) -> Self {
        Self(bytes)
    }

    /// Returns the raw digest bytes.
    pub fn as_bytes(&self) -> &[u8; Self::SIZE] {
        &self.0
    }

    /// Lowercase hex encoding, 64 characters.
    pub fn to_hex(&self) -> String {
        self.to_string()
    }

    /// Parses a 64-character hex string.
    pub fn from_hex(hex: &str) -> Option<Self> {
        if hex.len() != Self::SIZE * 2 || !hex.is_ascii() {
            return None;
        }

        let mut bytes = [0u8; Self::SIZE];
        for (byte, pair) in bytes.iter_mut().zip(hex.as_bytes().chunks_exact(2)) {
            let pair = std::str::from_utf8(pair).ok()?;
            *byte = u8::from_str_radix(pair, 16).ok()?;
        }
        Some(Self(bytes))
    }

    /// Digests `data` with BLAKE3.
    #[cfg(feature = "hash-blake3")]
    pub fn digest(data: &[u8]) -> Self {
        Self(*blake3::hash(data).as_bytes())
    }
}

impl From<[u8; ChunkHash::SIZE]> for ChunkHash {
    fn from(bytes: [u8; ChunkHash::SIZE]) -> Self {
        Self(bytes)
    }
}

impl AsRef<[u8]> for ChunkHash {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for ChunkHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.iter().try_for_each(|byte| write!(f, "{byte:02x}"))
    }
}
