//! The boundary-detection contract shared by every chunker.

use std::iter::FusedIterator;
use std::slice;

/// A chunk boundary: the chunk ends just before `position`.
///
/// `position` is 1-based relative to the content of the call that produced
/// it, so a boundary at `position` closes a chunk whose last byte is
/// `content[position - 1]`. `level` is the coarsest level closed there; a
/// boundary at level `t` also closes every level below `t`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Boundary {
    /// Offset just past the last byte of the chunk.
    pub position: usize,
    /// Coarsest level that ends here.
    pub level: usize,
}

impl Boundary {
    /// Creates a boundary.
    pub const fn new(position: usize, level: usize) -> Self {
        Self { position, level }
    }
}

/// A stateful boundary detector.
///
/// Implementors consume bytes one at a time and report where chunks end.
/// State carries over between calls, so splitting content across several
/// calls yields the same boundaries as one call (with positions relative to
/// each call).
///
/// # Example
///
/// ```
/// use rabinchunk::{BoundaryChunker, StaticChunker};
///
/// let mut chunker = StaticChunker::new(4)?;
/// assert_eq!(chunker.next_boundaries(&[0; 10], 0), vec![4, 8]);
/// // Two bytes are still pending from the first call.
/// assert_eq!(chunker.next_boundaries(&[0; 4], 0), vec![2]);
/// # Ok::<(), rabinchunk::ChunkError>(())
/// ```
pub trait BoundaryChunker {
    /// Number of levels this chunker reports. Levels are `0..levels()`,
    /// higher is coarser.
    fn levels(&self) -> usize;

    /// Feeds `padding` synthetic zero bytes without reporting boundaries.
    fn prime(&mut self, padding: usize);

    /// Consumes one byte and returns the level of the boundary ending at it.
    ///
    /// `padding` is the number of zero bytes fed to levels that restart
    /// after a boundary; single-level chunkers ignore it.
    fn scan(&mut self, byte: u8, padding: usize) -> Option<usize>;

    /// Returns to the freshly constructed state.
    fn reset(&mut self);

    /// Primes the chunker with `prepend` zero bytes and lazily scans
    /// `content`.
    ///
    /// Bytes are consumed as the iterator advances; dropping it early leaves
    /// the rest of `content` unscanned.
    fn boundaries<'a>(&'a mut self, content: &'a [u8], prepend: usize) -> Boundaries<'a, Self>
    where
        Self: Sized,
    {
        self.prime(prepend);
        Boundaries {
            chunker: self,
            bytes: content.iter().enumerate(),
            padding: prepend,
        }
    }

    /// Scans all of `content` and returns the boundary positions.
    fn next_boundaries(&mut self, content: &[u8], prepend: usize) -> Vec<usize>
    where
        Self: Sized,
    {
        self.boundaries(content, prepend)
            .map(|boundary| boundary.position)
            .collect()
    }

    /// Scans all of `content` and returns the boundaries with their levels.
    fn next_boundaries_with_levels(&mut self, content: &[u8], prepend: usize) -> Vec<Boundary>
    where
        Self: Sized,
    {
        self.boundaries(content, prepend).collect()
    }
}

impl<C: BoundaryChunker + ?Sized> BoundaryChunker for &mut C {
    fn levels(&self) -> usize {
        (**self).levels()
    }

    fn prime(&mut self, padding: usize) {
        (**self).prime(padding)
    }

    #[inline]
    fn scan(&mut self, byte: u8, padding: usize) -> Option<usize> {
        (**self).scan(byte, padding)
    }

    fn reset(&mut self) {
        (**self).reset()
    }
}

impl<C: BoundaryChunker + ?Sized> BoundaryChunker for Box<C> {
    fn levels(&self) -> usize {
        (**self).levels()
    }

    fn prime(&mut self, padding: usize) {
        (**self).prime(padding)
    }

    #[inline]
    fn scan(&mut self, byte: u8, padding: usize) -> Option<usize> {
        (**self).scan(byte, padding)
    }

    fn reset(&mut self) {
        (**self).reset()
    }
}

/// Lazy iterator over the boundaries of one content slice.
///
/// Created by [`BoundaryChunker::boundaries`].
#[derive(Debug)]
pub struct Boundaries<'a, C> {
    chunker: &'a mut C,
    bytes: std::iter::Enumerate<slice::Iter<'a, u8>>,
    padding: usize,
}

impl<C: BoundaryChunker> Iterator for Boundaries<'_, C> {
    type Item = Boundary;

    fn next(&mut self) -> Option<Boundary> {
        for (i, &byte) in self.bytes.by_ref() {
            if let Some(level) = self.chunker.scan(byte, self.padding) {
                return Some(Boundary::new(i + 1, level));
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.bytes.len()))
    }
}

impl<C: BoundaryChunker> FusedIterator for Boundaries<'_, C> {}
