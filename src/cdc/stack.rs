//! Multi-level chunking from independent single-level chunkers.

use crate::chunker::BoundaryChunker;
use crate::error::ChunkError;

/// Runs one chunker per level over the same bytes.
///
/// Unlike [`MultiLevelChunker`](crate::MultiLevelChunker), levels never
/// restart one another; when several levels end at the same byte, the
/// highest one is reported. Levels are the positions in the stack, so inner
/// chunkers should be single-level.
///
/// # Example
///
/// ```
/// use rabinchunk::{Boundary, BoundaryChunker, LevelStack, StaticChunker};
///
/// let mut stack = LevelStack::new(vec![StaticChunker::new(2)?, StaticChunker::new(4)?])?;
/// assert_eq!(
///     stack.next_boundaries_with_levels(&[0; 4], 0),
///     vec![Boundary::new(2, 0), Boundary::new(4, 1)]
/// );
/// # Ok::<(), rabinchunk::ChunkError>(())
/// ```
#[derive(Debug, Clone)]
pub struct LevelStack<C> {
    levels: Vec<C>,
}

impl<C: BoundaryChunker> LevelStack<C> {
    /// Stacks `levels`, finest first.
    ///
    /// # Errors
    ///
    /// Returns [`ChunkError::InvalidConfig`] if `levels` is empty.
    pub fn new(levels: Vec<C>) -> Result<Self, ChunkError> {
        if levels.is_empty() {
            return Err(ChunkError::InvalidConfig {
                message: "at least one level is required",
            });
        }
        Ok(Self { levels })
    }

    /// Returns the chunker of one level.
    pub fn level(&self, level: usize) -> Option<&C> {
        self.levels.get(level)
    }
}

impl<C: BoundaryChunker> BoundaryChunker for LevelStack<C> {
    fn levels(&self) -> usize {
        self.levels.len()
    }

    fn prime(&mut self, padding: usize) {
        for chunker in &mut self.levels {
            chunker.prime(padding);
        }
    }

    fn scan(&mut self, byte: u8, padding: usize) -> Option<usize> {
        let mut matched = None;
        for (level, chunker) in self.levels.iter_mut().enumerate() {
            if chunker.scan(byte, padding).is_some() {
                matched = Some(level);
            }
        }
        matched
    }

    fn reset(&mut self) {
        for chunker in &mut self.levels {
            chunker.reset();
        }
    }
}
