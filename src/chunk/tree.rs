//! Nested chunk tree rebuilt from multi-level boundaries.
//!
//! A boundary at level `t` closes the chunks of every level `<= t`, so the
//! chunks of each level are unions of the chunks one level below. This
//! module turns a flat boundary list into that hierarchy.

use std::ops::Range;

use tracing::debug;

use crate::chunker::Boundary;
use crate::error::ChunkError;

/// One chunk in a [`ChunkTree`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChunkNode {
    /// Byte range in the content.
    pub range: Range<usize>,
    /// Level of the chunk; 0 is the finest.
    pub level: usize,
    /// Sub-chunks one level below, in content order. Empty for level 0.
    pub children: Vec<ChunkNode>,
}

impl ChunkNode {
    /// Returns the length in bytes.
    pub fn len(&self) -> usize {
        self.range.len()
    }

    /// Returns true if the range is empty.
    pub fn is_empty(&self) -> bool {
        self.range.is_empty()
    }

    /// Returns true for level-0 chunks.
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    fn collect_level<'a>(&'a self, level: usize, out: &mut Vec<&'a ChunkNode>) {
        if self.level == level {
            out.push(self);
        } else if self.level > level {
            for child in &self.children {
                child.collect_level(level, out);
            }
        }
    }
}

/// The nested chunking of one content buffer.
///
/// # Example
///
/// ```
/// use rabinchunk::{Boundary, ChunkTree};
///
/// // 10 bytes; level 1 boundary at 6, level 0 boundaries at 3 and 8.
/// let boundaries = [Boundary::new(3, 0), Boundary::new(6, 1), Boundary::new(8, 0)];
/// let tree = ChunkTree::from_boundaries(10, &boundaries, 2)?;
///
/// assert_eq!(tree.roots().len(), 2);
/// assert_eq!(tree.roots()[0].range, 0..6);
/// let leaves: Vec<_> = tree.level(0).iter().map(|n| n.range.clone()).collect();
/// assert_eq!(leaves, vec![0..3, 3..6, 6..8, 8..10]);
/// # Ok::<(), rabinchunk::ChunkError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChunkTree {
    roots: Vec<ChunkNode>,
    levels: usize,
    len: usize,
}

impl ChunkTree {
    /// Builds the tree of `len` bytes of content from the boundaries of a
    /// single scan over it.
    ///
    /// Top-level nodes have level `levels - 1`. A boundary exactly at `len`
    /// is implied and may be omitted.
    ///
    /// # Errors
    ///
    /// Returns [`ChunkError::InvalidConfig`] if `levels` is zero, if a
    /// boundary level is not below `levels`, or if positions are not
    /// strictly increasing within `1..=len`.
    pub fn from_boundaries(
        len: usize,
        boundaries: &[Boundary],
        levels: usize,
    ) -> Result<Self, ChunkError> {
        if levels == 0 {
            return Err(ChunkError::InvalidConfig {
                message: "a chunk tree needs at least one level",
            });
        }
        if boundaries.iter().any(|b| b.level >= levels) {
            return Err(ChunkError::InvalidConfig {
                message: "boundary level exceeds tree depth",
            });
        }

        let mut previous = 0;
        for boundary in boundaries {
            if boundary.position <= previous || boundary.position > len {
                return Err(ChunkError::InvalidConfig {
                    message: "boundary positions must be strictly increasing and within the content",
                });
            }
            previous = boundary.position;
        }

        let inner = match boundaries.last() {
            Some(last) if last.position == len => &boundaries[..boundaries.len() - 1],
            _ => boundaries,
        };

        let roots = if len == 0 {
            Vec::new()
        } else {
            split(0..len, levels - 1, inner)
        };

        debug!(len, levels, roots = roots.len(), "built chunk tree");
        Ok(Self { roots, levels, len })
    }

    /// Returns the top-level nodes in content order.
    pub fn roots(&self) -> &[ChunkNode] {
        &self.roots
    }

    /// Returns the number of levels.
    pub fn levels(&self) -> usize {
        self.levels
    }

    /// Returns the content length covered.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true for the tree of empty content.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the nodes of one level in content order. They tile the
    /// content.
    pub fn level(&self, level: usize) -> Vec<&ChunkNode> {
        let mut out = Vec::new();
        for root in &self.roots {
            root.collect_level(level, &mut out);
        }
        out
    }
}

/// Splits `range` into nodes of `level`. `inner` holds the boundaries
/// strictly inside `range`, sorted by position.
fn split(range: Range<usize>, level: usize, inner: &[Boundary]) -> Vec<ChunkNode> {
    let cuts = inner
        .iter()
        .filter(|b| b.level >= level)
        .map(|b| b.position)
        .chain(std::iter::once(range.end));

    let mut nodes = Vec::new();
    let mut start = range.start;
    let mut rest = inner;

    for end in cuts {
        let (inside, tail) = rest.split_at(rest.partition_point(|b| b.position < end));
        let children = match level {
            0 => Vec::new(),
            _ => split(start..end, level - 1, inside),
        };
        nodes.push(ChunkNode {
            range: start..end,
            level,
            children,
        });

        rest = match tail.first() {
            Some(cut) if cut.position == end => &tail[1..],
            _ => tail,
        };
        start = end;
    }

    nodes
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ranges(nodes: &[&ChunkNode]) -> Vec<Range<usize>> {
        nodes.iter().map(|n| n.range.clone()).collect()
    }

    #[test]
    fn test_single_level() {
        let tree =
            ChunkTree::from_boundaries(5, &[Boundary::new(2, 0), Boundary::new(5, 0)], 1).unwrap();
        assert_eq!(ranges(&tree.level(0)), vec![0..2, 2..5]);
        assert!(tree.roots().iter().all(ChunkNode::is_leaf));
    }

    #[test]
    fn test_levels_nest() {
        let boundaries = [
            Boundary::new(2, 0),
            Boundary::new(4, 2),
            Boundary::new(6, 1),
            Boundary::new(7, 0),
            Boundary::new(9, 0),
        ];
        let tree = ChunkTree::from_boundaries(12, &boundaries, 3).unwrap();

        assert_eq!(ranges(&tree.level(2)), vec![0..4, 4..12]);
        assert_eq!(ranges(&tree.level(1)), vec![0..4, 4..6, 6..12]);
        assert_eq!(
            ranges(&tree.level(0)),
            vec![0..2, 2..4, 4..6, 6..7, 7..9, 9..12]
        );

        let second = &tree.roots()[1];
        assert_eq!(second.level, 2);
        assert_eq!(second.children.len(), 2);
        assert_eq!(second.children[1].children.len(), 3);
    }

    #[test]
    fn test_levels_tile_content() {
        let boundaries = [Boundary::new(3, 1), Boundary::new(5, 0)];
        let tree = ChunkTree::from_boundaries(8, &boundaries, 2).unwrap();
        for level in 0..2 {
            let nodes = tree.level(level);
            assert_eq!(nodes.first().unwrap().range.start, 0);
            assert_eq!(nodes.last().unwrap().range.end, 8);
            for pair in nodes.windows(2) {
                assert_eq!(pair[0].range.end, pair[1].range.start);
            }
        }
    }

    #[test]
    fn test_empty_content() {
        let tree = ChunkTree::from_boundaries(0, &[], 3).unwrap();
        assert!(tree.is_empty());
        assert!(tree.roots().is_empty());
        assert!(tree.level(0).is_empty());
    }

    #[test]
    fn test_rejects_invalid() {
        assert!(ChunkTree::from_boundaries(4, &[], 0).is_err());
        assert!(ChunkTree::from_boundaries(4, &[Boundary::new(2, 1)], 1).is_err());
        assert!(ChunkTree::from_boundaries(4, &[Boundary::new(5, 0)], 1).is_err());
        assert!(ChunkTree::from_boundaries(4, &[Boundary::new(0, 0)], 1).is_err());
        assert!(
            ChunkTree::from_boundaries(4, &[Boundary::new(2, 0), Boundary::new(2, 0)], 1).is_err()
        );
    }
}
