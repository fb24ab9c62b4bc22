use log::{debug, warn};

use stabrs_core::models::{Interval, Position};

use crate::coords::CoordinateSet;
use crate::errors::SegTreeError;
use crate::Stabber;

/// The node at which a query ascent stops. The root is node `1`, node `0` is never
/// incremented.
///
/// Leaves live at `[n, 2n)`, so every ascent passes through the root for any `n`,
/// power of two or not. Insertion only ever increments nodes whose whole leaf set
/// lies inside the inserted range, which is why summing all the way up never
/// counts an interval twice.
pub const ASCENT_STOP: usize = 0;

/// Counters collected while building a [`SegmentTree`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildStats {
    /// Intervals that were inserted into the tree.
    pub inserted: usize,
    /// Inverted intervals (`start > end`), which cover nothing and are skipped.
    pub skipped: usize,
}

/// A segment tree over a compressed coordinate space, optimized for stabbing queries.
///
/// The tree is implicit: node `i` has children `2i` and `2i + 1`, and each node only
/// stores how many intervals cover its entire leaf range. Leaves are the coordinates,
/// at index `rank + leaf_offset` where `leaf_offset = n - 1`.
///
/// Building inserts every interval as a bottom-up range increment in O(log n). A query
/// maps the point to its leaf and sums the counts on the way to the root, also in
/// O(log n).
///
/// Positions strictly between two coordinates `c_i < x < c_{i+1}` land on the leaf of
/// `c_i`. Intervals that end exactly at `c_i` cover the leaf but not `x`, so the tree
/// keeps a per-coordinate count of intervals closing there and subtracts it.
///
/// # Examples
///
/// ```
/// use stabrs_segtree::{CoordinateSet, SegmentTree};
/// use stabrs_core::models::Interval;
///
/// let reads = vec![
///     Interval::new(3, 4),
///     Interval::new(3, 6),
///     Interval::new(10, 20),
///     Interval::new(6, 50),
/// ];
/// let coords = CoordinateSet::from_intervals(&reads);
/// let tree = SegmentTree::build(coords, reads).unwrap();
///
/// assert_eq!(tree.stab_query(3), 2);
/// assert_eq!(tree.stab_query(6), 2);
/// assert_eq!(tree.stab_query(15), 2);
/// assert_eq!(tree.stab_query(51), 0);
/// ```
#[derive(Debug, Clone)]
pub struct SegmentTree {
    coords: CoordinateSet,
    /// Per-node interval counts, `2n` entries.
    nodes: Vec<u32>,
    /// Per-coordinate count of intervals whose end is that coordinate.
    closing: Vec<u32>,
    leaf_offset: usize,
    stats: BuildStats,
}

// Equality covers the stored arrays only; build counters don't survive a snapshot.
impl PartialEq for SegmentTree {
    fn eq(&self, other: &Self) -> bool {
        self.leaf_offset == other.leaf_offset
            && self.coords == other.coords
            && self.nodes == other.nodes
            && self.closing == other.closing
    }
}

impl Eq for SegmentTree {}

impl SegmentTree {
    ///
    /// Build a tree over `coords` and insert every interval.
    ///
    /// Every interval endpoint must be one of the coordinates; a coordinate set built
    /// from other intervals is reported as [`SegTreeError::EndpointNotInCoordinates`].
    /// Inverted intervals are skipped and counted in [`BuildStats::skipped`].
    ///
    pub fn build<I>(coords: CoordinateSet, intervals: I) -> Result<Self, SegTreeError>
    where
        I: IntoIterator<Item = Interval>,
    {
        let mut tree = Self::with_coordinates(coords);

        for interval in intervals {
            tree.add(interval)?;
        }

        if tree.stats.skipped > 0 {
            warn!(
                "Skipped {} inverted intervals (start > end), they cover no position",
                tree.stats.skipped
            );
        }
        debug!(
            "Built segment tree: {} coordinates, {} nodes, {} intervals",
            tree.coords.len(),
            tree.nodes.len(),
            tree.stats.inserted
        );

        Ok(tree)
    }

    ///
    /// Reassemble a tree from its raw parts, as stored in a snapshot.
    ///
    pub fn from_parts(
        coords: CoordinateSet,
        nodes: Vec<u32>,
        closing: Vec<u32>,
        leaf_offset: usize,
    ) -> Result<Self, SegTreeError> {
        let n = coords.len();

        if nodes.len() != 2 * n {
            return Err(SegTreeError::InconsistentParts(format!(
                "expected {} node counts for {} coordinates, got {}",
                2 * n,
                n,
                nodes.len()
            )));
        }
        if closing.len() != n {
            return Err(SegTreeError::InconsistentParts(format!(
                "expected {} closing counts, got {}",
                n,
                closing.len()
            )));
        }
        if leaf_offset != Self::leaf_offset_for(n) {
            return Err(SegTreeError::InconsistentParts(format!(
                "leaf offset {} does not match {} coordinates",
                leaf_offset, n
            )));
        }

        let inserted = closing.iter().map(|&c| c as usize).sum();

        Ok(SegmentTree {
            coords,
            nodes,
            closing,
            leaf_offset,
            stats: BuildStats {
                inserted,
                skipped: 0,
            },
        })
    }

    fn with_coordinates(coords: CoordinateSet) -> Self {
        let n = coords.len();
        SegmentTree {
            nodes: vec![0; 2 * n],
            closing: vec![0; n],
            leaf_offset: Self::leaf_offset_for(n),
            coords,
            stats: BuildStats::default(),
        }
    }

    /// One less than the index of the first leaf.
    fn leaf_offset_for(n: usize) -> usize {
        n.saturating_sub(1)
    }

    fn add(&mut self, interval: Interval) -> Result<(), SegTreeError> {
        if interval.is_inverted() {
            self.stats.skipped += 1;
            return Ok(());
        }

        let start = self
            .coords
            .member_rank(interval.start)
            .ok_or(SegTreeError::EndpointNotInCoordinates(interval.start))?;
        let end = self
            .coords
            .member_rank(interval.end)
            .ok_or(SegTreeError::EndpointNotInCoordinates(interval.end))?;

        self.insert(start, end);
        self.closing[end - 1] += 1;
        self.stats.inserted += 1;

        Ok(())
    }

    // Increments exactly the boundary nodes whose sibling is not inside the range:
    // an odd left bound is a right child, an even right bound is a left child.
    fn insert(&mut self, start_rank: usize, end_rank: usize) {
        debug_assert!(start_rank >= 1 && end_rank <= self.coords.len());

        let mut l = start_rank + self.leaf_offset;
        let mut r = end_rank + self.leaf_offset;

        while l <= r {
            if l % 2 == 1 {
                self.nodes[l] += 1;
            }
            l = (l + 1) / 2;
            if r % 2 == 0 {
                self.nodes[r] += 1;
            }
            r = (r - 1) / 2;
        }
    }

    #[inline]
    fn leaf_index(&self, rank: usize) -> usize {
        rank + self.leaf_offset
    }

    fn ascend(&self, leaf: usize) -> u32 {
        let mut count = 0;
        let mut node = leaf;
        while node != ASCENT_STOP {
            match self.nodes.get(node) {
                Some(c) => count += c,
                None => break,
            }
            node /= 2;
        }
        count
    }

    ///
    /// Count the intervals covering `point`.
    ///
    /// Points below the smallest coordinate or above the largest have no covering
    /// interval and give `0`.
    ///
    pub fn stab_query(&self, point: Position) -> u32 {
        let rank = self.coords.compress(point);
        if rank == 0 {
            return 0;
        }

        let count = self.ascend(self.leaf_index(rank));

        if self.coords.get(rank - 1) == Some(point) {
            count
        } else {
            count.saturating_sub(self.closing[rank - 1])
        }
    }

    /// Query many points at once, results come back in the same order.
    pub fn stab_query_many<I>(&self, points: I) -> Vec<u32>
    where
        I: IntoIterator<Item = Position>,
    {
        points.into_iter().map(|p| self.stab_query(p)).collect()
    }

    pub fn coordinates(&self) -> &CoordinateSet {
        &self.coords
    }

    pub fn nodes(&self) -> &[u32] {
        &self.nodes
    }

    pub fn closing(&self) -> &[u32] {
        &self.closing
    }

    pub fn leaf_offset(&self) -> usize {
        self.leaf_offset
    }

    pub fn stats(&self) -> BuildStats {
        self.stats
    }
}

impl Stabber for SegmentTree {
    fn build(intervals: Vec<Interval>) -> Self {
        let coords = CoordinateSet::from_intervals(&intervals);
        match SegmentTree::build(coords, intervals) {
            Ok(tree) => tree,
            Err(_) => unreachable!("coordinates are derived from the same intervals"),
        }
    }

    fn stab_query(&self, point: Position) -> u32 {
        SegmentTree::stab_query(self, point)
    }

    fn len(&self) -> usize {
        self.stats.inserted
    }
}
