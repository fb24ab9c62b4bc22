//! Coordinate-compressed segment tree for stabbing queries on genomic intervals.
//!
//! Given a fixed multiset of closed intervals (sequencing reads, say), answer "how many
//! intervals contain this position?" in O(log n) per query after an O(m log n) build,
//! instead of scanning every interval for every query.
//!
//! The crate has two layers:
//!
//! - [`CoordinateSet`]: collects every interval endpoint, deduplicates and sorts them, and
//!   defines the compressed coordinate space.
//! - [`SegmentTree`]: a flat array of per-node counts over that space, populated with
//!   bottom-up range increments and queried by ascending from a leaf.
//!
//! ## Quick Start
//!
//! ```rust
//! use stabrs_segtree::{SegmentTree, Stabber, Interval};
//!
//! let reads = vec![
//!     Interval::new(100, 150),
//!     Interval::new(120, 200),
//!     Interval::new(300, 310),
//! ];
//!
//! let tree = <SegmentTree as Stabber>::build(reads);
//!
//! assert_eq!(tree.stab_query(130), 2);
//! assert_eq!(tree.stab_query(160), 1);
//! assert_eq!(tree.stab_query(250), 0);
//! ```
//!
//! [`NaiveScan`] implements the same [`Stabber`] trait with a linear scan and is handy as a
//! reference when checking results.

/// Coordinate compression.
///
/// See [`CoordinateSet`] for details.
pub mod coords;

pub mod errors;

/// Linear-scan reference implementation.
pub mod naive;

/// The stab-query segment tree.
///
/// See [`SegmentTree`] for details.
pub mod segment_tree;

/// Core trait for stabbing queries.
///
/// See [`Stabber`].
pub mod traits;

// re-exports
pub use self::coords::CoordinateSet;
pub use self::errors::SegTreeError;
pub use self::naive::NaiveScan;
pub use self::segment_tree::{BuildStats, SegmentTree};
pub use self::traits::{Interval, Stabber};

use std::fmt::{self, Display};
use std::str::FromStr;

/// The type of stabbing structure to use.
///
/// # Variants
///
/// * `SegmentTree` - O(log n) queries after an O(m log n) build. The default.
/// * `Naive` - O(m) queries, no build. Only sensible for small inputs or for checking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StabberType {
    #[default]
    SegmentTree,
    Naive,
}

impl FromStr for StabberType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "segtree" | "segment_tree" | "segment-tree" => Ok(StabberType::SegmentTree),
            "naive" => Ok(StabberType::Naive),
            _ => Err(format!(
                "Invalid backend type: {}. Valid options are 'segtree' or 'naive'",
                s
            )),
        }
    }
}

impl Display for StabberType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StabberType::SegmentTree => write!(f, "segtree"),
            StabberType::Naive => write!(f, "naive"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::*;

    #[rstest]
    #[case("segtree", StabberType::SegmentTree)]
    #[case("Segment-Tree", StabberType::SegmentTree)]
    #[case("naive", StabberType::Naive)]
    fn test_stabber_type_from_str(#[case] input: &str, #[case] expected: StabberType) {
        assert_eq!(input.parse::<StabberType>(), Ok(expected));
    }

    #[rstest]
    fn test_stabber_type_rejects_unknown() {
        assert!("ailist".parse::<StabberType>().is_err());
    }

    #[rstest]
    fn test_both_backends_agree() {
        let reads = vec![
            Interval::new(1, 10),
            Interval::new(5, 5),
            Interval::new(7, 12),
            Interval::new(20, 3),
        ];
        let tree = <SegmentTree as Stabber>::build(reads.clone());
        let naive = NaiveScan::build(reads);

        assert_eq!(tree.len(), naive.len());
        for x in -1..25 {
            assert_eq!(tree.stab_query(x), naive.stab_query(x));
        }
    }
}
