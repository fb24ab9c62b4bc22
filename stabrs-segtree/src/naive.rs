use stabrs_core::models::{Interval, Position};

use crate::Stabber;

/// Linear scan over every interval for each query.
///
/// O(m) per query, no preprocessing. Useful as an oracle for the segment tree and
/// for tiny inputs where building the tree isn't worth it.
///
/// ```
/// use stabrs_segtree::{NaiveScan, Stabber, Interval};
///
/// let scan = NaiveScan::build(vec![Interval::new(3, 6), Interval::new(6, 50)]);
/// assert_eq!(scan.stab_query(6), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct NaiveScan {
    intervals: Vec<Interval>,
}

impl Stabber for NaiveScan {
    fn build(intervals: Vec<Interval>) -> Self {
        let intervals = intervals
            .into_iter()
            .filter(|iv| !iv.is_inverted())
            .collect();
        NaiveScan { intervals }
    }

    fn stab_query(&self, point: Position) -> u32 {
        self.intervals.iter().filter(|iv| iv.contains(point)).count() as u32
    }

    fn len(&self) -> usize {
        self.intervals.len()
    }
}
