use std::borrow::Borrow;

use fxhash::FxHashSet;

use stabrs_core::models::{Interval, Position};

use crate::errors::SegTreeError;

/// The sorted, distinct positions that define the compressed coordinate space.
///
/// Every interval start and end ends up in here. A position `x` compresses to the
/// number of coordinates `<= x`, which for a member coordinate is its 1-based rank
/// and for anything below the smallest coordinate is `0`.
///
/// ```
/// use stabrs_segtree::CoordinateSet;
/// use stabrs_core::models::Interval;
///
/// let coords = CoordinateSet::from_intervals(&[Interval::new(3, 6), Interval::new(6, 50)]);
/// assert_eq!(coords.as_slice(), &[3, 6, 50]);
/// assert_eq!(coords.compress(6), 2);
/// assert_eq!(coords.compress(7), 2);
/// assert_eq!(coords.compress(1), 0);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CoordinateSet {
    values: Vec<Position>,
}

impl CoordinateSet {
    ///
    /// Collect every start and end of the given intervals, deduplicate and sort them.
    ///
    /// Inverted intervals still contribute their endpoints.
    pub fn from_intervals<I>(intervals: I) -> Self
    where
        I: IntoIterator,
        I::Item: Borrow<Interval>,
    {
        Self::from_positions(intervals.into_iter().flat_map(|iv| {
            let iv = iv.borrow();
            [iv.start, iv.end]
        }))
    }

    ///
    /// Deduplicate and sort an arbitrary bag of positions.
    ///
    pub fn from_positions<I>(positions: I) -> Self
    where
        I: IntoIterator<Item = Position>,
    {
        let distinct: FxHashSet<Position> = positions.into_iter().collect();
        let mut values: Vec<Position> = distinct.into_iter().collect();
        values.sort_unstable();
        CoordinateSet { values }
    }

    /// Number of coordinates `<= x` (the rightmost insertion point of `x`).
    ///
    /// Build and query both go through here. Any other rank function would
    /// silently corrupt counts.
    #[inline]
    pub fn compress(&self, x: Position) -> usize {
        self.values.partition_point(|&c| c <= x)
    }

    /// The 1-based rank of `x` if it is one of the coordinates.
    #[inline]
    pub fn member_rank(&self, x: Position) -> Option<usize> {
        let rank = self.compress(x);
        match rank {
            0 => None,
            r if self.values[r - 1] == x => Some(r),
            _ => None,
        }
    }

    pub fn contains(&self, x: Position) -> bool {
        self.member_rank(x).is_some()
    }

    pub fn get(&self, index: usize) -> Option<Position> {
        self.values.get(index).copied()
    }

    pub fn min(&self) -> Option<Position> {
        self.values.first().copied()
    }

    pub fn max(&self) -> Option<Position> {
        self.values.last().copied()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn as_slice(&self) -> &[Position] {
        &self.values
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Position> {
        self.values.iter()
    }

    pub fn into_vec(self) -> Vec<Position> {
        self.values
    }
}

impl TryFrom<Vec<Position>> for CoordinateSet {
    type Error = SegTreeError;

    /// Adopt an already sorted list, e.g. one loaded from a points cache.
    fn try_from(values: Vec<Position>) -> Result<Self, Self::Error> {
        if let Some(index) = values.windows(2).position(|w| w[0] >= w[1]) {
            return Err(SegTreeError::UnsortedCoordinates {
                index: index + 1,
                previous: values[index],
                current: values[index + 1],
            });
        }
        Ok(CoordinateSet { values })
    }
}

impl<'a> IntoIterator for &'a CoordinateSet {
    type Item = &'a Position;
    type IntoIter = std::slice::Iter<'a, Position>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::*;

    #[fixture]
    fn coords() -> CoordinateSet {
        CoordinateSet::from_intervals(vec![
            Interval::new(10, 20),
            Interval::new(3, 4),
            Interval::new(3, 4),
            Interval::new(6, 50),
        ])
    }

    #[rstest]
    fn test_from_intervals_sorts_and_dedups(coords: CoordinateSet) {
        assert_eq!(coords.as_slice(), &[3, 4, 6, 10, 20, 50]);
        assert_eq!(coords.len(), 6);
        assert_eq!(coords.min(), Some(3));
        assert_eq!(coords.max(), Some(50));
    }

    #[rstest]
    fn test_inverted_intervals_contribute_endpoints() {
        let coords = CoordinateSet::from_intervals(vec![Interval::new(9, 2)]);
        assert_eq!(coords.as_slice(), &[2, 9]);
    }

    #[rstest]
    #[case(2, 0)]
    #[case(3, 1)]
    #[case(5, 2)]
    #[case(6, 3)]
    #[case(50, 6)]
    #[case(1000, 6)]
    fn test_compress_is_count_of_coordinates_at_or_below(
        coords: CoordinateSet,
        #[case] x: Position,
        #[case] expected: usize,
    ) {
        assert_eq!(coords.compress(x), expected);
    }

    #[rstest]
    fn test_member_rank(coords: CoordinateSet) {
        assert_eq!(coords.member_rank(3), Some(1));
        assert_eq!(coords.member_rank(50), Some(6));
        assert_eq!(coords.member_rank(5), None);
        assert_eq!(coords.member_rank(-1), None);
        assert_eq!(coords.contains(20), true);
        assert_eq!(coords.contains(21), false);
    }

    #[rstest]
    fn test_try_from_sorted_vec() {
        let coords = CoordinateSet::try_from(vec![1, 5, 9]).unwrap();
        assert_eq!(coords.get(1), Some(5));
        assert_eq!(coords.get(3), None);
    }

    #[rstest]
    fn test_try_from_rejects_duplicates_and_unsorted() {
        let result = CoordinateSet::try_from(vec![1, 5, 5]);
        assert_eq!(
            result,
            Err(SegTreeError::UnsortedCoordinates {
                index: 2,
                previous: 5,
                current: 5
            })
        );

        assert!(CoordinateSet::try_from(vec![4, 2]).is_err());
    }

    #[rstest]
    fn test_empty() {
        let coords = CoordinateSet::from_intervals(Vec::<Interval>::new());
        assert_eq!(coords.is_empty(), true);
        assert_eq!(coords.compress(100), 0);
        assert_eq!(coords.min(), None);
    }
}
