use std::fmt::{self, Display};

/// A raw genomic position.
pub type Position = i64;

/// Represent a closed range [start, end]
/// Both `start` and `end` are covered.
///
/// Inverted intervals (`start > end`) can be constructed, they just don't cover
/// anything. Consumers decide whether to skip them.
#[derive(Eq, PartialEq, PartialOrd, Ord, Hash, Debug, Clone, Copy)]
pub struct Interval {
    pub start: Position,
    pub end: Position,
}

impl Interval {
    pub fn new(start: Position, end: Position) -> Self {
        Interval { start, end }
    }

    /// Check if a point falls inside the interval, both ends inclusive
    #[inline]
    pub fn contains(&self, point: Position) -> bool {
        self.start <= point && point <= self.end
    }

    /// Whether `start` comes after `end`
    #[inline]
    pub fn is_inverted(&self) -> bool {
        self.start > self.end
    }

    ///
    /// Number of positions covered, zero for inverted intervals
    ///
    pub fn width(&self) -> u64 {
        if self.is_inverted() {
            0
        } else {
            self.end.abs_diff(self.start) + 1
        }
    }
}

impl From<(Position, Position)> for Interval {
    fn from(value: (Position, Position)) -> Self {
        Interval {
            start: value.0,
            end: value.1,
        }
    }
}

impl Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.start, self.end)
    }
}
