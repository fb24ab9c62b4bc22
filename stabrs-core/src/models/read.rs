#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::interval::{Interval, Position};

///
/// A sequencing read, as it comes out of a reads file: a start position and a length.
///
#[derive(Eq, PartialEq, Hash, Debug, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Read {
    pub start: Position,
    pub length: Position,
}

impl Read {
    pub fn new(start: Position, length: Position) -> Self {
        Read { start, length }
    }

    ///
    /// End of the read, `start + length`. Saturates instead of wrapping.
    ///
    pub fn end(&self) -> Position {
        self.start.saturating_add(self.length)
    }

    pub fn to_interval(&self) -> Interval {
        Interval::new(self.start, self.end())
    }
}

impl From<Read> for Interval {
    fn from(read: Read) -> Self {
        read.to_interval()
    }
}

impl From<&Read> for Interval {
    fn from(read: &Read) -> Self {
        read.to_interval()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::*;

    #[rstest]
    fn test_read_to_interval() {
        let read = Read::new(100, 7);
        assert_eq!(read.end(), 107);
        assert_eq!(Interval::from(&read), Interval::new(100, 107));
    }

    #[rstest]
    fn test_negative_length_gives_inverted_interval() {
        let read = Read::new(100, -5);
        assert_eq!(read.to_interval().is_inverted(), true);
    }

    #[rstest]
    fn test_end_saturates() {
        let read = Read::new(Position::MAX - 1, 10);
        assert_eq!(read.end(), Position::MAX);
    }
}
