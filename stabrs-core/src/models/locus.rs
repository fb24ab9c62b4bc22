use std::fmt::{self, Display};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::interval::Position;

/// A position we want the coverage for.
#[derive(Eq, PartialEq, Hash, Debug, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Locus {
    pub position: Position,
}

///
/// Coverage (read depth) at one position. This is one row of the result table.
///
#[derive(Eq, PartialEq, Hash, Debug, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Coverage {
    pub position: Position,
    pub coverage: u32,
}

impl Locus {
    pub fn new(position: Position) -> Self {
        Locus { position }
    }

    pub fn with_coverage(self, coverage: u32) -> Coverage {
        Coverage {
            position: self.position,
            coverage,
        }
    }
}

impl From<Position> for Locus {
    fn from(position: Position) -> Self {
        Locus { position }
    }
}

impl Display for Coverage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.position, self.coverage)
    }
}
