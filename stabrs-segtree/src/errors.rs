use thiserror::Error;

use stabrs_core::models::Position;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum SegTreeError {
    #[error(
        "Coordinates must be strictly increasing, found {current} after {previous} at index {index}"
    )]
    UnsortedCoordinates {
        index: usize,
        previous: Position,
        current: Position,
    },

    #[error(
        "Interval endpoint {0} is not in the coordinate set. Was the points cache built from different reads?"
    )]
    EndpointNotInCoordinates(Position),

    #[error("Inconsistent segment tree parts: {0}")]
    InconsistentParts(String),
}
