use thiserror::Error;

use crate::geom::{Dims, Pos};

/// Errors returned by grid edits and layout parsing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("position {pos} is outside the {dims} grid")]
    OutOfBounds { pos: Pos, dims: Dims },

    #[error("cell {0} holds the start or end and cannot become a wall")]
    Endpoint(Pos),

    #[error("cell {0} is a wall")]
    Wall(Pos),

    #[error("start and end cannot share cell {0}")]
    SameEndpoints(Pos),

    #[error("layout is empty")]
    EmptyLayout,

    #[error("layout row {row} is {found} cells wide, expected {expected}")]
    InconsistentWidth {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("layout contains invalid character {ch:?} at {pos}")]
    InvalidChar { ch: char, pos: Pos },

    #[error("layout has more than one {0} marker")]
    DuplicateEndpoint(&'static str),
}
