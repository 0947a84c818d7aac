use gridsearch_core::{Grid, Pos};

use crate::result::AlgorithmResult;

/// A search strategy over a [`Grid`].
///
/// Implementations expect a freshly reset grid, in-bounds passable `start`
/// and `end`, and `start != end`; [`SearchEngine`](crate::SearchEngine)
/// checks all of that before dispatching. They write only node scratch
/// fields and never touch display tags.
pub trait Search {
    /// Explore from `start` towards `end`, returning the visitation order and
    /// the path (empty when `end` is unreachable).
    fn search(&self, grid: &mut Grid, start: Pos, end: Pos) -> AlgorithmResult;
}
