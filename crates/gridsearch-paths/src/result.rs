use gridsearch_core::Pos;

use crate::kind::AlgorithmKind;

/// Outcome of one search run.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AlgorithmResult {
    pub kind: AlgorithmKind,
    /// Cells in the order the algorithm finalized them.
    pub visited: Vec<Pos>,
    /// Start to end inclusive, or empty when the end was not reached.
    pub path: Vec<Pos>,
}

impl AlgorithmResult {
    pub fn new(kind: AlgorithmKind, visited: Vec<Pos>, path: Vec<Pos>) -> Self {
        Self {
            kind,
            visited,
            path,
        }
    }

    #[inline]
    pub fn path_found(&self) -> bool {
        !self.path.is_empty()
    }

    #[inline]
    pub fn nodes_visited(&self) -> usize {
        self.visited.len()
    }

    #[inline]
    pub fn path_length(&self) -> usize {
        self.path.len()
    }
}
