//! Algorithm selection tag.

use std::fmt;
use std::str::FromStr;

use gridsearch_core::{Grid, Pos};
use thiserror::Error;

use crate::astar::AStar;
use crate::bfs::BreadthFirst;
use crate::dfs::DepthFirst;
use crate::dijkstra::Dijkstra;
use crate::result::AlgorithmResult;
use crate::traits::Search;

/// The four supported search algorithms.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum AlgorithmKind {
    Bfs,
    Dfs,
    Dijkstra,
    AStar,
}

impl AlgorithmKind {
    pub const ALL: [AlgorithmKind; 4] = [
        AlgorithmKind::Bfs,
        AlgorithmKind::Dfs,
        AlgorithmKind::Dijkstra,
        AlgorithmKind::AStar,
    ];

    /// Short lowercase name, as accepted by [`FromStr`].
    pub fn name(self) -> &'static str {
        match self {
            AlgorithmKind::Bfs => "bfs",
            AlgorithmKind::Dfs => "dfs",
            AlgorithmKind::Dijkstra => "dijkstra",
            AlgorithmKind::AStar => "astar",
        }
    }

    /// Human-readable title.
    pub fn title(self) -> &'static str {
        match self {
            AlgorithmKind::Bfs => "Breadth-first search",
            AlgorithmKind::Dfs => "Depth-first search",
            AlgorithmKind::Dijkstra => "Dijkstra's algorithm",
            AlgorithmKind::AStar => "A* search",
        }
    }

    /// Whether the algorithm always returns a shortest path.
    pub fn is_optimal(self) -> bool {
        !matches!(self, AlgorithmKind::Dfs)
    }

    /// Run the matching strategy without any precondition checks.
    pub fn search(self, grid: &mut Grid, start: Pos, end: Pos) -> AlgorithmResult {
        match self {
            AlgorithmKind::Bfs => BreadthFirst.search(grid, start, end),
            AlgorithmKind::Dfs => DepthFirst.search(grid, start, end),
            AlgorithmKind::Dijkstra => Dijkstra.search(grid, start, end),
            AlgorithmKind::AStar => AStar.search(grid, start, end),
        }
    }
}

impl fmt::Display for AlgorithmKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Returned when a string names no known algorithm.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown algorithm {0:?} (expected one of: bfs, dfs, dijkstra, astar)")]
pub struct ParseKindError(pub String);

impl FromStr for AlgorithmKind {
    type Err = ParseKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bfs" => Ok(AlgorithmKind::Bfs),
            "dfs" => Ok(AlgorithmKind::Dfs),
            "dijkstra" => Ok(AlgorithmKind::Dijkstra),
            "astar" | "a*" => Ok(AlgorithmKind::AStar),
            _ => Err(ParseKindError(s.to_string())),
        }
    }
}
