use gridsearch_core::{Grid, Pos};

use crate::frontier::Frontier;
use crate::kind::AlgorithmKind;
use crate::path::reconstruct;
use crate::result::AlgorithmResult;
use crate::traits::Search;

/// Dijkstra's algorithm with unit edge costs.
///
/// A node is finalized (marked visited and recorded) the first time it is
/// popped; stale frontier entries for finalized nodes are skipped.
#[derive(Copy, Clone, Debug, Default)]
pub struct Dijkstra;

impl Search for Dijkstra {
    fn search(&self, grid: &mut Grid, start: Pos, end: Pos) -> AlgorithmResult {
        let mut visited = Vec::new();
        let mut open = Frontier::new();

        grid[start].distance = 0;
        open.push(start, 0);

        while let Some(cur) = open.pop() {
            let node = &mut grid[cur];
            if node.visited || node.is_wall() {
                continue;
            }
            node.visited = true;
            let tentative = node.distance + 1;
            visited.push(cur);

            if cur == end {
                let path = reconstruct(grid, start, end, |n| n.distance);
                return AlgorithmResult::new(AlgorithmKind::Dijkstra, visited, path);
            }

            for np in grid.neighbors(cur, true) {
                let n = &mut grid[np];
                if n.is_wall() || tentative >= n.distance {
                    continue;
                }
                n.distance = tentative;
                n.predecessor = Some(cur);
                open.push(np, tentative);
            }
        }

        AlgorithmResult::new(AlgorithmKind::Dijkstra, visited, Vec::new())
    }
}
