use std::collections::VecDeque;

use gridsearch_core::{Grid, Pos};

use crate::kind::AlgorithmKind;
use crate::path::reconstruct;
use crate::result::AlgorithmResult;
use crate::traits::Search;

/// Breadth-first search: shortest paths by hop count.
///
/// Nodes are marked visited when enqueued, so none is queued twice, and are
/// recorded in the visitation order when dequeued.
#[derive(Copy, Clone, Debug, Default)]
pub struct BreadthFirst;

impl Search for BreadthFirst {
    fn search(&self, grid: &mut Grid, start: Pos, end: Pos) -> AlgorithmResult {
        let mut visited = Vec::new();
        let mut queue = VecDeque::new();

        grid[start].visited = true;
        grid[start].distance = 0;
        queue.push_back(start);

        while let Some(cur) = queue.pop_front() {
            visited.push(cur);
            if cur == end {
                let path = reconstruct(grid, start, end, |n| n.distance);
                return AlgorithmResult::new(AlgorithmKind::Bfs, visited, path);
            }

            let next_dist = grid[cur].distance + 1;
            for np in grid.neighbors(cur, true) {
                let n = &mut grid[np];
                if n.is_wall() {
                    continue;
                }
                n.visited = true;
                n.distance = next_dist;
                n.predecessor = Some(cur);
                queue.push_back(np);
            }
        }

        AlgorithmResult::new(AlgorithmKind::Bfs, visited, Vec::new())
    }
}
