use gridsearch_core::{Grid, Pos};

use crate::kind::AlgorithmKind;
use crate::path::reconstruct;
use crate::result::AlgorithmResult;
use crate::traits::Search;

/// Stack-based depth-first search.
///
/// Finds *a* path when one exists, not necessarily a short one. Nodes are
/// marked visited on discovery and recorded when popped; neighbors are
/// pushed in enumeration order, so the rightward one is explored first.
#[derive(Copy, Clone, Debug, Default)]
pub struct DepthFirst;

impl Search for DepthFirst {
    fn search(&self, grid: &mut Grid, start: Pos, end: Pos) -> AlgorithmResult {
        let mut visited = Vec::new();
        let mut stack = vec![start];
        grid[start].visited = true;
        grid[start].distance = 0;

        while let Some(cur) = stack.pop() {
            visited.push(cur);
            if cur == end {
                let path = reconstruct(grid, start, end, |n| n.distance);
                return AlgorithmResult::new(AlgorithmKind::Dfs, visited, path);
            }

            let depth = grid[cur].distance + 1;
            for np in grid.neighbors(cur, true) {
                let n = &mut grid[np];
                if n.is_wall() {
                    continue;
                }
                n.visited = true;
                n.distance = depth;
                n.predecessor = Some(cur);
                stack.push(np);
            }
        }

        AlgorithmResult::new(AlgorithmKind::Dfs, visited, Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(row: usize, col: usize) -> Pos {
        Pos::new(row, col)
    }

    #[test]
    fn explores_rightward_first() {
        let mut g = Grid::new(3, 3);
        let r = DepthFirst.search(&mut g, p(0, 0), p(2, 2));
        assert_eq!(r.visited, vec![p(0, 0), p(0, 1), p(0, 2), p(1, 2), p(2, 2)]);
        assert_eq!(r.path, r.visited);
    }

    #[test]
    fn path_may_be_longer_than_shortest() {
        let mut g = Grid::new(3, 3);
        let r = DepthFirst.search(&mut g, p(0, 0), p(2, 0));
        // Shortest is three cells; depth-first snakes round the right side.
        assert_eq!(r.path.len(), 7);
        assert_eq!(r.path.first(), Some(&p(0, 0)));
        assert_eq!(r.path.last(), Some(&p(2, 0)));
        for w in r.path.windows(2) {
            assert_eq!(w[0].manhattan(w[1]), 1);
        }
    }

    #[test]
    fn walled_in_start_visits_only_itself() {
        let mut g = Grid::from_ascii(
            "
            E#.
            #S#
            .#.
            ",
        )
        .unwrap();
        let r = DepthFirst.search(&mut g, p(1, 1), p(0, 0));
        assert_eq!(r.visited, vec![p(1, 1)]);
        assert!(r.path.is_empty());
    }
}
