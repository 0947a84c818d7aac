use gridsearch_core::{Grid, Pos};

use crate::frontier::Frontier;
use crate::kind::AlgorithmKind;
use crate::path::reconstruct;
use crate::result::AlgorithmResult;
use crate::traits::Search;

/// A* with the Manhattan heuristic.
///
/// Manhattan distance never overestimates under 4-way unit-cost moves and
/// is consistent, so the first time the goal is finalized its `g` is
/// optimal. Frontier ties on `f` pop in insertion order.
#[derive(Copy, Clone, Debug, Default)]
pub struct AStar;

impl Search for AStar {
    fn search(&self, grid: &mut Grid, start: Pos, end: Pos) -> AlgorithmResult {
        for node in grid.nodes_mut() {
            node.h = node.pos().manhattan(end);
        }

        let mut visited = Vec::new();
        let mut open = Frontier::new();

        let s = &mut grid[start];
        s.g = 0;
        s.f = s.h;
        open.push(start, s.f);

        while let Some(cur) = open.pop() {
            let node = &mut grid[cur];
            if node.visited || node.is_wall() {
                continue;
            }
            node.visited = true;
            let tentative = node.g + 1;
            visited.push(cur);

            if cur == end {
                let path = reconstruct(grid, start, end, |n| n.g);
                return AlgorithmResult::new(AlgorithmKind::AStar, visited, path);
            }

            for np in grid.neighbors(cur, true) {
                let n = &mut grid[np];
                if n.is_wall() || tentative >= n.g {
                    continue;
                }
                n.g = tentative;
                n.f = tentative + n.h;
                n.predecessor = Some(cur);
                open.push(np, n.f);
            }
        }

        AlgorithmResult::new(AlgorithmKind::AStar, visited, Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dijkstra::Dijkstra;

    fn p(row: usize, col: usize) -> Pos {
        Pos::new(row, col)
    }

    #[test]
    fn heads_straight_down_a_corridor() {
        let mut g = Grid::new(3, 5);
        let r = AStar.search(&mut g, p(1, 0), p(1, 4));
        assert_eq!(r.visited, vec![p(1, 0), p(1, 1), p(1, 2), p(1, 3), p(1, 4)]);
        assert_eq!(r.path, r.visited);

        let mut g = Grid::new(3, 5);
        let d = Dijkstra.search(&mut g, p(1, 0), p(1, 4));
        assert!(d.visited.len() > r.visited.len());
        assert_eq!(d.path.len(), r.path.len());
    }

    #[test]
    fn scores_are_consistent_after_run() {
        let mut g = Grid::from_ascii(
            "
            S..#...
            .#.#.#.
            .#...#E
            ",
        )
        .unwrap();
        let r = AStar.search(&mut g, p(0, 0), p(2, 6));
        assert!(r.path_found());
        let goal = &g[p(2, 6)];
        assert_eq!(goal.h, 0);
        assert_eq!(goal.g as usize, r.path.len() - 1);
        assert_eq!(g[p(0, 0)].h, 8);
        for &v in &r.visited {
            let n = &g[v];
            assert_eq!(n.f, n.g + n.h);
        }
    }

    #[test]
    fn unreachable_goal_drains_frontier() {
        let mut g = Grid::from_ascii(
            "
            S.#
            ..#
            ##E
            ",
        )
        .unwrap();
        let r = AStar.search(&mut g, p(0, 0), p(2, 2));
        assert!(r.path.is_empty());
        assert_eq!(r.visited.len(), 4);
    }
}
