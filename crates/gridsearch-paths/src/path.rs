use gridsearch_core::{Grid, Node, Pos};
use log::warn;

/// Walk predecessor links back from `end` and return the start-to-end path.
///
/// The chain must begin at `start` with zero accumulated `cost`; otherwise
/// an empty path is returned instead of a partial one.
pub(crate) fn reconstruct(
    grid: &Grid,
    start: Pos,
    end: Pos,
    cost: impl Fn(&Node) -> u32,
) -> Vec<Pos> {
    let limit = grid.dims().len();
    let mut path = Vec::new();
    let mut cur = Some(end);
    while let Some(p) = cur {
        if path.len() == limit {
            warn!("predecessor chain from {end} does not terminate");
            return Vec::new();
        }
        path.push(p);
        cur = grid[p].predecessor;
    }
    path.reverse();

    let first = path[0];
    if first != start || cost(&grid[first]) != 0 {
        warn!(
            "predecessor chain from {end} ends at {first} (cost {}), not at start {start}",
            cost(&grid[first])
        );
        return Vec::new();
    }
    path
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(row: usize, col: usize) -> Pos {
        Pos::new(row, col)
    }

    fn link(grid: &mut Grid, chain: &[Pos]) {
        grid[chain[0]].distance = 0;
        for w in chain.windows(2) {
            grid[w[1]].predecessor = Some(w[0]);
            grid[w[1]].distance = grid[w[0]].distance + 1;
        }
    }

    #[test]
    fn follows_links_from_end_to_start() {
        let mut g = Grid::new(2, 3);
        let chain = [p(0, 0), p(0, 1), p(1, 1), p(1, 2)];
        link(&mut g, &chain);
        assert_eq!(reconstruct(&g, p(0, 0), p(1, 2), |n| n.distance), chain);
    }

    #[test]
    fn rejects_chain_not_rooted_at_start() {
        let mut g = Grid::new(2, 3);
        link(&mut g, &[p(0, 1), p(0, 2), p(1, 2)]);
        assert!(reconstruct(&g, p(0, 0), p(1, 2), |n| n.distance).is_empty());
    }

    #[test]
    fn rejects_start_with_nonzero_cost() {
        let mut g = Grid::new(1, 3);
        link(&mut g, &[p(0, 0), p(0, 1), p(0, 2)]);
        g[p(0, 0)].distance = 3;
        assert!(reconstruct(&g, p(0, 0), p(0, 2), |n| n.distance).is_empty());
    }

    #[test]
    fn rejects_cyclic_chain() {
        let mut g = Grid::new(1, 2);
        g[p(0, 0)].predecessor = Some(p(0, 1));
        g[p(0, 1)].predecessor = Some(p(0, 0));
        assert!(reconstruct(&g, p(0, 0), p(0, 1), |n| n.distance).is_empty());
    }
}
