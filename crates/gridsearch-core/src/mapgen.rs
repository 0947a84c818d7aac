//! Obstacle generators for quickly populating a grid.
//!
//! - **Scatter**: each free cell independently becomes a wall.
//! - **Maze**: a perfect maze carved by a randomized depth-first
//!   backtracker. Passages sit on even `(row, col)` cells; the cells between
//!   them are walls unless carved.
//!
//! Start and end cells are never walled, and both generators are fully
//! determined by the caller's RNG.

use rand::Rng;
use rand::seq::SliceRandom;

use crate::geom::{Direction, Pos};
use crate::grid::Grid;
use crate::node::Endpoint;

/// Random obstacle generator.
pub struct MapGen<R: Rng> {
    pub rng: R,
}

impl<R: Rng> MapGen<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Turn every non-endpoint cell into a wall with probability `density`
    /// (clamped to `0.0..=1.0`, NaN counts as `0.0`), opening it otherwise.
    ///
    /// Returns the number of walls placed.
    pub fn scatter_walls(&mut self, grid: &mut Grid, density: f64) -> usize {
        let density = if density.is_nan() {
            0.0
        } else {
            density.clamp(0.0, 1.0)
        };
        let mut walls = 0;
        for p in grid.dims().iter() {
            if grid[p].endpoint() != Endpoint::None {
                continue;
            }
            let wall = self.rng.random_bool(density);
            // Endpoint cells were skipped above, so this cannot fail.
            if grid.set_wall(p, wall).is_ok() && wall {
                walls += 1;
            }
        }
        walls
    }

    /// Replace the grid's walls with a perfect maze.
    ///
    /// Endpoints off the passage lattice get an opening towards it, so both
    /// stay reachable from each other.
    pub fn maze(&mut self, grid: &mut Grid) {
        let dims = grid.dims();
        if dims.is_empty() {
            return;
        }
        for p in dims.iter() {
            let _ = grid.set_wall(p, true);
        }

        let mut carved = vec![false; dims.len()];
        let mut stack = vec![Pos::ORIGIN];
        carved[0] = true;
        let _ = grid.set_wall(Pos::ORIGIN, false);

        let mut dirs = Direction::ORDER;
        while let Some(&cur) = stack.last() {
            dirs.shuffle(&mut self.rng);
            let next = dirs.iter().find_map(|&d| {
                let between = dims.step(cur, d)?;
                let target = dims.step(between, d)?;
                let ti = dims.index(target)?;
                (!carved[ti]).then_some((between, target, ti))
            });
            match next {
                Some((between, target, ti)) => {
                    carved[ti] = true;
                    let _ = grid.set_wall(between, false);
                    let _ = grid.set_wall(target, false);
                    stack.push(target);
                }
                None => {
                    stack.pop();
                }
            }
        }

        for endpoint in [grid.start(), grid.end()].into_iter().flatten() {
            connect_to_lattice(grid, endpoint);
        }
    }
}

/// An endpoint on an odd row and odd column is surrounded by lattice walls;
/// open the cell above it, which touches the passage at `(row-1, col-1)`.
fn connect_to_lattice(grid: &mut Grid, p: Pos) {
    if p.row % 2 == 1 && p.col % 2 == 1 {
        let above = Pos::new(p.row - 1, p.col);
        if grid[above].endpoint() == Endpoint::None {
            let _ = grid.set_wall(above, false);
        }
    }
}
