//! Geometry primitives: [`Pos`], [`Dims`] and [`Direction`].
//!
//! Positions are `(row, col)` pairs with row 0 at the top. Every position a
//! [`Grid`](crate::Grid) hands out is in bounds, so coordinates are unsigned
//! and stepping off an edge yields `None` instead of a negative index.

use std::fmt;

// ---------------------------------------------------------------------------
// Pos
// ---------------------------------------------------------------------------

/// A grid coordinate. Rows grow downwards, columns grow to the right.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Pos {
    pub row: usize,
    pub col: usize,
}

impl Pos {
    /// Top-left corner.
    pub const ORIGIN: Self = Self { row: 0, col: 0 };

    /// Create a new position.
    #[inline]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// The position one step in `dir`, or `None` when that would leave the
    /// first row or column. Upper bounds are checked by [`Dims::step`].
    #[inline]
    pub fn step(self, dir: Direction) -> Option<Pos> {
        match dir {
            Direction::Up => self.row.checked_sub(1).map(|row| Pos::new(row, self.col)),
            Direction::Down => Some(Pos::new(self.row + 1, self.col)),
            Direction::Left => self.col.checked_sub(1).map(|col| Pos::new(self.row, col)),
            Direction::Right => Some(Pos::new(self.row, self.col + 1)),
        }
    }

    /// Manhattan (L1) distance to `other`.
    #[inline]
    pub fn manhattan(self, other: Pos) -> u32 {
        (self.row.abs_diff(other.row) + self.col.abs_diff(other.col)) as u32
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

impl From<(usize, usize)> for Pos {
    #[inline]
    fn from((row, col): (usize, usize)) -> Self {
        Self::new(row, col)
    }
}

// ---------------------------------------------------------------------------
// Direction
// ---------------------------------------------------------------------------

/// One of the four cardinal moves.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Neighbor enumeration order. Search tie-breaks depend on it, so it must
    /// not change.
    pub const ORDER: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];
}

// ---------------------------------------------------------------------------
// Dims
// ---------------------------------------------------------------------------

/// Size of a grid: `rows × cols`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Dims {
    pub rows: usize,
    pub cols: usize,
}

impl Dims {
    /// Create new dimensions.
    #[inline]
    pub const fn new(rows: usize, cols: usize) -> Self {
        Self { rows, cols }
    }

    /// Total number of cells.
    #[inline]
    pub fn len(self) -> usize {
        self.rows * self.cols
    }

    /// Whether the area is zero.
    #[inline]
    pub fn is_empty(self) -> bool {
        self.rows == 0 || self.cols == 0
    }

    /// Whether `p` lies inside.
    #[inline]
    pub fn contains(self, p: Pos) -> bool {
        p.row < self.rows && p.col < self.cols
    }

    /// Step from `p` in `dir`, staying in bounds.
    #[inline]
    pub fn step(self, p: Pos, dir: Direction) -> Option<Pos> {
        p.step(dir).filter(|&n| self.contains(n))
    }

    /// Row-major flat index of `p`, or `None` if out of bounds.
    #[inline]
    pub fn index(self, p: Pos) -> Option<usize> {
        if !self.contains(p) {
            return None;
        }
        Some(p.row * self.cols + p.col)
    }

    /// Convert a flat index back to a position.
    #[inline]
    pub fn pos(self, idx: usize) -> Pos {
        Pos::new(idx / self.cols, idx % self.cols)
    }

    /// Row-major iterator over every position.
    #[inline]
    pub fn iter(self) -> impl Iterator<Item = Pos> {
        (0..self.rows).flat_map(move |row| (0..self.cols).map(move |col| Pos::new(row, col)))
    }
}

impl fmt::Display for Dims {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.rows, self.cols)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_stops_at_top_and_left_edges() {
        let p = Pos::ORIGIN;
        assert_eq!(p.step(Direction::Up), None);
        assert_eq!(p.step(Direction::Left), None);
        assert_eq!(p.step(Direction::Down), Some(Pos::new(1, 0)));
        assert_eq!(p.step(Direction::Right), Some(Pos::new(0, 1)));
    }

    #[test]
    fn dims_step_checks_bottom_and_right_edges() {
        let d = Dims::new(2, 3);
        assert_eq!(d.step(Pos::new(1, 2), Direction::Down), None);
        assert_eq!(d.step(Pos::new(1, 2), Direction::Right), None);
        assert_eq!(d.step(Pos::new(1, 2), Direction::Up), Some(Pos::new(0, 2)));
    }

    #[test]
    fn index_round_trips_through_pos() {
        let d = Dims::new(4, 7);
        for p in d.iter() {
            let i = d.index(p).unwrap();
            assert_eq!(d.pos(i), p);
        }
        assert_eq!(d.index(Pos::new(4, 0)), None);
        assert_eq!(d.iter().count(), d.len());
    }

    #[test]
    fn manhattan_is_symmetric() {
        let a = Pos::new(1, 5);
        let b = Pos::new(4, 2);
        assert_eq!(a.manhattan(b), 6);
        assert_eq!(b.manhattan(a), 6);
        assert_eq!(a.manhattan(a), 0);
    }

    #[test]
    fn neighbor_order_is_up_down_left_right() {
        assert_eq!(
            Direction::ORDER,
            [
                Direction::Up,
                Direction::Down,
                Direction::Left,
                Direction::Right
            ]
        );
    }
}
