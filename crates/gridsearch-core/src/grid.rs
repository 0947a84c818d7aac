//! The [`Grid`] type: a dense `rows × cols` matrix of [`Node`]s.
//!
//! The grid owns every node and is the arena search algorithms index into:
//! predecessors are stored as [`Pos`] values, never as references. Role edits
//! (walls, start, end) go through methods that keep the invariants:
//!
//! - at most one start and one end;
//! - start and end never share a cell;
//! - an endpoint cell is never a wall.
//!
//! Every edit also refreshes the edited node's display tag from its roles.

use std::fmt;
use std::ops::{Index, IndexMut};

use crate::error::GridError;
use crate::geom::{Dims, Direction, Pos};
use crate::node::{DisplayTag, Endpoint, Node};

// ---------------------------------------------------------------------------
// Grid
// ---------------------------------------------------------------------------

/// A rectangular search grid with fixed dimensions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    dims: Dims,
    nodes: Vec<Node>,
    start: Option<Pos>,
    end: Option<Pos>,
}

impl Grid {
    /// Create an open grid (no walls, no endpoints).
    pub fn new(rows: usize, cols: usize) -> Self {
        let dims = Dims::new(rows, cols);
        Self {
            dims,
            nodes: dims.iter().map(Node::new).collect(),
            start: None,
            end: None,
        }
    }

    /// Parse a grid from ASCII art.
    ///
    /// `#` is a wall, `.` an empty cell, `S` the start and `E` the end.
    /// Surrounding whitespace on each line is ignored, blank lines are
    /// skipped, and all remaining lines must have the same width.
    pub fn from_ascii(s: &str) -> Result<Self, GridError> {
        let lines: Vec<&str> = s
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect();
        let Some(first) = lines.first() else {
            return Err(GridError::EmptyLayout);
        };
        let cols = first.chars().count();
        let mut grid = Grid::new(lines.len(), cols);

        for (row, line) in lines.iter().enumerate() {
            let found = line.chars().count();
            if found != cols {
                return Err(GridError::InconsistentWidth {
                    row,
                    expected: cols,
                    found,
                });
            }
            for (col, ch) in line.chars().enumerate() {
                let pos = Pos::new(row, col);
                match ch {
                    '.' => {}
                    '#' => grid.set_wall(pos, true)?,
                    'S' => {
                        if grid.start.is_some() {
                            return Err(GridError::DuplicateEndpoint("start"));
                        }
                        grid.set_start(pos)?;
                    }
                    'E' => {
                        if grid.end.is_some() {
                            return Err(GridError::DuplicateEndpoint("end"));
                        }
                        grid.set_end(pos)?;
                    }
                    _ => return Err(GridError::InvalidChar { ch, pos }),
                }
            }
        }
        Ok(grid)
    }

    // -----------------------------------------------------------------------
    // Shape and access
    // -----------------------------------------------------------------------

    #[inline]
    pub fn dims(&self) -> Dims {
        self.dims
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.dims.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.dims.cols
    }

    #[inline]
    pub fn contains(&self, p: Pos) -> bool {
        self.dims.contains(p)
    }

    /// The node at `p`, or `None` if out of bounds.
    #[inline]
    pub fn node(&self, p: Pos) -> Option<&Node> {
        self.dims.index(p).map(|i| &self.nodes[i])
    }

    /// Mutable access to the node at `p`. Roles stay read-only through
    /// this; use the grid's edit methods to change them.
    #[inline]
    pub fn node_mut(&mut self, p: Pos) -> Option<&mut Node> {
        self.dims.index(p).map(move |i| &mut self.nodes[i])
    }

    /// Row-major iterator over all nodes.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter()
    }

    /// Row-major mutable iterator over all nodes.
    pub fn nodes_mut(&mut self) -> impl Iterator<Item = &mut Node> {
        self.nodes.iter_mut()
    }

    /// Whether `p` is in bounds and not a wall.
    #[inline]
    pub fn is_passable(&self, p: Pos) -> bool {
        self.node(p).is_some_and(Node::is_passable)
    }

    #[inline]
    pub fn start(&self) -> Option<Pos> {
        self.start
    }

    #[inline]
    pub fn end(&self) -> Option<Pos> {
        self.end
    }

    fn check(&self, p: Pos) -> Result<usize, GridError> {
        self.dims.index(p).ok_or(GridError::OutOfBounds {
            pos: p,
            dims: self.dims,
        })
    }

    // -----------------------------------------------------------------------
    // Role edits
    // -----------------------------------------------------------------------

    /// Make `p` a wall (`true`) or open it (`false`).
    pub fn set_wall(&mut self, p: Pos, wall: bool) -> Result<(), GridError> {
        let i = self.check(p)?;
        let node = &mut self.nodes[i];
        if wall && node.endpoint != Endpoint::None {
            return Err(GridError::Endpoint(p));
        }
        node.wall = wall;
        node.display = node.role_tag();
        Ok(())
    }

    /// Flip the wall state of `p`, returning the new state.
    pub fn toggle_wall(&mut self, p: Pos) -> Result<bool, GridError> {
        let i = self.check(p)?;
        let wall = !self.nodes[i].wall;
        self.set_wall(p, wall)?;
        Ok(wall)
    }

    /// Move the start marker to `p`.
    pub fn set_start(&mut self, p: Pos) -> Result<(), GridError> {
        self.place_endpoint(p, Endpoint::Start)
    }

    /// Move the end marker to `p`.
    pub fn set_end(&mut self, p: Pos) -> Result<(), GridError> {
        self.place_endpoint(p, Endpoint::End)
    }

    pub fn clear_start(&mut self) {
        if let Some(old) = self.start.take() {
            self.drop_endpoint(old);
        }
    }

    pub fn clear_end(&mut self) {
        if let Some(old) = self.end.take() {
            self.drop_endpoint(old);
        }
    }

    fn place_endpoint(&mut self, p: Pos, which: Endpoint) -> Result<(), GridError> {
        let i = self.check(p)?;
        let node = &self.nodes[i];
        if node.wall {
            return Err(GridError::Wall(p));
        }
        match (which, node.endpoint) {
            (Endpoint::Start, Endpoint::End) | (Endpoint::End, Endpoint::Start) => {
                return Err(GridError::SameEndpoints(p));
            }
            _ => {}
        }

        let slot = match which {
            Endpoint::Start => &mut self.start,
            Endpoint::End => &mut self.end,
            Endpoint::None => return Ok(()),
        };
        if let Some(old) = slot.replace(p) {
            self.drop_endpoint(old);
        }

        let node = &mut self.nodes[i];
        node.endpoint = which;
        node.display = node.role_tag();
        Ok(())
    }

    fn drop_endpoint(&mut self, p: Pos) {
        if let Some(node) = self.node_mut(p) {
            node.endpoint = Endpoint::None;
            node.display = node.role_tag();
        }
    }

    /// Open every wall.
    pub fn clear_walls(&mut self) {
        for node in &mut self.nodes {
            node.wall = false;
            node.display = node.role_tag();
        }
    }

    /// Drop visited/path tags, restoring the tags implied by roles.
    pub fn clear_display(&mut self) {
        for node in &mut self.nodes {
            node.display = node.role_tag();
        }
    }

    /// Open every wall, remove both endpoints and clear scratch state.
    pub fn clear_board(&mut self) {
        self.start = None;
        self.end = None;
        for node in &mut self.nodes {
            node.wall = false;
            node.endpoint = Endpoint::None;
            node.display = DisplayTag::Empty;
            node.clear_scratch();
        }
    }

    // -----------------------------------------------------------------------
    // Search primitives
    // -----------------------------------------------------------------------

    /// Clear distance, scores, visited flags and predecessors on every node.
    /// Roles and display tags are left untouched.
    pub fn reset(&mut self) {
        for node in &mut self.nodes {
            node.clear_scratch();
        }
    }

    /// In-bounds cardinal neighbors of `p` in the order up, down, left,
    /// right. With `unvisited_only`, nodes already marked visited are
    /// skipped. Walls are included; callers filter on passability.
    ///
    /// The returned iterator does not borrow the grid, so callers may mutate
    /// nodes while walking it.
    pub fn neighbors(&self, p: Pos, unvisited_only: bool) -> Neighbors {
        let mut out = Neighbors::default();
        for dir in Direction::ORDER {
            let Some(n) = self.dims.step(p, dir) else {
                continue;
            };
            if unvisited_only && self[n].visited {
                continue;
            }
            out.push(n);
        }
        out
    }
}

impl Index<Pos> for Grid {
    type Output = Node;

    /// Panics if `p` is out of bounds.
    #[inline]
    fn index(&self, p: Pos) -> &Node {
        match self.dims.index(p) {
            Some(i) => &self.nodes[i],
            None => panic!("position {p} outside {} grid", self.dims),
        }
    }
}

impl IndexMut<Pos> for Grid {
    #[inline]
    fn index_mut(&mut self, p: Pos) -> &mut Node {
        match self.dims.index(p) {
            Some(i) => &mut self.nodes[i],
            None => panic!("position {p} outside {} grid", self.dims),
        }
    }
}

impl fmt::Display for Grid {
    /// One line per row, one glyph per cell, drawn from display tags.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.dims.rows {
            if row > 0 {
                writeln!(f)?;
            }
            for col in 0..self.dims.cols {
                write!(f, "{}", self[Pos::new(row, col)].display.glyph())?;
            }
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Neighbors
// ---------------------------------------------------------------------------

/// Up to four neighbor positions, yielded in enumeration order.
#[derive(Clone, Debug, Default)]
pub struct Neighbors {
    buf: [Pos; 4],
    len: usize,
    next: usize,
}

impl Neighbors {
    fn push(&mut self, p: Pos) {
        self.buf[self.len] = p;
        self.len += 1;
    }

    /// The remaining neighbors as a slice.
    pub fn as_slice(&self) -> &[Pos] {
        &self.buf[self.next..self.len]
    }
}

impl Iterator for Neighbors {
    type Item = Pos;

    #[inline]
    fn next(&mut self) -> Option<Pos> {
        if self.next == self.len {
            return None;
        }
        let p = self.buf[self.next];
        self.next += 1;
        Some(p)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.len - self.next;
        (n, Some(n))
    }
}

impl ExactSizeIterator for Neighbors {}
