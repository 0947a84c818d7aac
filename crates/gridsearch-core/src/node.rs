//! The [`Node`] type: one cell of a search grid.

use crate::geom::Pos;

/// Sentinel for "not reached yet" in distance and score fields.
pub const UNREACHABLE: u32 = u32::MAX;

/// Endpoint role of a node. A node that holds an endpoint is never a wall.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Endpoint {
    #[default]
    None,
    Start,
    End,
}

/// Display channel of a playback track. Channel 0 is the single-run channel;
/// comparison playback gives every track its own channel so renderers can
/// color them apart.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Channel(pub u8);

impl Channel {
    pub const PRIMARY: Channel = Channel(0);
}

/// What the collaborator should draw for a node.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DisplayTag {
    #[default]
    Empty,
    Wall,
    Start,
    End,
    Visited(Channel),
    Path(Channel),
}

impl DisplayTag {
    /// Whether this tag marks a role (wall or endpoint) that playback must
    /// never overwrite.
    #[inline]
    pub fn is_role(self) -> bool {
        matches!(self, DisplayTag::Wall | DisplayTag::Start | DisplayTag::End)
    }

    /// ASCII glyph used by [`Grid`](crate::Grid)'s `Display` impl.
    pub fn glyph(self) -> char {
        match self {
            DisplayTag::Empty => '.',
            DisplayTag::Wall => '#',
            DisplayTag::Start => 'S',
            DisplayTag::End => 'E',
            DisplayTag::Visited(_) => 'o',
            DisplayTag::Path(_) => '*',
        }
    }
}

/// A grid cell: roles, per-run search scratch, and a display tag.
///
/// Scratch fields are only meaningful between a [`Grid::reset`] and the end
/// of the run that follows it.
///
/// [`Grid::reset`]: crate::Grid::reset
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Node {
    pos: Pos,
    pub(crate) wall: bool,
    pub(crate) endpoint: Endpoint,
    /// Hop count from the start (BFS, DFS, Dijkstra).
    pub distance: u32,
    /// A* cost from the start.
    pub g: u32,
    /// A* heuristic to the goal.
    pub h: u32,
    /// A* `g + h`.
    pub f: u32,
    pub visited: bool,
    /// Back-link to the node this one was reached from.
    pub predecessor: Option<Pos>,
    pub display: DisplayTag,
}

impl Node {
    pub(crate) fn new(pos: Pos) -> Self {
        Self {
            pos,
            wall: false,
            endpoint: Endpoint::None,
            distance: UNREACHABLE,
            g: UNREACHABLE,
            h: 0,
            f: UNREACHABLE,
            visited: false,
            predecessor: None,
            display: DisplayTag::Empty,
        }
    }

    /// Position of the node in its grid.
    #[inline]
    pub fn pos(&self) -> Pos {
        self.pos
    }

    #[inline]
    pub fn is_wall(&self) -> bool {
        self.wall
    }

    /// Whether search may enter this node.
    #[inline]
    pub fn is_passable(&self) -> bool {
        !self.wall
    }

    #[inline]
    pub fn endpoint(&self) -> Endpoint {
        self.endpoint
    }

    /// The display tag implied by the node's roles alone.
    pub fn role_tag(&self) -> DisplayTag {
        match (self.wall, self.endpoint) {
            (_, Endpoint::Start) => DisplayTag::Start,
            (_, Endpoint::End) => DisplayTag::End,
            (true, Endpoint::None) => DisplayTag::Wall,
            (false, Endpoint::None) => DisplayTag::Empty,
        }
    }

    /// Clear search scratch, keeping roles and the display tag.
    pub(crate) fn clear_scratch(&mut self) {
        self.distance = UNREACHABLE;
        self.g = UNREACHABLE;
        self.h = 0;
        self.f = UNREACHABLE;
        self.visited = false;
        self.predecessor = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_node_is_empty_and_unreached() {
        let n = Node::new(Pos::new(2, 3));
        assert_eq!(n.pos(), Pos::new(2, 3));
        assert!(n.is_passable());
        assert_eq!(n.distance, UNREACHABLE);
        assert_eq!(n.role_tag(), DisplayTag::Empty);
    }

    #[test]
    fn endpoint_wins_role_tag() {
        let mut n = Node::new(Pos::ORIGIN);
        n.endpoint = Endpoint::End;
        assert_eq!(n.role_tag(), DisplayTag::End);
        n.endpoint = Endpoint::None;
        n.wall = true;
        assert_eq!(n.role_tag(), DisplayTag::Wall);
    }

    #[test]
    fn clear_scratch_keeps_roles_and_display() {
        let mut n = Node::new(Pos::ORIGIN);
        n.wall = true;
        n.display = DisplayTag::Wall;
        n.visited = true;
        n.distance = 4;
        n.predecessor = Some(Pos::new(0, 1));
        n.clear_scratch();
        assert!(n.is_wall());
        assert_eq!(n.display, DisplayTag::Wall);
        assert!(!n.visited);
        assert_eq!(n.distance, UNREACHABLE);
        assert_eq!(n.predecessor, None);
    }

    #[test]
    fn role_tags_are_protected() {
        assert!(DisplayTag::Wall.is_role());
        assert!(DisplayTag::Start.is_role());
        assert!(!DisplayTag::Visited(Channel::PRIMARY).is_role());
        assert!(!DisplayTag::Empty.is_role());
    }
}
