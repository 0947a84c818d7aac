//! **gridsearch-core**: the grid model shared by the search engine and the
//! playback scheduler.
//!
//! A [`Grid`] is a dense matrix of [`Node`]s addressed by [`Pos`]. Nodes
//! carry their roles (wall, start, end), the scratch fields search
//! algorithms write during a run, and the [`DisplayTag`] a renderer paints.

pub mod error;
pub mod geom;
pub mod grid;
pub mod mapgen;
pub mod node;

pub use error::GridError;
pub use geom::{Dims, Direction, Pos};
pub use grid::{Grid, Neighbors};
pub use mapgen::MapGen;
pub use node::{Channel, DisplayTag, Endpoint, Node, UNREACHABLE};

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn display_tag_round_trip() {
        let tag = DisplayTag::Path(Channel(2));
        let json = serde_json::to_string(&tag).unwrap();
        let back: DisplayTag = serde_json::from_str(&json).unwrap();
        assert_eq!(tag, back);
    }
}
