//! Display targets that playback writes tags into.

use std::fmt;

use gridsearch_core::{Channel, Dims, DisplayTag, Grid, Pos};

use crate::timeline::{Phase, Step};

/// A display mutation that was actually applied.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlaybackEvent {
    pub channel: Channel,
    pub pos: Pos,
    pub tag: DisplayTag,
}

/// Something playback can read and write display tags on.
pub trait Surface {
    /// Current tag at `pos` as seen by `channel`, or `None` when either is
    /// out of range.
    fn tag(&self, channel: Channel, pos: Pos) -> Option<DisplayTag>;

    /// Overwrite the tag at `pos` on `channel`. Out-of-range writes are
    /// ignored.
    fn set_tag(&mut self, channel: Channel, pos: Pos, tag: DisplayTag);
}

/// Apply one step to `surface`.
///
/// A visited step only lands on an empty cell. A path step lands on an
/// empty cell or on a cell its own channel visited. Walls, endpoints, path
/// cells and other channels' tags are never overwritten. Returns the event
/// when the tag changed.
pub fn apply<S: Surface + ?Sized>(surface: &mut S, step: &Step) -> Option<PlaybackEvent> {
    let current = surface.tag(step.channel, step.pos)?;
    let writable = match step.phase {
        Phase::Visited => current == DisplayTag::Empty,
        Phase::Path => {
            current == DisplayTag::Empty || current == DisplayTag::Visited(step.channel)
        }
    };
    let tag = step.tag();
    if !writable || current == tag {
        return None;
    }
    surface.set_tag(step.channel, step.pos, tag);
    Some(PlaybackEvent {
        channel: step.channel,
        pos: step.pos,
        tag,
    })
}

/// The grid has a single shared display layer; the channel only shows up in
/// the tag written.
impl Surface for Grid {
    fn tag(&self, _channel: Channel, pos: Pos) -> Option<DisplayTag> {
        self.node(pos).map(|n| n.display)
    }

    fn set_tag(&mut self, _channel: Channel, pos: Pos, tag: DisplayTag) {
        if let Some(n) = self.node_mut(pos) {
            n.display = tag;
        }
    }
}

// ---------------------------------------------------------------------------
// ComparisonBoard
// ---------------------------------------------------------------------------

/// One display layer per channel over a shared set of roles, so several
/// runs can be shown side by side without fighting over cells.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ComparisonBoard {
    dims: Dims,
    layers: Vec<Vec<DisplayTag>>,
}

impl ComparisonBoard {
    /// Seed `channels` layers with the role tags of `grid`.
    pub fn new(grid: &Grid, channels: usize) -> Self {
        let base: Vec<DisplayTag> = grid.nodes().map(|n| n.role_tag()).collect();
        Self {
            dims: grid.dims(),
            layers: vec![base; channels],
        }
    }

    pub fn dims(&self) -> Dims {
        self.dims
    }

    pub fn channels(&self) -> usize {
        self.layers.len()
    }

    /// Row-major tags of one layer.
    pub fn layer(&self, channel: Channel) -> Option<&[DisplayTag]> {
        self.layers.get(channel.0 as usize).map(Vec::as_slice)
    }

    /// Restore every layer to its role tags.
    pub fn clear(&mut self) {
        for layer in &mut self.layers {
            for tag in layer.iter_mut() {
                if !tag.is_role() {
                    *tag = DisplayTag::Empty;
                }
            }
        }
    }

    /// ASCII rendering of one layer, in the same glyphs as [`Grid`]'s
    /// `Display` impl.
    pub fn render(&self, channel: Channel) -> Option<String> {
        let layer = self.layer(channel)?;
        let mut out = String::with_capacity(layer.len() + self.dims.rows);
        for (i, row) in layer.chunks(self.dims.cols.max(1)).enumerate() {
            if i > 0 {
                out.push('\n');
            }
            out.extend(row.iter().map(|t| t.glyph()));
        }
        Some(out)
    }
}

impl Surface for ComparisonBoard {
    fn tag(&self, channel: Channel, pos: Pos) -> Option<DisplayTag> {
        let i = self.dims.index(pos)?;
        self.layer(channel).map(|l| l[i])
    }

    fn set_tag(&mut self, channel: Channel, pos: Pos, tag: DisplayTag) {
        let Some(i) = self.dims.index(pos) else {
            return;
        };
        if let Some(layer) = self.layers.get_mut(channel.0 as usize) {
            layer[i] = tag;
        }
    }
}

impl fmt::Display for ComparisonBoard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for c in 0..self.layers.len() {
            if c > 0 {
                f.write_str("\n\n")?;
            }
            if let Some(s) = self.render(Channel(c as u8)) {
                f.write_str(&s)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn step(channel: u8, row: usize, col: usize, phase: Phase) -> Step {
        Step {
            channel: Channel(channel),
            pos: Pos::new(row, col),
            phase,
        }
    }

    #[test]
    fn visited_only_lands_on_empty_cells() {
        let mut g = Grid::from_ascii("S.#\n..E").unwrap();
        assert!(apply(&mut g, &step(0, 0, 0, Phase::Visited)).is_none());
        assert!(apply(&mut g, &step(0, 0, 2, Phase::Visited)).is_none());
        let ev = apply(&mut g, &step(0, 0, 1, Phase::Visited)).unwrap();
        assert_eq!(ev.tag, DisplayTag::Visited(Channel(0)));
        assert_eq!(g[Pos::new(0, 1)].display, DisplayTag::Visited(Channel(0)));
        // A second track's visit does not steal the cell.
        assert!(apply(&mut g, &step(1, 0, 1, Phase::Visited)).is_none());
    }

    #[test]
    fn path_overwrites_own_visited_but_not_roles() {
        let mut g = Grid::from_ascii("S..\n..E").unwrap();
        apply(&mut g, &step(0, 0, 1, Phase::Visited));
        let ev = apply(&mut g, &step(0, 0, 1, Phase::Path)).unwrap();
        assert_eq!(ev.tag, DisplayTag::Path(Channel(0)));
        assert!(apply(&mut g, &step(0, 0, 1, Phase::Path)).is_none());
        assert!(apply(&mut g, &step(0, 1, 2, Phase::Path)).is_none());
        assert_eq!(g[Pos::new(1, 2)].display, DisplayTag::End);
    }

    #[test]
    fn steps_never_touch_another_channels_tags() {
        let mut g = Grid::from_ascii("S..\n..E").unwrap();
        apply(&mut g, &step(0, 0, 1, Phase::Visited));
        assert!(apply(&mut g, &step(1, 0, 1, Phase::Path)).is_none());
        assert_eq!(g[Pos::new(0, 1)].display, DisplayTag::Visited(Channel(0)));

        apply(&mut g, &step(0, 0, 2, Phase::Path)).unwrap();
        assert!(apply(&mut g, &step(1, 0, 2, Phase::Path)).is_none());
        assert!(apply(&mut g, &step(1, 0, 2, Phase::Visited)).is_none());
        assert_eq!(g[Pos::new(0, 2)].display, DisplayTag::Path(Channel(0)));
    }

    #[test]
    fn out_of_bounds_steps_are_dropped() {
        let mut g = Grid::new(2, 2);
        assert!(apply(&mut g, &step(0, 5, 5, Phase::Visited)).is_none());
    }

    #[test]
    fn board_layers_are_independent() {
        let g = Grid::from_ascii("S.\n.E").unwrap();
        let mut board = ComparisonBoard::new(&g, 2);
        apply(&mut board, &step(0, 0, 1, Phase::Visited)).unwrap();
        apply(&mut board, &step(1, 0, 1, Phase::Path)).unwrap();
        assert_eq!(board.render(Channel(0)).unwrap(), "So\n.E");
        assert_eq!(board.render(Channel(1)).unwrap(), "S*\n.E");
        assert!(apply(&mut board, &step(2, 0, 1, Phase::Visited)).is_none());

        board.clear();
        assert_eq!(board.render(Channel(1)).unwrap(), "S.\n.E");
    }
}
