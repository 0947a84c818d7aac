//! Synchronous round-by-round playback.

use std::time::Duration;

use gridsearch_core::{Channel, DisplayTag, Pos};

use crate::surface::{PlaybackEvent, Surface, apply};
use crate::timeline::Timeline;

/// Steps through a [`Timeline`], applying one round at a time and keeping
/// enough undo information to step back.
///
/// The player knows nothing about time; [`next_delay`](Self::next_delay)
/// tells the driver how long to wait before the next
/// [`advance`](Self::advance).
#[derive(Clone, Debug)]
pub struct Player {
    timeline: Timeline,
    next: usize,
    undo: Vec<Vec<(Channel, Pos, DisplayTag)>>,
}

impl Player {
    pub fn new(timeline: Timeline) -> Self {
        Self {
            timeline,
            next: 0,
            undo: Vec::new(),
        }
    }

    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    /// Index of the next round to apply.
    pub fn position(&self) -> usize {
        self.next
    }

    pub fn is_done(&self) -> bool {
        self.next >= self.timeline.len()
    }

    /// Delay before the next round, or `None` once finished.
    pub fn next_delay(&self) -> Option<Duration> {
        self.timeline.rounds().get(self.next).map(|r| r.delay)
    }

    /// Apply the next round. Returns the events that changed a tag, or
    /// `None` if the timeline is exhausted.
    pub fn advance<S: Surface + ?Sized>(&mut self, surface: &mut S) -> Option<Vec<PlaybackEvent>> {
        let round = self.timeline.rounds().get(self.next)?;
        let mut events = Vec::with_capacity(round.steps.len());
        let mut undo = Vec::new();
        for step in &round.steps {
            let before = surface.tag(step.channel, step.pos);
            if let Some(ev) = apply(surface, step) {
                if let Some(before) = before {
                    undo.push((ev.channel, ev.pos, before));
                }
                events.push(ev);
            }
        }
        self.undo.push(undo);
        self.next += 1;
        Some(events)
    }

    /// Revert the last applied round. Returns `false` at the beginning.
    pub fn rewind<S: Surface + ?Sized>(&mut self, surface: &mut S) -> bool {
        let Some(undo) = self.undo.pop() else {
            return false;
        };
        for &(channel, pos, tag) in undo.iter().rev() {
            surface.set_tag(channel, pos, tag);
        }
        self.next -= 1;
        true
    }

    /// Apply every remaining round without waiting.
    pub fn finish<S: Surface + ?Sized>(&mut self, surface: &mut S) -> Vec<PlaybackEvent> {
        let mut all = Vec::new();
        while let Some(events) = self.advance(surface) {
            all.extend(events);
        }
        all
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::speed::SpeedPreset;
    use gridsearch_core::Grid;
    use gridsearch_paths::{AlgorithmKind, SearchEngine};

    fn played_grid() -> (Grid, Player) {
        let mut g = Grid::from_ascii("S..\n...\n..E").unwrap();
        let run = SearchEngine::new()
            .run_endpoints(AlgorithmKind::Bfs, &mut g)
            .unwrap();
        let player = Player::new(Timeline::single(&run.result, SpeedPreset::Instant));
        (g, player)
    }

    #[test]
    fn finish_draws_visited_then_path() {
        let (mut g, mut player) = played_grid();
        let events = player.finish(&mut g);
        assert!(player.is_done());
        assert_eq!(player.next_delay(), None);
        // Seven interior visits (endpoints keep their tags), then three path
        // cells between the endpoints.
        let visits = events
            .iter()
            .filter(|e| matches!(e.tag, DisplayTag::Visited(_)))
            .count();
        let paths = events
            .iter()
            .filter(|e| matches!(e.tag, DisplayTag::Path(_)))
            .count();
        assert_eq!(visits, 7);
        assert_eq!(paths, 3);
        assert_eq!(g.to_string(), "Soo\n*oo\n**E");
    }

    #[test]
    fn rewind_restores_previous_tags() {
        let (mut g, mut player) = played_grid();
        let clean = g.clone();
        player.finish(&mut g);
        while player.rewind(&mut g) {}
        assert_eq!(player.position(), 0);
        assert_eq!(g, clean);
        assert!(!player.rewind(&mut g));
    }

    #[test]
    fn advance_reports_only_applied_events() {
        let (mut g, mut player) = played_grid();
        // Round 0 visits the start cell, which keeps its role tag.
        let first = player.advance(&mut g).unwrap();
        assert!(first.is_empty());
        let second = player.advance(&mut g).unwrap();
        assert_eq!(second.len(), 1);
        assert_eq!(second[0].pos, Pos::new(1, 0));
    }
}
