//! Flattening search results into timed display rounds.
//!
//! A track contributes its visited cells at the preset's visit delay and
//! then its path cells at twice that delay. Several tracks are merged by
//! step index: round `i` holds step `i` of every track that still has one,
//! and waits for the slowest of those steps before firing.

use std::time::Duration;

use gridsearch_core::{Channel, DisplayTag, Pos};
use gridsearch_paths::AlgorithmResult;

use crate::speed::SpeedPreset;

/// Which half of a result a step comes from.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Phase {
    Visited,
    Path,
}

/// A single cell mutation waiting to be applied.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Step {
    pub channel: Channel,
    pub pos: Pos,
    pub phase: Phase,
}

impl Step {
    /// Tag this step writes when applied.
    pub fn tag(&self) -> DisplayTag {
        match self.phase {
            Phase::Visited => DisplayTag::Visited(self.channel),
            Phase::Path => DisplayTag::Path(self.channel),
        }
    }
}

/// Steps that fire together after `delay`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Round {
    pub delay: Duration,
    pub steps: Vec<Step>,
}

/// One result bound to the channel it is drawn on.
#[derive(Copy, Clone, Debug)]
pub struct Track<'a> {
    pub channel: Channel,
    pub result: &'a AlgorithmResult,
}

impl<'a> Track<'a> {
    pub fn new(channel: Channel, result: &'a AlgorithmResult) -> Self {
        Self { channel, result }
    }

    /// Visited plus path steps.
    pub fn len(&self) -> usize {
        self.result.visited.len() + self.result.path.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn step(&self, i: usize, speed: SpeedPreset) -> Option<(Step, Duration)> {
        let visited = &self.result.visited;
        let (pos, phase, delay) = match visited.get(i) {
            Some(&pos) => (pos, Phase::Visited, speed.visit_delay()),
            None => {
                let pos = *self.result.path.get(i - visited.len())?;
                (pos, Phase::Path, speed.path_delay())
            }
        };
        let step = Step {
            channel: self.channel,
            pos,
            phase,
        };
        Some((step, delay))
    }
}

/// An ordered list of rounds, ready to be played.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Timeline {
    rounds: Vec<Round>,
}

impl Timeline {
    /// Timeline for a single result on [`Channel::PRIMARY`].
    pub fn single(result: &AlgorithmResult, speed: SpeedPreset) -> Self {
        Self::interleaved(&[Track::new(Channel::PRIMARY, result)], speed)
    }

    /// Merge several tracks by step index.
    ///
    /// Within a round, steps keep the order of `tracks`.
    pub fn interleaved(tracks: &[Track<'_>], speed: SpeedPreset) -> Self {
        let longest = tracks.iter().map(Track::len).max().unwrap_or(0);
        let mut rounds = Vec::with_capacity(longest);
        for i in 0..longest {
            let mut delay = Duration::ZERO;
            let mut steps = Vec::with_capacity(tracks.len());
            for (step, d) in tracks.iter().filter_map(|t| t.step(i, speed)) {
                delay = delay.max(d);
                steps.push(step);
            }
            rounds.push(Round { delay, steps });
        }
        Self { rounds }
    }

    pub fn rounds(&self) -> &[Round] {
        &self.rounds
    }

    pub fn len(&self) -> usize {
        self.rounds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rounds.is_empty()
    }

    /// Total number of steps over all rounds.
    pub fn step_count(&self) -> usize {
        self.rounds.iter().map(|r| r.steps.len()).sum()
    }

    /// Wall-clock time a full playback takes.
    pub fn duration(&self) -> Duration {
        self.rounds.iter().map(|r| r.delay).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridsearch_paths::AlgorithmKind;

    fn p(row: usize, col: usize) -> Pos {
        Pos::new(row, col)
    }

    fn result(visited: &[(usize, usize)], path: &[(usize, usize)]) -> AlgorithmResult {
        AlgorithmResult::new(
            AlgorithmKind::Bfs,
            visited.iter().map(|&c| c.into()).collect(),
            path.iter().map(|&c| c.into()).collect(),
        )
    }

    #[test]
    fn single_track_visits_then_path_at_double_delay() {
        let r = result(&[(0, 0), (0, 1)], &[(0, 0), (0, 1)]);
        let t = Timeline::single(&r, SpeedPreset::Medium);
        assert_eq!(t.len(), 4);
        let delays: Vec<u64> = t.rounds().iter().map(|r| r.delay.as_millis() as u64).collect();
        assert_eq!(delays, [40, 40, 80, 80]);
        assert_eq!(t.rounds()[0].steps[0].tag(), DisplayTag::Visited(Channel::PRIMARY));
        assert_eq!(t.rounds()[2].steps[0].tag(), DisplayTag::Path(Channel::PRIMARY));
        assert_eq!(t.duration(), Duration::from_millis(240));
    }

    #[test]
    fn no_path_means_no_path_steps() {
        let r = result(&[(0, 0)], &[]);
        let t = Timeline::single(&r, SpeedPreset::Fast);
        assert_eq!(t.step_count(), 1);
        assert_eq!(t.rounds()[0].steps[0].phase, Phase::Visited);
    }

    #[test]
    fn interleaves_by_step_index() {
        let a = result(&[(0, 0), (0, 1), (0, 2)], &[]);
        let b = result(&[(1, 0)], &[(1, 0)]);
        let tracks = [Track::new(Channel(0), &a), Track::new(Channel(1), &b)];
        let t = Timeline::interleaved(&tracks, SpeedPreset::Fast);

        assert_eq!(t.len(), 3);
        let order: Vec<(u8, Pos, Phase)> = t
            .rounds()
            .iter()
            .flat_map(|r| r.steps.iter().map(|s| (s.channel.0, s.pos, s.phase)))
            .collect();
        assert_eq!(
            order,
            [
                (0, p(0, 0), Phase::Visited),
                (1, p(1, 0), Phase::Visited),
                (0, p(0, 1), Phase::Visited),
                (1, p(1, 0), Phase::Path),
                (0, p(0, 2), Phase::Visited),
            ]
        );
        // Round 1 mixes a visit (10ms) with a path step (20ms).
        assert_eq!(t.rounds()[1].delay, Duration::from_millis(20));
        assert_eq!(t.rounds()[2].delay, Duration::from_millis(10));
    }

    #[test]
    fn no_tracks_is_empty() {
        let t = Timeline::interleaved(&[], SpeedPreset::Slow);
        assert!(t.is_empty());
        assert_eq!(t.duration(), Duration::ZERO);
    }
}
