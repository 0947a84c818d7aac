//! A grid, the engine, and at most one live playback.

use std::sync::Arc;

use gridsearch_core::{Channel, Grid};
use gridsearch_paths::{AlgorithmKind, AlgorithmResult, Metrics, SearchEngine};
use log::debug;
use parking_lot::Mutex;

use crate::MAX_TRACKS;
use crate::config::SessionConfig;
use crate::error::PlaybackError;
use crate::scheduler::{PlaybackOutcome, Scheduler};
use crate::speed::SpeedPreset;
use crate::surface::{ComparisonBoard, PlaybackEvent};
use crate::timeline::{Timeline, Track};

/// Owns the shared grid, the latest comparison board and the playback
/// scheduler.
///
/// Every operation that changes the grid cancels the running playback
/// first, so a stale playback never draws over a newer state.
#[derive(Debug)]
pub struct Session {
    config: SessionConfig,
    grid: Arc<Mutex<Grid>>,
    board: Option<Arc<Mutex<ComparisonBoard>>>,
    engine: SearchEngine,
    scheduler: Scheduler,
}

impl Session {
    /// Empty grid sized from `config`.
    pub fn new(config: SessionConfig) -> Self {
        Self::with_grid(Grid::new(config.rows, config.cols), config)
    }

    pub fn with_grid(grid: Grid, config: SessionConfig) -> Self {
        Self {
            config,
            grid: Arc::new(Mutex::new(grid)),
            board: None,
            engine: SearchEngine::new(),
            scheduler: Scheduler::new(),
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn set_speed(&mut self, speed: SpeedPreset) {
        self.config.speed = speed;
    }

    pub fn set_algorithm(&mut self, kind: AlgorithmKind) {
        self.config.algorithm = kind;
    }

    /// Shared handle for renderers. Lock it only briefly; playback takes the
    /// same lock for every round.
    pub fn grid(&self) -> Arc<Mutex<Grid>> {
        Arc::clone(&self.grid)
    }

    /// A copy of the grid as it is right now.
    pub fn snapshot(&self) -> Grid {
        self.grid.lock().clone()
    }

    /// Cancel playback, then edit the grid.
    pub fn edit<R>(&mut self, f: impl FnOnce(&mut Grid) -> R) -> R {
        self.stop();
        f(&mut *self.grid.lock())
    }

    /// Run the configured algorithm at the configured speed.
    pub fn run<F>(&mut self, sink: F) -> Result<Metrics, PlaybackError>
    where
        F: FnMut(PlaybackEvent) + Send + 'static,
    {
        self.run_with(self.config.algorithm, self.config.speed, sink)
    }

    /// Cancel playback, clear old tags, search, and start animating the
    /// result on the grid.
    ///
    /// Invalid endpoints are reported before the grid is touched.
    pub fn run_with<F>(
        &mut self,
        kind: AlgorithmKind,
        speed: SpeedPreset,
        sink: F,
    ) -> Result<Metrics, PlaybackError>
    where
        F: FnMut(PlaybackEvent) + Send + 'static,
    {
        // Cancel before locking: the worker needs the grid lock to finish a
        // round, and cancel waits for that round.
        self.stop();
        let (timeline, metrics) = {
            let mut grid = self.grid.lock();
            SearchEngine::validate(&grid, grid.start(), grid.end())?;
            grid.clear_display();
            let run = self.engine.run_endpoints(kind, &mut grid)?;
            let metrics = Metrics::collect(&run.result, run.elapsed);
            (Timeline::single(&run.result, speed), metrics)
        };
        debug!("session: {metrics}");
        self.scheduler.start(timeline, Arc::clone(&self.grid), sink)?;
        Ok(metrics)
    }

    /// Run every algorithm in `kinds` on the same layout and animate them
    /// interleaved, track `i` on channel `i` of a fresh [`ComparisonBoard`].
    ///
    /// Each track draws only on its own layer; the grid itself is not drawn
    /// on. The board stays available through [`board`](Self::board) until
    /// the next run or edit.
    pub fn compare<F>(
        &mut self,
        kinds: &[AlgorithmKind],
        speed: SpeedPreset,
        sink: F,
    ) -> Result<(Vec<Metrics>, Arc<Mutex<ComparisonBoard>>), PlaybackError>
    where
        F: FnMut(PlaybackEvent) + Send + 'static,
    {
        self.stop();
        let (timeline, metrics, board) = {
            let grid = self.grid.lock();
            let (results, metrics) = self.search_all(&grid, kinds)?;
            let board = ComparisonBoard::new(&grid, results.len());
            (interleave(&results, speed), metrics, board)
        };
        let board = Arc::new(Mutex::new(board));
        self.scheduler.start(timeline, Arc::clone(&board), sink)?;
        self.board = Some(Arc::clone(&board));
        Ok((metrics, board))
    }

    /// Board of the latest comparison, if no run or edit has replaced it.
    pub fn board(&self) -> Option<Arc<Mutex<ComparisonBoard>>> {
        self.board.clone()
    }

    /// Search every kind on its own copy of `grid`.
    fn search_all(
        &self,
        grid: &Grid,
        kinds: &[AlgorithmKind],
    ) -> Result<(Vec<AlgorithmResult>, Vec<Metrics>), PlaybackError> {
        if kinds.len() > MAX_TRACKS {
            return Err(PlaybackError::TooManyTracks(kinds.len()));
        }
        SearchEngine::validate(grid, grid.start(), grid.end())?;
        let mut results = Vec::with_capacity(kinds.len());
        let mut metrics = Vec::with_capacity(kinds.len());
        for &kind in kinds {
            let mut scratch = grid.clone();
            let run = self.engine.run_endpoints(kind, &mut scratch)?;
            metrics.push(Metrics::collect(&run.result, run.elapsed));
            results.push(run.result);
        }
        for m in &metrics {
            debug!("session compare: {m}");
        }
        Ok((results, metrics))
    }

    pub fn cancel(&mut self) {
        self.scheduler.cancel_active();
    }

    /// Cancel playback and forget the comparison board.
    fn stop(&mut self) {
        self.scheduler.cancel_active();
        self.board = None;
    }

    pub fn is_playing(&self) -> bool {
        self.scheduler.is_playing()
    }

    /// Block until the running playback ends.
    pub fn wait(&mut self) -> Option<PlaybackOutcome> {
        self.scheduler.wait()
    }
}

fn interleave(results: &[AlgorithmResult], speed: SpeedPreset) -> Timeline {
    let tracks: Vec<Track<'_>> = results
        .iter()
        .zip(0..=u8::MAX)
        .map(|(r, c)| Track::new(Channel(c), r))
        .collect();
    Timeline::interleaved(&tracks, speed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridsearch_core::{DisplayTag, Pos};
    use gridsearch_paths::EngineError;

    fn session(layout: &str) -> Session {
        Session::with_grid(Grid::from_ascii(layout).unwrap(), SessionConfig::default())
    }

    #[test]
    fn invalid_endpoints_leave_grid_untouched() {
        let mut s = Session::new(SessionConfig {
            rows: 3,
            cols: 3,
            ..SessionConfig::default()
        });
        let before = s.snapshot();
        let err = s.run(|_| {}).unwrap_err();
        assert!(matches!(err, PlaybackError::Engine(EngineError::MissingStart)));
        assert_eq!(s.snapshot(), before);
        assert!(!s.is_playing());
    }

    #[test]
    fn run_clears_previous_tags() {
        let mut s = session("S..\n...\n..E");
        s.run_with(AlgorithmKind::Bfs, SpeedPreset::Instant, |_| {})
            .unwrap();
        s.wait();
        s.edit(|g| g.set_wall(Pos::new(1, 1), true)).unwrap();
        let m = s
            .run_with(AlgorithmKind::Dfs, SpeedPreset::Instant, |_| {})
            .unwrap();
        s.wait();
        let g = s.snapshot();
        let drawn = g
            .nodes()
            .filter(|n| matches!(n.display, DisplayTag::Visited(_) | DisplayTag::Path(_)))
            .count();
        // Everything drawn comes from the second run: its visited cells
        // minus the two endpoints.
        assert_eq!(drawn, m.nodes_visited - 2);
    }

    #[test]
    fn compare_reports_one_metric_per_kind() {
        let mut s = session("S...\n.##.\n...E");
        let (metrics, _) = s
            .compare(&AlgorithmKind::ALL, SpeedPreset::Instant, |_| {})
            .unwrap();
        s.wait();
        assert!(s.board().is_some());
        s.edit(|_| ());
        assert!(s.board().is_none());
        let kinds: Vec<AlgorithmKind> = metrics.iter().map(|m| m.kind).collect();
        assert_eq!(kinds, AlgorithmKind::ALL);
        assert!(metrics.iter().all(|m| m.path_found));
    }

    #[test]
    fn too_many_tracks_is_rejected() {
        let mut s = session("S.E");
        let kinds = vec![AlgorithmKind::Bfs; MAX_TRACKS + 1];
        let err = s.compare(&kinds, SpeedPreset::Instant, |_| {}).unwrap_err();
        assert!(matches!(err, PlaybackError::TooManyTracks(n) if n == MAX_TRACKS + 1));
    }
}
