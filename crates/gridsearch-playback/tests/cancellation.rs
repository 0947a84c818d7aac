use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use gridsearch_core::{Grid, Pos};
use gridsearch_paths::AlgorithmKind;
use gridsearch_playback::{PlaybackOutcome, Session, SessionConfig, SpeedPreset};
use parking_lot::Mutex;

fn open_grid() -> Grid {
    let mut g = Grid::new(10, 10);
    g.set_start(Pos::new(0, 0)).unwrap();
    g.set_end(Pos::new(9, 9)).unwrap();
    g
}

#[test]
fn second_run_leaves_no_trace_of_the_first() {
    let mut s = Session::with_grid(open_grid(), SessionConfig::default());
    let first_events = Arc::new(Mutex::new(Vec::new()));
    let sink_events = Arc::clone(&first_events);
    s.run_with(AlgorithmKind::Bfs, SpeedPreset::Slow, move |ev| {
        sink_events.lock().push((Instant::now(), ev));
    })
    .unwrap();

    s.run_with(AlgorithmKind::Dfs, SpeedPreset::Instant, |_| {})
        .unwrap();
    let cut = Instant::now();
    assert!(matches!(s.wait(), Some(PlaybackOutcome::Completed { .. })));

    // Give a leaked worker every chance to fire.
    thread::sleep(Duration::from_millis(300));
    assert!(first_events.lock().iter().all(|(at, _)| *at < cut));

    let mut reference = Session::with_grid(open_grid(), SessionConfig::default());
    reference
        .run_with(AlgorithmKind::Dfs, SpeedPreset::Instant, |_| {})
        .unwrap();
    reference.wait();
    assert_eq!(s.snapshot(), reference.snapshot());
}

#[test]
fn editing_cancels_playback() {
    let mut s = Session::with_grid(open_grid(), SessionConfig::default());
    let count = Arc::new(Mutex::new(0usize));
    let sink_count = Arc::clone(&count);
    s.run_with(AlgorithmKind::Bfs, SpeedPreset::Slow, move |_| {
        *sink_count.lock() += 1;
    })
    .unwrap();
    s.edit(|g| g.clear_display());
    let frozen = *count.lock();
    assert!(!s.is_playing());

    thread::sleep(Duration::from_millis(300));
    assert_eq!(*count.lock(), frozen);
}

#[test]
fn cancel_is_idempotent() {
    let mut s = Session::with_grid(open_grid(), SessionConfig::default());
    s.cancel();
    s.run_with(AlgorithmKind::AStar, SpeedPreset::Slow, |_| {})
        .unwrap();
    s.cancel();
    s.cancel();
    assert!(s.wait().is_none());
}
