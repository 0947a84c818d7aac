//! Timed playback on a background thread.
//!
//! A playback owns a worker thread that sleeps until each round is due and
//! then applies it to a shared [`Surface`]. The worker applies rounds while
//! holding the playback's gate, and [`CancelToken::cancel`] takes the same
//! gate, so once `cancel` returns no further mutation from that playback can
//! land. Events are handed to the sink after the gate is released, so a slow
//! sink never holds up `cancel`; the sink is not called again once a cancel
//! has been requested.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};
use std::time::Instant;

use log::{debug, trace, warn};
use parking_lot::{Condvar, Mutex};

use crate::error::PlaybackError;
use crate::player::Player;
use crate::surface::{PlaybackEvent, Surface};
use crate::timeline::Timeline;

/// How a playback ended.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PlaybackOutcome {
    Completed { rounds: usize },
    Cancelled { rounds_applied: usize },
}

#[derive(Debug, Default)]
struct Gate {
    cancelled: Mutex<bool>,
    wake: Condvar,
    /// Mirrors `cancelled` for the sink loop, which runs without the lock.
    stop: AtomicBool,
}

// ---------------------------------------------------------------------------
// CancelToken
// ---------------------------------------------------------------------------

/// Cloneable handle that stops one playback.
#[derive(Clone, Debug)]
pub struct CancelToken {
    gate: Arc<Gate>,
}

impl CancelToken {
    /// Stop the playback. Blocks while a round is being applied; after it
    /// returns the surface is no longer touched and no further event is
    /// handed to the sink. A sink call already running may still finish.
    pub fn cancel(&self) {
        self.gate.stop.store(true, Ordering::Release);
        let mut cancelled = self.gate.cancelled.lock();
        *cancelled = true;
        self.gate.wake.notify_all();
    }

    #[inline]
    pub fn is_cancelled(&self) -> bool {
        self.gate.stop.load(Ordering::Acquire)
    }
}

// ---------------------------------------------------------------------------
// PlaybackHandle
// ---------------------------------------------------------------------------

/// A running playback. Dropping the handle cancels it.
#[derive(Debug)]
pub struct PlaybackHandle {
    id: u64,
    token: CancelToken,
    worker: Option<JoinHandle<PlaybackOutcome>>,
}

impl PlaybackHandle {
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn token(&self) -> CancelToken {
        self.token.clone()
    }

    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// Whether the worker has exited, either by finishing or by
    /// cancellation.
    pub fn is_finished(&self) -> bool {
        self.worker.as_ref().is_none_or(JoinHandle::is_finished)
    }

    /// Block until the playback ends. Returns `None` if the worker panicked.
    pub fn wait(mut self) -> Option<PlaybackOutcome> {
        let worker = self.worker.take()?;
        match worker.join() {
            Ok(outcome) => Some(outcome),
            Err(_) => {
                warn!("playback {} worker panicked", self.id);
                None
            }
        }
    }
}

impl Drop for PlaybackHandle {
    fn drop(&mut self) {
        if self.worker.is_some() {
            self.token.cancel();
        }
    }
}

/// Start playing `timeline` onto `surface`, calling `sink` for every applied
/// event.
///
/// The surface lock is held only while a round is applied. `sink` runs on
/// the worker thread after the round is applied.
pub fn spawn<S, F>(
    id: u64,
    timeline: Timeline,
    surface: Arc<Mutex<S>>,
    sink: F,
) -> Result<PlaybackHandle, PlaybackError>
where
    S: Surface + Send + 'static,
    F: FnMut(PlaybackEvent) + Send + 'static,
{
    let gate = Arc::new(Gate::default());
    let worker_gate = Arc::clone(&gate);
    debug!(
        "playback {id}: {} rounds, {} steps, {:?}",
        timeline.len(),
        timeline.step_count(),
        timeline.duration()
    );
    let worker = thread::Builder::new()
        .name(format!("playback-{id}"))
        .spawn(move || play(id, &worker_gate, Player::new(timeline), &surface, sink))
        .map_err(PlaybackError::Spawn)?;
    Ok(PlaybackHandle {
        id,
        token: CancelToken { gate },
        worker: Some(worker),
    })
}

fn play<S, F>(
    id: u64,
    gate: &Gate,
    mut player: Player,
    surface: &Mutex<S>,
    mut sink: F,
) -> PlaybackOutcome
where
    S: Surface,
    F: FnMut(PlaybackEvent),
{
    let cancelled_at = |player: &Player| {
        debug!("playback {id}: cancelled after {} rounds", player.position());
        PlaybackOutcome::Cancelled {
            rounds_applied: player.position(),
        }
    };

    while let Some(delay) = player.next_delay() {
        let due = Instant::now() + delay;
        let events = {
            let mut cancelled = gate.cancelled.lock();
            while !*cancelled {
                if gate.wake.wait_until(&mut cancelled, due).timed_out() {
                    break;
                }
            }
            if *cancelled {
                return cancelled_at(&player);
            }
            let mut surface = surface.lock();
            player.advance(&mut *surface).unwrap_or_default()
        };

        trace!("playback {id}: round {} -> {} events", player.position(), events.len());
        for ev in events {
            if gate.stop.load(Ordering::Acquire) {
                return cancelled_at(&player);
            }
            sink(ev);
        }
    }
    debug!("playback {id}: completed");
    PlaybackOutcome::Completed {
        rounds: player.position(),
    }
}

// ---------------------------------------------------------------------------
// Scheduler
// ---------------------------------------------------------------------------

/// Keeps at most one playback alive. Starting a new one cancels the
/// previous one first.
#[derive(Debug, Default)]
pub struct Scheduler {
    active: Option<PlaybackHandle>,
    next_id: u64,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancel the active playback, if any, and start a new one.
    pub fn start<S, F>(
        &mut self,
        timeline: Timeline,
        surface: Arc<Mutex<S>>,
        sink: F,
    ) -> Result<CancelToken, PlaybackError>
    where
        S: Surface + Send + 'static,
        F: FnMut(PlaybackEvent) + Send + 'static,
    {
        self.cancel_active();
        self.next_id += 1;
        let handle = spawn(self.next_id, timeline, surface, sink)?;
        let token = handle.token();
        self.active = Some(handle);
        Ok(token)
    }

    /// Cancel the active playback. No-op when idle.
    pub fn cancel_active(&mut self) {
        if let Some(handle) = self.active.take() {
            handle.cancel();
        }
    }

    /// Whether a playback is still running.
    pub fn is_playing(&self) -> bool {
        self.active.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Block until the active playback ends.
    pub fn wait(&mut self) -> Option<PlaybackOutcome> {
        self.active.take()?.wait()
    }
}
