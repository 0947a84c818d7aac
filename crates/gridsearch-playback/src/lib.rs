//! Animated playback of search results.
//!
//! A finished [`AlgorithmResult`](gridsearch_paths::AlgorithmResult) is
//! turned into a [`Timeline`] of rounds. A [`Player`] applies rounds to a
//! [`Surface`] on demand; a [`Scheduler`] does the same on a worker thread
//! at the pace of a [`SpeedPreset`] and can be cancelled at any time.
//! [`Session`] ties a shared grid, the search engine and one scheduler
//! together.

mod config;
mod error;
mod player;
mod scheduler;
mod session;
mod speed;
mod surface;
mod timeline;

pub use config::SessionConfig;
pub use error::PlaybackError;
pub use player::Player;
pub use scheduler::{CancelToken, PlaybackHandle, PlaybackOutcome, Scheduler, spawn};
pub use session::Session;
pub use speed::{ParseSpeedError, SpeedPreset};
pub use surface::{ComparisonBoard, PlaybackEvent, Surface, apply};
pub use timeline::{Phase, Round, Step, Timeline, Track};

/// Most algorithms a single comparison can animate.
pub const MAX_TRACKS: usize = 8;
