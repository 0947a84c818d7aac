use std::io;

use gridsearch_paths::EngineError;
use thiserror::Error;

/// Errors from starting a run or its playback.
#[derive(Debug, Error)]
pub enum PlaybackError {
    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error("failed to spawn playback thread")]
    Spawn(#[source] io::Error),

    #[error("cannot compare {0} algorithms at once (at most {max})", max = crate::MAX_TRACKS)]
    TooManyTracks(usize),
}
