use gridsearch_paths::AlgorithmKind;

use crate::speed::SpeedPreset;

/// Startup settings for a [`Session`](crate::Session).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SessionConfig {
    pub rows: usize,
    pub cols: usize,
    pub speed: SpeedPreset,
    pub algorithm: AlgorithmKind,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            rows: 20,
            cols: 50,
            speed: SpeedPreset::Fast,
            algorithm: AlgorithmKind::Dijkstra,
        }
    }
}
