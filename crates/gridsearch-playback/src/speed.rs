use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

/// Named playback speeds. Each maps to a fixed delay between visited-cell
/// steps; path steps take twice as long.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum SpeedPreset {
    Slow,
    Medium,
    #[default]
    Fast,
    /// No delay; useful for tests and for jumping straight to the result.
    Instant,
}

impl SpeedPreset {
    pub const ALL: [SpeedPreset; 4] = [
        SpeedPreset::Slow,
        SpeedPreset::Medium,
        SpeedPreset::Fast,
        SpeedPreset::Instant,
    ];

    /// Delay in milliseconds between visited-cell steps.
    pub const fn millis(self) -> u64 {
        match self {
            SpeedPreset::Slow => 100,
            SpeedPreset::Medium => 40,
            SpeedPreset::Fast => 10,
            SpeedPreset::Instant => 0,
        }
    }

    /// Delay before each visited-cell step.
    pub fn visit_delay(self) -> Duration {
        Duration::from_millis(self.millis())
    }

    /// Delay before each path step.
    pub fn path_delay(self) -> Duration {
        Duration::from_millis(self.millis() * 2)
    }

    pub fn name(self) -> &'static str {
        match self {
            SpeedPreset::Slow => "slow",
            SpeedPreset::Medium => "medium",
            SpeedPreset::Fast => "fast",
            SpeedPreset::Instant => "instant",
        }
    }
}

impl fmt::Display for SpeedPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown speed {0:?} (expected one of: slow, medium, fast, instant)")]
pub struct ParseSpeedError(pub String);

impl FromStr for SpeedPreset {
    type Err = ParseSpeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        SpeedPreset::ALL
            .into_iter()
            .find(|p| p.name() == lower)
            .ok_or_else(|| ParseSpeedError(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_steps_take_twice_as_long() {
        for preset in SpeedPreset::ALL {
            assert_eq!(preset.path_delay(), preset.visit_delay() * 2);
        }
        assert_eq!(SpeedPreset::Medium.visit_delay(), Duration::from_millis(40));
    }

    #[test]
    fn parses_names() {
        assert_eq!("Slow".parse(), Ok(SpeedPreset::Slow));
        assert_eq!("instant".parse(), Ok(SpeedPreset::Instant));
        assert!("ludicrous".parse::<SpeedPreset>().is_err());
    }

    #[test]
    fn presets_get_faster() {
        let ms: Vec<u64> = SpeedPreset::ALL.iter().map(|p| p.millis()).collect();
        assert!(ms.windows(2).all(|w| w[0] > w[1]));
    }
}
