//! Summary statistics of a run.

use std::fmt;
use std::time::Duration;

use crate::kind::AlgorithmKind;
use crate::result::AlgorithmResult;

/// Figures reported to the user after a run.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Metrics {
    pub kind: AlgorithmKind,
    /// Wall-clock time of the algorithm call, in milliseconds.
    pub execution_time_ms: f64,
    pub nodes_visited: usize,
    pub path_length: usize,
    pub path_found: bool,
}

impl Metrics {
    /// Read the figures off `result`; `elapsed` is the measured algorithm
    /// time (playback excluded).
    pub fn collect(result: &AlgorithmResult, elapsed: Duration) -> Self {
        Self {
            kind: result.kind,
            execution_time_ms: elapsed.as_secs_f64() * 1000.0,
            nodes_visited: result.nodes_visited(),
            path_length: result.path_length(),
            path_found: result.path_found(),
        }
    }
}

impl fmt::Display for Metrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:<9} visited {:>5}  ",
            self.kind.name(),
            self.nodes_visited
        )?;
        if self.path_found {
            write!(f, "path {:>4}", self.path_length)?;
        } else {
            write!(f, "no path  ")?;
        }
        write!(f, "  {:.3} ms", self.execution_time_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridsearch_core::Pos;

    #[test]
    fn collects_counts_and_time() {
        let result = AlgorithmResult::new(
            AlgorithmKind::Bfs,
            vec![Pos::new(0, 0), Pos::new(0, 1), Pos::new(1, 0)],
            vec![Pos::new(0, 0), Pos::new(0, 1)],
        );
        let m = Metrics::collect(&result, Duration::from_micros(1500));
        assert_eq!(m.nodes_visited, 3);
        assert_eq!(m.path_length, 2);
        assert!(m.path_found);
        assert!((m.execution_time_ms - 1.5).abs() < 1e-9);
    }

    #[test]
    fn empty_path_is_not_found() {
        let result = AlgorithmResult::new(AlgorithmKind::Dfs, vec![Pos::new(2, 2)], vec![]);
        let m = Metrics::collect(&result, Duration::ZERO);
        assert!(!m.path_found);
        assert_eq!(m.path_length, 0);
        assert!(m.to_string().contains("no path"));
    }
}
