//! Validated entry point for running a search.

use std::time::{Duration, Instant};

use gridsearch_core::{Dims, Grid, Pos};
use log::debug;
use thiserror::Error;

use crate::kind::AlgorithmKind;
use crate::result::AlgorithmResult;

/// Precondition failures reported before the grid is touched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("no start cell is set")]
    MissingStart,

    #[error("no end cell is set")]
    MissingEnd,

    #[error("start and end are both {0}")]
    SameEndpoints(Pos),

    #[error("endpoint {pos} is outside the {dims} grid")]
    OutOfBounds { pos: Pos, dims: Dims },

    #[error("endpoint {0} is a wall")]
    Blocked(Pos),
}

/// A result together with the time the pure algorithm call took.
#[derive(Debug, Clone)]
pub struct TimedRun {
    pub result: AlgorithmResult,
    pub elapsed: Duration,
}

/// Dispatches an [`AlgorithmKind`] to its strategy after checking endpoints.
#[derive(Copy, Clone, Debug, Default)]
pub struct SearchEngine;

impl SearchEngine {
    pub fn new() -> Self {
        Self
    }

    /// Check that both endpoints are set, distinct, in bounds and passable.
    pub fn validate(
        grid: &Grid,
        start: Option<Pos>,
        end: Option<Pos>,
    ) -> Result<(Pos, Pos), EngineError> {
        let start = start.ok_or(EngineError::MissingStart)?;
        let end = end.ok_or(EngineError::MissingEnd)?;
        if start == end {
            return Err(EngineError::SameEndpoints(start));
        }
        for p in [start, end] {
            let node = grid.node(p).ok_or(EngineError::OutOfBounds {
                pos: p,
                dims: grid.dims(),
            })?;
            if node.is_wall() {
                return Err(EngineError::Blocked(p));
            }
        }
        Ok((start, end))
    }

    /// Reset the grid's scratch state and run `kind` from `start` to `end`.
    ///
    /// On error the grid is left exactly as it was.
    pub fn run(
        &self,
        kind: AlgorithmKind,
        grid: &mut Grid,
        start: Option<Pos>,
        end: Option<Pos>,
    ) -> Result<AlgorithmResult, EngineError> {
        self.run_timed(kind, grid, start, end).map(|t| t.result)
    }

    /// Like [`run`](Self::run), also measuring the algorithm call itself
    /// (reset excluded).
    pub fn run_timed(
        &self,
        kind: AlgorithmKind,
        grid: &mut Grid,
        start: Option<Pos>,
        end: Option<Pos>,
    ) -> Result<TimedRun, EngineError> {
        let (start, end) = Self::validate(grid, start, end)?;
        grid.reset();

        let t0 = Instant::now();
        let result = kind.search(grid, start, end);
        let elapsed = t0.elapsed();

        debug!(
            "{kind}: {start} -> {end} on {} grid, visited {}, path {}, {:?}",
            grid.dims(),
            result.nodes_visited(),
            result.path_length(),
            elapsed
        );
        Ok(TimedRun { result, elapsed })
    }

    /// Run using the grid's own start and end markers.
    pub fn run_endpoints(
        &self,
        kind: AlgorithmKind,
        grid: &mut Grid,
    ) -> Result<TimedRun, EngineError> {
        let (start, end) = (grid.start(), grid.end());
        self.run_timed(kind, grid, start, end)
    }
}
