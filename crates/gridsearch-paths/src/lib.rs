//! Graph search over a [`gridsearch_core::Grid`].
//!
//! Four strategies share the [`Search`] contract:
//!
//! | Strategy | Frontier | Shortest path |
//! |---|---|---|
//! | [`BreadthFirst`] | FIFO queue | yes (hop count) |
//! | [`DepthFirst`] | LIFO stack | no |
//! | [`Dijkstra`] | stable min-heap on distance | yes |
//! | [`AStar`] | stable min-heap on `g + h` (Manhattan) | yes |
//!
//! Callers normally go through [`SearchEngine`], which validates endpoints,
//! resets scratch state and dispatches on [`AlgorithmKind`]. [`Metrics`]
//! summarises an [`AlgorithmResult`].

mod astar;
mod bfs;
mod dfs;
mod dijkstra;
mod engine;
mod frontier;
mod kind;
mod metrics;
mod path;
mod result;
mod traits;

pub use astar::AStar;
pub use bfs::BreadthFirst;
pub use dfs::DepthFirst;
pub use dijkstra::Dijkstra;
pub use engine::{EngineError, SearchEngine, TimedRun};
pub use frontier::Frontier;
pub use kind::{AlgorithmKind, ParseKindError};
pub use metrics::Metrics;
pub use result::AlgorithmResult;
pub use traits::Search;
