use thiserror::Error;
use wayfarer_core::{ConfigError, Point};

/// Invariant violations detected while a search is running.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SearchError {
    /// Both engines order their frontier on the assumption that edge costs
    /// are finite and non-negative; such an edge aborts the run.
    #[error("edge {from} -> {to} has invalid cost {cost}")]
    InvalidEdgeCost { from: Point, to: Point, cost: f64 },
}

/// Anything that can stop a routing request.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RouteError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Search(#[from] SearchError),
}
