use std::fmt;

use wayfarer_core::{Point, TerrainCatalog, TerrainGrid};

/// Which search algorithm produced a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Algorithm {
    Dijkstra,
    AStar,
}

impl Algorithm {
    pub const ALL: [Algorithm; 2] = [Algorithm::Dijkstra, Algorithm::AStar];
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Dijkstra => f.pad("Dijkstra"),
            Self::AStar => f.pad("A*"),
        }
    }
}

/// Outcome of one search run.
///
/// An unreachable goal is a regular result: `path` is empty and `cost` is
/// infinite. Otherwise `path` runs from start to goal inclusive and `cost`
/// is the sum of the edge costs along it.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchResult {
    pub algorithm: Algorithm,
    pub path: Vec<Point>,
    pub cost: f64,
    /// Finalized cells in expansion order.
    pub visited: Vec<Point>,
    /// Set when the water-avoiding attempt failed and this result comes from
    /// the unfiltered re-run.
    pub fallback: bool,
}

impl SearchResult {
    pub(crate) fn unreachable(algorithm: Algorithm, visited: Vec<Point>) -> Self {
        Self {
            algorithm,
            path: Vec::new(),
            cost: f64::INFINITY,
            visited,
            fallback: false,
        }
    }

    #[inline]
    pub fn is_reachable(&self) -> bool {
        !self.path.is_empty()
    }

    /// Number of moves along the path (0 when unreachable).
    #[inline]
    pub fn steps(&self) -> usize {
        self.path.len().saturating_sub(1)
    }

    /// Number of water cells the path enters.
    pub fn water_cells(&self, grid: &TerrainGrid, catalog: &TerrainCatalog) -> usize {
        self.path
            .iter()
            .filter(|&&p| grid.at(p).is_some_and(|id| catalog.is_water(id)))
            .count()
    }
}

/// Dijkstra and A* results for the same request, side by side.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Comparison {
    pub dijkstra: SearchResult,
    pub astar: SearchResult,
}

impl Comparison {
    /// Whether both algorithms found routes of the same cost (within
    /// `eps`), or both found none.
    pub fn costs_agree(&self, eps: f64) -> bool {
        match (self.dijkstra.is_reachable(), self.astar.is_reachable()) {
            (true, true) => (self.dijkstra.cost - self.astar.cost).abs() <= eps,
            (false, false) => true,
            _ => false,
        }
    }
}
