//! Least-cost routing over terrain grids.
//!
//! This crate searches a [`TerrainGrid`](wayfarer_core::TerrainGrid) with
//! two algorithms:
//!
//! - **Dijkstra** ([`PathRange::dijkstra_path`])
//! - **A\*** ([`PathRange::astar_path`]) with a Manhattan or octile estimate
//!   scaled by the cheapest terrain
//!
//! Both return a [`SearchResult`] holding the path, its cost and every
//! finalized cell in expansion order. [`Router`] wraps them with endpoint
//! validation and the water [`AvoidancePolicy`]: a water-free route is tried
//! first and water is entered only when no such route exists.
//!
//! Searches run through [`PathRange`], which owns and reuses internal caches
//! so that repeated queries incur zero allocations after warm-up.
//!
//! # Trait hierarchy
//!
//! | Trait | Required for |
//! |---|---|
//! | [`Pather`] | neighbor enumeration |
//! | [`WeightedPather`] : [`Pather`] | Dijkstra |
//! | [`AstarPather`] : [`WeightedPather`] | A* |
//!
//! [`TerrainPather`] implements all three for a grid and catalog.

mod astar;
mod dijkstra;
mod distance;
mod error;
mod neighbors;
mod pathrange;
mod policy;
mod result;
mod router;
mod traits;

pub use distance::{manhattan, octile};
pub use error::{RouteError, SearchError};
pub use neighbors::Connectivity;
pub use pathrange::PathRange;
pub use policy::AvoidancePolicy;
pub use result::{Algorithm, Comparison, SearchResult};
pub use router::{RouteOptions, Router, TerrainPather};
pub use traits::{AstarPather, Pather, WeightedPather};
