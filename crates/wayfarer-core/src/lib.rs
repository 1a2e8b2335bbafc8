//! **wayfarer-core**: core types for terrain-aware grid routing.
//!
//! This crate provides the inputs every search consumes: geometry
//! primitives, the [`TerrainCatalog`] that prices each terrain type, the
//! [`TerrainGrid`] of terrain cells, and the [`ConfigError`] raised when any
//! of them is malformed.

pub mod error;
pub mod geom;
pub mod grid;
pub mod terrain;

pub use error::{ConfigError, Endpoint};
pub use geom::{Point, Range};
pub use grid::TerrainGrid;
pub use terrain::{CatalogBuilder, TerrainCatalog, TerrainId, TerrainSpec};
