//! Configuration errors raised while building catalogs and grids.

use thiserror::Error;

use crate::geom::Point;

/// Which end of a route an endpoint error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Start,
    Goal,
}

impl std::fmt::Display for Endpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Start => f.write_str("start"),
            Self::Goal => f.write_str("goal"),
        }
    }
}

/// Errors detected before any search starts. All of them are fatal to the
/// run that triggered them.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("terrain catalog is empty")]
    EmptyCatalog,

    #[error("terrain \u{201c}{name}\u{201d} has invalid move cost {cost}; costs must be positive and finite")]
    InvalidCost { name: String, cost: f64 },

    #[error("terrain \u{201c}{0}\u{201d} is defined twice")]
    DuplicateTerrain(String),

    #[error("glyph \u{201c}{glyph}\u{201d} is used by both \u{201c}{first}\u{201d} and \u{201c}{second}\u{201d}")]
    DuplicateGlyph {
        glyph: char,
        first: String,
        second: String,
    },

    #[error("terrain \u{201c}{name}\u{201d} uses whitespace as its glyph")]
    BlankGlyph { name: String },

    #[error("too many terrain types: {0} (at most 255)")]
    TooManyTerrains(usize),

    #[error("unknown terrain label \u{201c}{label}\u{201d} at {pos}")]
    UnknownTerrain { label: String, pos: Point },

    #[error("unknown terrain glyph \u{201c}{glyph}\u{201d} at {pos}")]
    UnknownGlyph { glyph: char, pos: Point },

    #[error("grid has no cells")]
    EmptyGrid,

    #[error("a {rows}x{cols} grid has more cells than can be indexed")]
    GridTooLarge { rows: usize, cols: usize },

    #[error("grid row {row} has {found} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("{which} {pos} is outside the {rows}x{cols} grid")]
    OutOfBounds {
        which: Endpoint,
        pos: Point,
        rows: i32,
        cols: i32,
    },

    #[error("{which} {pos} lies on water")]
    WaterEndpoint { which: Endpoint, pos: Point },

    #[error("{which} {pos} lies on impassable terrain \u{201c}{terrain}\u{201d}")]
    ImpassableEndpoint {
        which: Endpoint,
        pos: Point,
        terrain: String,
    },

    #[error("failed to parse terrain table: {0}")]
    Parse(String),
}

impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        Self::Parse(e.message().to_owned())
    }
}
