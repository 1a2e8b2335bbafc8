//! Collaborators around the routing core: map builders, a terminal renderer
//! and a comparison report.
//!
//! The `route` binary wires them together:
//!
//! ```text
//! cargo run --bin route -- --map random --seed 7 --avoid-water
//! ```

pub mod maps;
pub mod render;
pub mod report;

pub use maps::{MANUAL_GOAL, MANUAL_START, manual_map, random_endpoints, random_map, retarget};
pub use render::{Mark, View, terrain_color};
pub use report::comparison_table;
