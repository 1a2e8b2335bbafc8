//! Terrain types and the catalog that prices them.
//!
//! A [`TerrainCatalog`] is built once before any search and is read-only
//! afterwards. Cells refer to their terrain through a compact [`TerrainId`],
//! so every lookup is a plain slice index.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Index of a terrain type inside its [`TerrainCatalog`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TerrainId(pub u8);

impl TerrainId {
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

// Ids of the default catalog, in definition order.
pub const NORMAL: TerrainId = TerrainId(0);
pub const GRASS: TerrainId = TerrainId(1);
pub const SAND: TerrainId = TerrainId(2);
pub const WATER: TerrainId = TerrainId(3);
pub const MOUNTAIN: TerrainId = TerrainId(4);
pub const ROAD: TerrainId = TerrainId(5);

fn default_passable() -> bool {
    true
}

/// One terrain type: its name, the cost to enter a cell of this type, and
/// how routing and rendering treat it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TerrainSpec {
    pub name: String,
    pub cost: f64,
    #[serde(default)]
    pub water: bool,
    #[serde(default = "default_passable")]
    pub passable: bool,
    pub glyph: char,
}

impl TerrainSpec {
    /// A passable, dry terrain type.
    pub fn new(name: impl Into<String>, cost: f64, glyph: char) -> Self {
        Self {
            name: name.into(),
            cost,
            water: false,
            passable: true,
            glyph,
        }
    }

    /// Mark the terrain as water.
    pub fn water(mut self) -> Self {
        self.water = true;
        self
    }

    /// Mark the terrain as never enterable.
    pub fn impassable(mut self) -> Self {
        self.passable = false;
        self
    }
}

/// On-disk shape of a terrain table.
#[derive(Debug, Deserialize)]
struct TerrainTable {
    terrain: Vec<TerrainSpec>,
}

/// Validated lookup table from [`TerrainId`] to [`TerrainSpec`].
#[derive(Debug, Clone)]
pub struct TerrainCatalog {
    specs: Vec<TerrainSpec>,
    by_name: HashMap<String, TerrainId>,
    by_glyph: HashMap<char, TerrainId>,
    min_cost: f64,
}

impl TerrainCatalog {
    /// Start a custom catalog.
    pub fn builder() -> CatalogBuilder {
        CatalogBuilder::default()
    }

    /// Build a catalog from a list of specs, checking every invariant.
    pub fn from_specs(specs: Vec<TerrainSpec>) -> Result<Self, ConfigError> {
        if specs.is_empty() {
            return Err(ConfigError::EmptyCatalog);
        }
        if specs.len() > u8::MAX as usize {
            return Err(ConfigError::TooManyTerrains(specs.len()));
        }
        let mut names: HashMap<&str, TerrainId> = HashMap::with_capacity(specs.len());
        let mut glyphs: HashMap<char, TerrainId> = HashMap::with_capacity(specs.len());
        for (i, spec) in specs.iter().enumerate() {
            if !spec.cost.is_finite() || spec.cost <= 0.0 {
                return Err(ConfigError::InvalidCost {
                    name: spec.name.clone(),
                    cost: spec.cost,
                });
            }
            if spec.glyph.is_whitespace() {
                return Err(ConfigError::BlankGlyph {
                    name: spec.name.clone(),
                });
            }
            let id = TerrainId(i as u8);
            if names.insert(spec.name.as_str(), id).is_some() {
                return Err(ConfigError::DuplicateTerrain(spec.name.clone()));
            }
            if let Some(prev) = glyphs.insert(spec.glyph, id) {
                return Err(ConfigError::DuplicateGlyph {
                    glyph: spec.glyph,
                    first: specs[prev.index()].name.clone(),
                    second: spec.name.clone(),
                });
            }
        }
        Ok(Self::indexed(specs))
    }

    /// Build the lookup maps. `specs` must already be valid.
    fn indexed(specs: Vec<TerrainSpec>) -> Self {
        let by_name = specs
            .iter()
            .enumerate()
            .map(|(i, s)| (s.name.clone(), TerrainId(i as u8)))
            .collect();
        let by_glyph = specs
            .iter()
            .enumerate()
            .map(|(i, s)| (s.glyph, TerrainId(i as u8)))
            .collect();
        let passable_min = specs
            .iter()
            .filter(|s| s.passable)
            .map(|s| s.cost)
            .fold(f64::INFINITY, f64::min);
        // A catalog with only impassable terrain still needs a finite scale.
        let min_cost = if passable_min.is_finite() {
            passable_min
        } else {
            specs.iter().map(|s| s.cost).fold(f64::INFINITY, f64::min)
        };
        Self {
            specs,
            by_name,
            by_glyph,
            min_cost,
        }
    }

    /// Parse a TOML terrain table (`[[terrain]]` entries).
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let table: TerrainTable = toml::from_str(s)?;
        Self::from_specs(table.terrain)
    }

    /// Cost to enter a cell of the given terrain.
    #[inline]
    pub fn cost_of(&self, id: TerrainId) -> f64 {
        self.specs[id.index()].cost
    }

    /// Whether the given terrain is water.
    #[inline]
    pub fn is_water(&self, id: TerrainId) -> bool {
        self.specs[id.index()].water
    }

    /// Whether the given terrain may be entered at all.
    #[inline]
    pub fn is_passable(&self, id: TerrainId) -> bool {
        self.specs[id.index()].passable
    }

    #[inline]
    pub fn spec(&self, id: TerrainId) -> &TerrainSpec {
        &self.specs[id.index()]
    }

    /// Whether `id` belongs to this catalog.
    #[inline]
    pub fn contains(&self, id: TerrainId) -> bool {
        id.index() < self.specs.len()
    }

    pub fn by_name(&self, name: &str) -> Option<TerrainId> {
        self.by_name.get(name).copied()
    }

    pub fn by_glyph(&self, glyph: char) -> Option<TerrainId> {
        self.by_glyph.get(&glyph).copied()
    }

    /// Smallest cost among passable terrain types. A* scales its heuristic
    /// by this value so the estimate never exceeds the true remaining cost.
    #[inline]
    pub fn min_cost(&self) -> f64 {
        self.min_cost
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }

    /// Iterate over `(TerrainId, &TerrainSpec)` in definition order.
    pub fn iter(&self) -> impl Iterator<Item = (TerrainId, &TerrainSpec)> + '_ {
        self.specs
            .iter()
            .enumerate()
            .map(|(i, s)| (TerrainId(i as u8), s))
    }
}

impl Default for TerrainCatalog {
    /// Normal, grass, sand, water, mountain and road, with ids matching
    /// [`NORMAL`] .. [`ROAD`].
    fn default() -> Self {
        Self::indexed(default_specs())
    }
}

fn default_specs() -> Vec<TerrainSpec> {
    vec![
        TerrainSpec::new("normal", 1.0, '.'),
        TerrainSpec::new("grass", 1.3, '"'),
        TerrainSpec::new("sand", 1.7, ':'),
        TerrainSpec::new("water", 5.0, '~').water(),
        TerrainSpec::new("mountain", 2.5, '^'),
        TerrainSpec::new("road", 0.7, '='),
    ]
}

/// Incremental constructor for [`TerrainCatalog`].
#[derive(Debug, Default, Clone)]
pub struct CatalogBuilder {
    specs: Vec<TerrainSpec>,
}

impl CatalogBuilder {
    /// Add a terrain type. Its id is its position in insertion order.
    pub fn terrain(mut self, spec: TerrainSpec) -> Self {
        self.specs.push(spec);
        self
    }

    pub fn build(self) -> Result<TerrainCatalog, ConfigError> {
        TerrainCatalog::from_specs(self.specs)
    }
}
