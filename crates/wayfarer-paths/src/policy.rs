use wayfarer_core::{TerrainCatalog, TerrainId};

/// Rule deciding which terrain a search may enter.
///
/// The policy is a pure filter applied while expanding neighbors. It never
/// looks at connectivity; whether a filtered search must be retried is the
/// router's call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AvoidancePolicy {
    /// Every passable cell is admissible.
    #[default]
    Permissive,
    /// Water cells are excluded.
    AvoidWater,
}

impl AvoidancePolicy {
    #[inline]
    pub fn from_flag(avoid_water: bool) -> Self {
        if avoid_water {
            Self::AvoidWater
        } else {
            Self::Permissive
        }
    }

    /// Whether this policy removes anything from the graph.
    #[inline]
    pub fn is_filtering(self) -> bool {
        self != Self::Permissive
    }

    /// Whether a cell of terrain `id` may be entered under this policy.
    #[inline]
    pub fn admissible(self, catalog: &TerrainCatalog, id: TerrainId) -> bool {
        match self {
            Self::Permissive => true,
            Self::AvoidWater => !catalog.is_water(id),
        }
    }
}
