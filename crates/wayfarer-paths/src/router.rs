//! Terrain-aware routing on top of the search engines.
//!
//! [`TerrainPather`] turns a [`TerrainGrid`] into a weighted graph under a
//! given [`Connectivity`] and [`AvoidancePolicy`]. [`Router`] validates a
//! request, runs the chosen algorithm with the avoidance filter, and re-runs
//! it unfiltered when the filtered graph does not reach the goal.

use std::f64::consts::SQRT_2;

use wayfarer_core::{ConfigError, Point, TerrainCatalog, TerrainGrid};

use crate::PathRange;
use crate::distance::{manhattan, octile};
use crate::error::{RouteError, SearchError};
use crate::neighbors::Connectivity;
use crate::policy::AvoidancePolicy;
use crate::result::{Algorithm, Comparison, SearchResult};
use crate::traits::{AstarPather, Pather, WeightedPather};

/// Per-request settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RouteOptions {
    pub connectivity: Connectivity,
    /// Try a water-free route first, entering water only if none exists.
    pub avoid_water: bool,
}

/// Graph view of a terrain grid.
#[derive(Debug, Clone, Copy)]
pub struct TerrainPather<'a> {
    grid: &'a TerrainGrid,
    catalog: &'a TerrainCatalog,
    connectivity: Connectivity,
    policy: AvoidancePolicy,
}

impl<'a> TerrainPather<'a> {
    pub fn new(
        grid: &'a TerrainGrid,
        catalog: &'a TerrainCatalog,
        connectivity: Connectivity,
        policy: AvoidancePolicy,
    ) -> Self {
        Self {
            grid,
            catalog,
            connectivity,
            policy,
        }
    }

    /// Whether a search may step onto `p`: in bounds, passable and allowed by
    /// the policy.
    #[inline]
    pub fn enters(&self, p: Point) -> bool {
        self.grid.at(p).is_some_and(|id| {
            self.catalog.contains(id)
                && self.catalog.is_passable(id)
                && self.policy.admissible(self.catalog, id)
        })
    }
}

impl Pather for TerrainPather<'_> {
    fn neighbors(&self, p: Point, buf: &mut Vec<Point>) {
        self.connectivity.neighbors(p, buf, |n| self.enters(n));
    }
}

impl WeightedPather for TerrainPather<'_> {
    /// The entered cell's terrain cost, times sqrt(2) on a diagonal step.
    fn cost(&self, from: Point, to: Point) -> f64 {
        let Some(id) = self.grid.at(to) else {
            return f64::INFINITY;
        };
        let base = self.catalog.cost_of(id);
        if from.is_diagonal_to(to) {
            base * SQRT_2
        } else {
            base
        }
    }
}

impl AstarPather for TerrainPather<'_> {
    fn estimate(&self, from: Point, to: Point) -> f64 {
        let steps = match self.connectivity {
            Connectivity::Four => manhattan(from, to),
            Connectivity::Eight => octile(from, to),
        };
        steps * self.catalog.min_cost()
    }
}

/// Routing front end for one grid and catalog.
///
/// The router owns the search caches, so reusing it for many requests on the
/// same grid allocates nothing after the first.
pub struct Router<'a> {
    grid: &'a TerrainGrid,
    catalog: &'a TerrainCatalog,
    options: RouteOptions,
    range: PathRange,
}

impl<'a> Router<'a> {
    /// Fails if the grid holds a terrain id the catalog does not define.
    pub fn new(
        grid: &'a TerrainGrid,
        catalog: &'a TerrainCatalog,
        options: RouteOptions,
    ) -> Result<Self, ConfigError> {
        grid.check_catalog(catalog)?;
        Ok(Self {
            grid,
            catalog,
            options,
            range: PathRange::new(grid.bounds()),
        })
    }

    #[inline]
    pub fn options(&self) -> RouteOptions {
        self.options
    }

    pub fn set_options(&mut self, options: RouteOptions) {
        self.options = options;
    }

    /// Find the cheapest route from `start` to `goal` with `algorithm`.
    ///
    /// Both endpoints must be in bounds, passable and dry. With
    /// `avoid_water` set, the first attempt ignores water cells; if it does
    /// not reach the goal the search is repeated with water allowed and the
    /// second result is returned with `fallback` set.
    pub fn route(
        &mut self,
        algorithm: Algorithm,
        start: Point,
        goal: Point,
    ) -> Result<SearchResult, RouteError> {
        self.grid.validate_endpoints(self.catalog, start, goal)?;

        let policy = AvoidancePolicy::from_flag(self.options.avoid_water);
        log::debug!(
            "{algorithm}: routing {start} -> {goal} ({:?}, {policy:?})",
            self.options.connectivity
        );

        let mut result = self.run(algorithm, policy, start, goal)?;
        if !result.is_reachable() && policy.is_filtering() {
            log::info!(
                "{algorithm}: no dry route from {start} to {goal} after {} expansions, retrying through water",
                result.visited.len()
            );
            result = self.run(algorithm, AvoidancePolicy::Permissive, start, goal)?;
            result.fallback = true;
        }

        if result.is_reachable() {
            log::debug!(
                "{algorithm}: cost {:.3}, {} steps, {} visited",
                result.cost,
                result.steps(),
                result.visited.len()
            );
        } else {
            log::warn!("{algorithm}: {goal} is unreachable from {start}");
        }
        Ok(result)
    }

    /// Run Dijkstra and A* on the same request.
    pub fn compare(&mut self, start: Point, goal: Point) -> Result<Comparison, RouteError> {
        Ok(Comparison {
            dijkstra: self.route(Algorithm::Dijkstra, start, goal)?,
            astar: self.route(Algorithm::AStar, start, goal)?,
        })
    }

    fn run(
        &mut self,
        algorithm: Algorithm,
        policy: AvoidancePolicy,
        start: Point,
        goal: Point,
    ) -> Result<SearchResult, SearchError> {
        let pather = TerrainPather::new(self.grid, self.catalog, self.options.connectivity, policy);
        match algorithm {
            Algorithm::Dijkstra => self.range.dijkstra_path(&pather, start, goal),
            Algorithm::AStar => self.range.astar_path(&pather, start, goal),
        }
    }
}
