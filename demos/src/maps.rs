//! Ready-made terrain maps.
//!
//! Both builders produce grids over the default catalog ids; use
//! [`retarget`] to move them onto a catalog loaded from TOML.

use rand::Rng;
use wayfarer_core::terrain::{GRASS, MOUNTAIN, NORMAL, ROAD, SAND, WATER};
use wayfarer_core::{ConfigError, Endpoint, Point, Range, TerrainCatalog, TerrainGrid, TerrainId};

pub const MANUAL_SIZE: i32 = 15;
pub const MANUAL_START: Point = Point::at(1, 1);
pub const MANUAL_GOAL: Point = Point::at(13, 13);

/// Interior terrain weights for [`random_map`], in percent. Roads are
/// added separately as seeds.
const RANDOM_WEIGHTS: [(TerrainId, u32); 5] = [
    (NORMAL, 50),
    (GRASS, 20),
    (SAND, 15),
    (WATER, 10),
    (MOUNTAIN, 5),
];

const ROAD_SEEDS: usize = 10;
const ROAD_SPREAD: f64 = 0.3;

/// The fixed 15x15 test map: a lake crossed by a grass strip, a mountain
/// block, a sand patch and a road cross.
pub fn manual_map() -> Result<TerrainGrid, ConfigError> {
    let mut grid = TerrainGrid::filled(MANUAL_SIZE, MANUAL_SIZE, NORMAL)?;
    grid.fill_range(Range::new(5, 2, 10, 5), WATER);
    grid.fill_range(Range::new(3, 7, 7, 12), MOUNTAIN);
    grid.fill_range(Range::new(10, 8, 14, 13), SAND);
    grid.fill_range(Range::new(2, 3, 13, 4), GRASS);
    grid.fill_range(Range::new(0, 7, MANUAL_SIZE, 8), ROAD);
    grid.fill_range(Range::new(7, 8, 8, MANUAL_SIZE), ROAD);
    Ok(grid)
}

fn pick_terrain(rng: &mut impl Rng) -> TerrainId {
    let total: u32 = RANDOM_WEIGHTS.iter().map(|&(_, w)| w).sum();
    let mut roll = rng.random_range(0..total);
    for &(id, w) in &RANDOM_WEIGHTS {
        if roll < w {
            return id;
        }
        roll -= w;
    }
    NORMAL
}

/// A random map with a dry border and a few short road segments.
pub fn random_map(rng: &mut impl Rng, rows: i32, cols: i32) -> Result<TerrainGrid, ConfigError> {
    let mut grid = TerrainGrid::filled(rows, cols, NORMAL)?;
    if rows < 3 || cols < 3 {
        return Ok(grid);
    }

    for p in Range::new(1, 1, cols - 1, rows - 1).iter() {
        grid.set(p, pick_terrain(rng));
    }

    for _ in 0..ROAD_SEEDS {
        let seed = Point::at(rng.random_range(1..rows - 1), rng.random_range(1..cols - 1));
        grid.set(seed, ROAD);
        for d in [Point::new(0, 1), Point::new(1, 0), Point::new(0, -1), Point::new(-1, 0)] {
            if rng.random_bool(ROAD_SPREAD) {
                grid.set(seed + d, ROAD);
            }
        }
    }
    log::debug!("random map {rows}x{cols}: {} water cells", grid.count_fn(|_, id| id == WATER));
    Ok(grid)
}

fn draw_endpoint(
    rng: &mut impl Rng,
    grid: &TerrainGrid,
    catalog: &TerrainCatalog,
    other: Option<Point>,
) -> Option<Point> {
    const ATTEMPTS: usize = 1000;
    (0..ATTEMPTS)
        .map(|_| Point::at(rng.random_range(0..grid.rows()), rng.random_range(0..grid.cols())))
        .find(|&p| {
            Some(p) != other && grid.validate_endpoint(catalog, Endpoint::Start, p).is_ok()
        })
}

/// Pick two distinct cells that are valid route endpoints. Gives up after a
/// bounded number of draws.
pub fn random_endpoints(
    rng: &mut impl Rng,
    grid: &TerrainGrid,
    catalog: &TerrainCatalog,
) -> Option<(Point, Point)> {
    let start = draw_endpoint(rng, grid, catalog, None)?;
    let goal = draw_endpoint(rng, grid, catalog, Some(start))?;
    Some((start, goal))
}

/// Re-express a grid built on `from` in terms of `to`, matching terrain by
/// name.
pub fn retarget(
    grid: &TerrainGrid,
    from: &TerrainCatalog,
    to: &TerrainCatalog,
) -> Result<TerrainGrid, ConfigError> {
    let mut out = TerrainGrid::filled(grid.rows(), grid.cols(), TerrainId(0))?;
    for (pos, id) in grid.iter() {
        let name = &from.spec(id).name;
        let mapped = to.by_name(name).ok_or_else(|| ConfigError::UnknownTerrain {
            label: name.clone(),
            pos,
        })?;
        out.set(pos, mapped);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn manual_map_layout() {
        let g = manual_map().unwrap();
        assert_eq!((g.rows(), g.cols()), (15, 15));
        // The grass strip cuts through the middle row of the lake.
        assert_eq!(g.at(Point::at(3, 6)), Some(GRASS));
        assert_eq!(g.at(Point::at(2, 6)), Some(WATER));
        assert_eq!(g.at(Point::at(4, 9)), Some(WATER));
        assert_eq!(g.count_fn(|_, id| id == WATER), 10);
        // The road row runs over the top of the mountains.
        assert_eq!(g.at(Point::at(7, 4)), Some(ROAD));
        assert_eq!(g.at(Point::at(8, 4)), Some(MOUNTAIN));
        assert_eq!(g.at(Point::at(14, 7)), Some(ROAD));
        assert_eq!(g.at(Point::at(10, 12)), Some(SAND));
        assert_eq!(g.at(MANUAL_START), Some(NORMAL));
        assert_eq!(g.at(MANUAL_GOAL), Some(NORMAL));
    }

    #[test]
    fn random_map_is_seeded_and_has_dry_border() {
        let a = random_map(&mut StdRng::seed_from_u64(7), 12, 18).unwrap();
        let b = random_map(&mut StdRng::seed_from_u64(7), 12, 18).unwrap();
        assert_eq!(a, b);
        let cat = TerrainCatalog::default();
        for (p, id) in a.iter() {
            let edge = p.row() == 0 || p.col() == 0 || p.row() == 11 || p.col() == 17;
            if edge {
                assert!(!cat.is_water(id), "water on border at {p}");
            }
        }
        assert!(a.count_fn(|_, id| id == ROAD) >= 1);
    }

    #[test]
    fn tiny_random_map_is_plain() {
        let g = random_map(&mut StdRng::seed_from_u64(1), 2, 5).unwrap();
        assert_eq!(g.count_fn(|_, id| id == NORMAL), 10);
        assert_eq!(
            random_map(&mut StdRng::seed_from_u64(1), 0, 5),
            Err(ConfigError::EmptyGrid)
        );
    }

    #[test]
    fn random_endpoints_are_valid() {
        let cat = TerrainCatalog::default();
        let mut rng = StdRng::seed_from_u64(3);
        let g = random_map(&mut rng, 10, 10).unwrap();
        let (s, e) = random_endpoints(&mut rng, &g, &cat).unwrap();
        assert_ne!(s, e);
        assert!(g.validate_endpoints(&cat, s, e).is_ok());

        let lake = TerrainGrid::filled(3, 3, WATER).unwrap();
        assert_eq!(random_endpoints(&mut rng, &lake, &cat), None);
    }

    #[test]
    fn retarget_by_name() {
        let from = TerrainCatalog::default();
        let to = TerrainCatalog::from_toml_str(
            r#"
            [[terrain]]
            name = "water"
            cost = 3.0
            water = true
            glyph = "w"

            [[terrain]]
            name = "normal"
            cost = 1.0
            glyph = "n"
            "#,
        )
        .unwrap();
        let g = TerrainGrid::from_glyphs(&from, ".~").unwrap();
        let moved = retarget(&g, &from, &to).unwrap();
        assert_eq!(moved.to_glyphs(&to), "nw");

        let g = TerrainGrid::from_glyphs(&from, ".^").unwrap();
        assert!(matches!(
            retarget(&g, &from, &to),
            Err(ConfigError::UnknownTerrain { .. })
        ));
    }
}
