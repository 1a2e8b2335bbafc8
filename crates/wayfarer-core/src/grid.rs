//! The [`TerrainGrid`] type: a rectangular map of [`TerrainId`] cells.
//!
//! A grid can be built from terrain names, from a block of glyph text, or
//! filled programmatically. Construction checks every label against the
//! [`TerrainCatalog`]; search code never sees an unknown terrain.

use crate::error::{ConfigError, Endpoint};
use crate::geom::{Point, Range};
use crate::terrain::{TerrainCatalog, TerrainId};

/// Convert row and column counts to grid dimensions. The cell count must
/// fit in `i32` so that every flat index does too.
fn dims(rows: usize, cols: usize) -> Result<(i32, i32), ConfigError> {
    let too_large = || ConfigError::GridTooLarge { rows, cols };
    let r = i32::try_from(rows).map_err(|_| too_large())?;
    let c = i32::try_from(cols).map_err(|_| too_large())?;
    r.checked_mul(c).ok_or_else(too_large)?;
    Ok((r, c))
}

/// A `rows x cols` array of terrain ids stored row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TerrainGrid {
    cells: Vec<TerrainId>,
    rows: i32,
    cols: i32,
}

impl TerrainGrid {
    /// Create a grid with every cell set to `fill`.
    pub fn filled(rows: i32, cols: i32, fill: TerrainId) -> Result<Self, ConfigError> {
        if rows <= 0 || cols <= 0 {
            return Err(ConfigError::EmptyGrid);
        }
        let len = rows
            .checked_mul(cols)
            .ok_or(ConfigError::GridTooLarge {
                rows: rows as usize,
                cols: cols as usize,
            })?;
        Ok(Self {
            cells: vec![fill; len as usize],
            rows,
            cols,
        })
    }

    /// Build a grid from rows of terrain names, e.g. `[["grass", "water"]]`.
    pub fn from_labels<R, S>(catalog: &TerrainCatalog, rows: &[R]) -> Result<Self, ConfigError>
    where
        R: AsRef<[S]>,
        S: AsRef<str>,
    {
        let expected = rows.first().map_or(0, |r| r.as_ref().len());
        if expected == 0 {
            return Err(ConfigError::EmptyGrid);
        }
        let (nrows, ncols) = dims(rows.len(), expected)?;
        let mut cells = Vec::with_capacity(rows.len() * expected);
        for (y, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != expected {
                return Err(ConfigError::RaggedRow {
                    row: y,
                    expected,
                    found: row.len(),
                });
            }
            for (x, label) in row.iter().enumerate() {
                let label = label.as_ref();
                let id = catalog
                    .by_name(label)
                    .ok_or_else(|| ConfigError::UnknownTerrain {
                        label: label.to_owned(),
                        pos: Point::new(x as i32, y as i32),
                    })?;
                cells.push(id);
            }
        }
        Ok(Self {
            cells,
            rows: nrows,
            cols: ncols,
        })
    }

    /// Build a grid from glyph text, one line per row.
    ///
    /// Leading and trailing blank lines are ignored, as is the common
    /// indentation of the block, so grids can be written inline in source.
    pub fn from_glyphs(catalog: &TerrainCatalog, text: &str) -> Result<Self, ConfigError> {
        let lines: Vec<&str> = text
            .lines()
            .map(str::trim_end)
            .skip_while(|l| l.trim().is_empty())
            .collect();
        let end = lines
            .iter()
            .rposition(|l| !l.trim().is_empty())
            .map_or(0, |i| i + 1);
        let lines = &lines[..end];
        let indent = lines
            .iter()
            .filter(|l| !l.trim().is_empty())
            .map(|l| l.len() - l.trim_start().len())
            .min()
            .unwrap_or(0);

        let rows: Vec<Vec<char>> = lines
            .iter()
            .map(|l| l.get(indent..).unwrap_or("").chars().collect())
            .collect();
        let expected = rows.first().map_or(0, Vec::len);
        if expected == 0 {
            return Err(ConfigError::EmptyGrid);
        }
        let (nrows, ncols) = dims(rows.len(), expected)?;
        let mut cells = Vec::with_capacity(rows.len() * expected);
        for (y, row) in rows.iter().enumerate() {
            if row.len() != expected {
                return Err(ConfigError::RaggedRow {
                    row: y,
                    expected,
                    found: row.len(),
                });
            }
            for (x, &glyph) in row.iter().enumerate() {
                let id = catalog
                    .by_glyph(glyph)
                    .ok_or(ConfigError::UnknownGlyph {
                        glyph,
                        pos: Point::new(x as i32, y as i32),
                    })?;
                cells.push(id);
            }
        }
        Ok(Self {
            cells,
            rows: nrows,
            cols: ncols,
        })
    }

    #[inline]
    pub fn rows(&self) -> i32 {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> i32 {
        self.cols
    }

    /// The bounding range of the grid (x spans columns, y spans rows).
    #[inline]
    pub fn bounds(&self) -> Range {
        Range::new(0, 0, self.cols, self.rows)
    }

    /// Number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        p.x >= 0 && p.y >= 0 && p.x < self.cols && p.y < self.rows
    }

    #[inline]
    fn index(&self, p: Point) -> usize {
        (p.y * self.cols + p.x) as usize
    }

    /// Terrain at `p`, or `None` if out of bounds.
    #[inline]
    pub fn at(&self, p: Point) -> Option<TerrainId> {
        if !self.contains(p) {
            return None;
        }
        Some(self.cells[self.index(p)])
    }

    /// Set the terrain at `p`. Does nothing if out of bounds.
    pub fn set(&mut self, p: Point, id: TerrainId) {
        if !self.contains(p) {
            return;
        }
        let i = self.index(p);
        self.cells[i] = id;
    }

    /// Set every in-bounds cell of `rng` to `id`.
    pub fn fill_range(&mut self, rng: Range, id: TerrainId) {
        for p in rng.iter() {
            self.set(p, id);
        }
    }

    /// Count the cells satisfying a predicate.
    pub fn count_fn(&self, mut f: impl FnMut(Point, TerrainId) -> bool) -> usize {
        self.iter().filter(|&(p, id)| f(p, id)).count()
    }

    /// Iterate over `(Point, TerrainId)` pairs in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Point, TerrainId)> + '_ {
        self.bounds().iter().zip(self.cells.iter().copied())
    }

    /// Check that every cell refers to a terrain of `catalog`.
    ///
    /// Grids built with [`from_labels`](Self::from_labels) or
    /// [`from_glyphs`](Self::from_glyphs) always pass; grids filled by hand
    /// with raw ids may not.
    pub fn check_catalog(&self, catalog: &TerrainCatalog) -> Result<(), ConfigError> {
        match self.iter().find(|&(_, id)| !catalog.contains(id)) {
            Some((pos, id)) => Err(ConfigError::UnknownTerrain {
                label: format!("#{}", id.0),
                pos,
            }),
            None => Ok(()),
        }
    }

    /// Check that a route endpoint is in bounds, passable and dry.
    pub fn validate_endpoint(
        &self,
        catalog: &TerrainCatalog,
        which: Endpoint,
        pos: Point,
    ) -> Result<(), ConfigError> {
        let Some(id) = self.at(pos) else {
            return Err(ConfigError::OutOfBounds {
                which,
                pos,
                rows: self.rows,
                cols: self.cols,
            });
        };
        if !catalog.contains(id) {
            return Err(ConfigError::UnknownTerrain {
                label: format!("#{}", id.0),
                pos,
            });
        }
        if !catalog.is_passable(id) {
            return Err(ConfigError::ImpassableEndpoint {
                which,
                pos,
                terrain: catalog.spec(id).name.clone(),
            });
        }
        if catalog.is_water(id) {
            return Err(ConfigError::WaterEndpoint { which, pos });
        }
        Ok(())
    }

    /// Validate both endpoints of a route.
    pub fn validate_endpoints(
        &self,
        catalog: &TerrainCatalog,
        start: Point,
        goal: Point,
    ) -> Result<(), ConfigError> {
        self.validate_endpoint(catalog, Endpoint::Start, start)?;
        self.validate_endpoint(catalog, Endpoint::Goal, goal)
    }

    /// Render the grid back to glyph text.
    pub fn to_glyphs(&self, catalog: &TerrainCatalog) -> String {
        let mut out = String::with_capacity(self.cells.len() + self.rows as usize);
        for (y, row) in self.cells.chunks(self.cols as usize).enumerate() {
            if y > 0 {
                out.push('\n');
            }
            out.extend(row.iter().map(|&id| {
                if catalog.contains(id) {
                    catalog.spec(id).glyph
                } else {
                    '?'
                }
            }));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terrain::{GRASS, NORMAL, ROAD, WATER};

    #[test]
    fn filled_and_set() {
        let mut g = TerrainGrid::filled(3, 4, NORMAL).unwrap();
        assert_eq!(g.rows(), 3);
        assert_eq!(g.cols(), 4);
        assert_eq!(g.len(), 12);
        g.set(Point::at(2, 3), WATER);
        assert_eq!(g.at(Point::at(2, 3)), Some(WATER));
        assert_eq!(g.at(Point::at(3, 0)), None);
        // Out-of-bounds writes are ignored.
        g.set(Point::new(-1, 0), WATER);
        assert_eq!(g.count_fn(|_, id| id == WATER), 1);
    }

    #[test]
    fn filled_rejects_empty() {
        assert_eq!(TerrainGrid::filled(0, 3, NORMAL), Err(ConfigError::EmptyGrid));
    }

    #[test]
    fn oversized_grids_are_config_errors() {
        assert_eq!(
            TerrainGrid::filled(50_000, 50_000, NORMAL),
            Err(ConfigError::GridTooLarge {
                rows: 50_000,
                cols: 50_000,
            })
        );
        assert_eq!(
            dims(usize::MAX, 1),
            Err(ConfigError::GridTooLarge {
                rows: usize::MAX,
                cols: 1,
            })
        );
        assert!(dims(1 << 16, 1 << 16).is_err());
        assert_eq!(dims(3, 4), Ok((3, 4)));
    }

    #[test]
    fn fill_range_clips() {
        let mut g = TerrainGrid::filled(3, 3, NORMAL).unwrap();
        g.fill_range(Range::new(1, 1, 10, 10), ROAD);
        assert_eq!(g.count_fn(|_, id| id == ROAD), 4);
        assert_eq!(g.at(Point::at(0, 0)), Some(NORMAL));
    }

    #[test]
    fn from_labels_parses() {
        let cat = TerrainCatalog::default();
        let g = TerrainGrid::from_labels(
            &cat,
            &[["grass", "water"], ["road", "grass"]],
        )
        .unwrap();
        assert_eq!(g.at(Point::at(0, 1)), Some(WATER));
        assert_eq!(g.at(Point::at(1, 0)), Some(ROAD));
        assert_eq!(g.at(Point::at(1, 1)), Some(GRASS));
    }

    #[test]
    fn from_labels_rejects_unknown_label() {
        let cat = TerrainCatalog::default();
        let err = TerrainGrid::from_labels(&cat, &[vec!["grass", "lava"]]).unwrap_err();
        assert_eq!(
            err,
            ConfigError::UnknownTerrain {
                label: "lava".into(),
                pos: Point::at(0, 1),
            }
        );
    }

    #[test]
    fn from_labels_rejects_ragged_rows() {
        let cat = TerrainCatalog::default();
        let rows: Vec<Vec<&str>> = vec![vec!["grass", "grass"], vec!["grass"]];
        let err = TerrainGrid::from_labels(&cat, &rows).unwrap_err();
        assert_eq!(
            err,
            ConfigError::RaggedRow {
                row: 1,
                expected: 2,
                found: 1
            }
        );
        let empty: Vec<Vec<&str>> = Vec::new();
        assert_eq!(
            TerrainGrid::from_labels(&cat, &empty).unwrap_err(),
            ConfigError::EmptyGrid
        );
    }

    #[test]
    fn from_glyphs_strips_indentation() {
        let cat = TerrainCatalog::default();
        let g = TerrainGrid::from_glyphs(
            &cat,
            "
            ...
            .~.
            ==.
            ",
        )
        .unwrap();
        assert_eq!(g.rows(), 3);
        assert_eq!(g.cols(), 3);
        assert_eq!(g.at(Point::at(1, 1)), Some(WATER));
        assert_eq!(g.at(Point::at(2, 0)), Some(ROAD));
        assert_eq!(g.to_glyphs(&cat), "...\n.~.\n==.");
    }

    #[test]
    fn from_glyphs_rejects_unknown_glyph() {
        let cat = TerrainCatalog::default();
        let err = TerrainGrid::from_glyphs(&cat, "..\n.X").unwrap_err();
        assert_eq!(
            err,
            ConfigError::UnknownGlyph {
                glyph: 'X',
                pos: Point::at(1, 1),
            }
        );
        assert_eq!(
            TerrainGrid::from_glyphs(&cat, "\n  \n").unwrap_err(),
            ConfigError::EmptyGrid
        );
    }

    #[test]
    fn iter_is_row_major() {
        let cat = TerrainCatalog::default();
        let g = TerrainGrid::from_glyphs(&cat, ".~\n=.").unwrap();
        let items: Vec<_> = g.iter().collect();
        assert_eq!(items.len(), 4);
        assert_eq!(items[1], (Point::at(0, 1), WATER));
        assert_eq!(items[2], (Point::at(1, 0), ROAD));
    }

    #[test]
    fn endpoint_validation() {
        let cat = TerrainCatalog::default();
        let g = TerrainGrid::from_glyphs(&cat, "..\n.~").unwrap();
        assert!(g.validate_endpoints(&cat, Point::at(0, 0), Point::at(1, 0)).is_ok());
        assert_eq!(
            g.validate_endpoints(&cat, Point::at(0, 0), Point::at(1, 1)),
            Err(ConfigError::WaterEndpoint {
                which: Endpoint::Goal,
                pos: Point::at(1, 1)
            })
        );
        assert_eq!(
            g.validate_endpoints(&cat, Point::at(5, 0), Point::at(0, 0)),
            Err(ConfigError::OutOfBounds {
                which: Endpoint::Start,
                pos: Point::at(5, 0),
                rows: 2,
                cols: 2
            })
        );
    }

    #[test]
    fn impassable_endpoint_is_rejected() {
        let cat = TerrainCatalog::builder()
            .terrain(crate::terrain::TerrainSpec::new("floor", 1.0, '.'))
            .terrain(crate::terrain::TerrainSpec::new("wall", 1.0, '#').impassable())
            .build()
            .unwrap();
        let g = TerrainGrid::from_glyphs(&cat, ".#").unwrap();
        assert!(matches!(
            g.validate_endpoints(&cat, Point::at(0, 0), Point::at(0, 1)),
            Err(ConfigError::ImpassableEndpoint { which: Endpoint::Goal, .. })
        ));
    }

    #[test]
    fn check_catalog_flags_foreign_ids() {
        let cat = TerrainCatalog::default();
        let mut g = TerrainGrid::filled(2, 2, NORMAL).unwrap();
        assert!(g.check_catalog(&cat).is_ok());
        g.set(Point::at(1, 1), TerrainId(42));
        assert!(matches!(
            g.check_catalog(&cat),
            Err(ConfigError::UnknownTerrain { .. })
        ));
    }
}
