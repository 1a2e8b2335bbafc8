//! Text rendering of a grid with a search result laid over it.

use std::io::{self, Write};

use crossterm::queue;
use crossterm::style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor};
use wayfarer_core::{Point, TerrainCatalog, TerrainGrid, TerrainId};
use wayfarer_paths::SearchResult;

const COL_START: Color = Color::Rgb { r: 80, g: 230, b: 80 };
const COL_GOAL: Color = Color::Rgb { r: 230, g: 60, b: 60 };
const COL_PATH: Color = Color::Rgb { r: 255, g: 80, b: 80 };
const COL_VISITED: Color = Color::Rgb { r: 90, g: 85, b: 30 };

/// What a cell shows on top of its terrain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mark {
    Terrain,
    Visited,
    Path,
    Start,
    Goal,
}

impl Mark {
    fn glyph(self, terrain: char) -> char {
        match self {
            Self::Terrain | Self::Visited => terrain,
            Self::Path => '*',
            Self::Start => 'S',
            Self::Goal => 'G',
        }
    }
}

/// A map together with the route endpoints and an optional result.
#[derive(Debug, Clone, Copy)]
pub struct View<'a> {
    pub grid: &'a TerrainGrid,
    pub catalog: &'a TerrainCatalog,
    pub start: Point,
    pub goal: Point,
    pub result: Option<&'a SearchResult>,
}

impl View<'_> {
    /// Per-cell marks in row-major order. Endpoints win over the path, and
    /// the path over visited cells.
    pub fn marks(&self) -> Vec<Mark> {
        let bounds = self.grid.bounds();
        let mut marks = vec![Mark::Terrain; self.grid.len()];
        let mut put = |p: Point, m: Mark| {
            if bounds.contains(p) {
                marks[(p.row() * self.grid.cols() + p.col()) as usize] = m;
            }
        };
        if let Some(r) = self.result {
            r.visited.iter().for_each(|&p| put(p, Mark::Visited));
            r.path.iter().for_each(|&p| put(p, Mark::Path));
        }
        put(self.start, Mark::Start);
        put(self.goal, Mark::Goal);
        marks
    }

    fn glyph(&self, id: TerrainId) -> char {
        if self.catalog.contains(id) {
            self.catalog.spec(id).glyph
        } else {
            '?'
        }
    }

    /// Uncoloured rendering, one line per row.
    pub fn to_text(&self) -> String {
        let marks = self.marks();
        let mut out = String::with_capacity(marks.len() + self.grid.rows() as usize);
        for ((p, id), m) in self.grid.iter().zip(&marks) {
            if p.col() == 0 && p.row() > 0 {
                out.push('\n');
            }
            out.push(m.glyph(self.glyph(id)));
        }
        out
    }

    /// Coloured rendering with crossterm escape sequences.
    pub fn write_to<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let marks = self.marks();
        for ((p, id), m) in self.grid.iter().zip(&marks) {
            if p.col() == 0 && p.row() > 0 {
                queue!(out, ResetColor, Print('\n'))?;
            }
            let (fg, bg) = match m {
                Mark::Terrain => (terrain_color(self.catalog, id), Color::Reset),
                Mark::Visited => (terrain_color(self.catalog, id), COL_VISITED),
                Mark::Path => (COL_PATH, Color::Reset),
                Mark::Start => (Color::Black, COL_START),
                Mark::Goal => (Color::Black, COL_GOAL),
            };
            queue!(
                out,
                SetForegroundColor(fg),
                SetBackgroundColor(bg),
                Print(m.glyph(self.glyph(id)))
            )?;
        }
        queue!(out, ResetColor, Print('\n'))?;
        out.flush()
    }
}

/// Display colour of a terrain, chosen by name.
pub fn terrain_color(catalog: &TerrainCatalog, id: TerrainId) -> Color {
    if !catalog.contains(id) {
        return Color::Reset;
    }
    let spec = catalog.spec(id);
    match spec.name.as_str() {
        "normal" => Color::Rgb { r: 40, g: 160, b: 60 },
        "grass" => Color::Rgb { r: 140, g: 220, b: 120 },
        "sand" => Color::Rgb { r: 240, g: 170, b: 100 },
        "mountain" => Color::Rgb { r: 150, g: 150, b: 150 },
        "road" => Color::Rgb { r: 110, g: 110, b: 110 },
        _ if spec.water => Color::Rgb { r: 60, g: 110, b: 230 },
        _ if !spec.passable => Color::DarkGrey,
        _ => Color::White,
    }
}
