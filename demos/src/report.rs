//! Side-by-side statistics for a Dijkstra/A* comparison.

use wayfarer_core::{TerrainCatalog, TerrainGrid};
use wayfarer_paths::{Comparison, SearchResult};

fn cost_cell(r: &SearchResult) -> String {
    if r.is_reachable() {
        format!("{:.2}", r.cost)
    } else {
        "unreachable".to_owned()
    }
}

fn steps_cell(r: &SearchResult) -> String {
    if r.is_reachable() {
        r.steps().to_string()
    } else {
        "N/A".to_owned()
    }
}

fn yes_no(b: bool) -> &'static str {
    if b { "yes" } else { "no" }
}

/// Render the comparison as a fixed-width table.
pub fn comparison_table(cmp: &Comparison, grid: &TerrainGrid, catalog: &TerrainCatalog) -> String {
    let (d, a) = (&cmp.dijkstra, &cmp.astar);
    let rows = [
        (
            "Visited nodes",
            d.visited.len().to_string(),
            a.visited.len().to_string(),
        ),
        ("Path length", steps_cell(d), steps_cell(a)),
        ("Total cost", cost_cell(d), cost_cell(a)),
        (
            "Water cells",
            d.water_cells(grid, catalog).to_string(),
            a.water_cells(grid, catalog).to_string(),
        ),
        ("Fallback", yes_no(d.fallback).to_owned(), yes_no(a.fallback).to_owned()),
    ];

    let mut lines = vec![
        format!("{:<16} {:<14} {:<14}", "Metric", d.algorithm, a.algorithm),
        "-".repeat(44),
    ];
    lines.extend(
        rows.into_iter()
            .map(|(name, dv, av)| format!("{name:<16} {dv:<14} {av:<14}")),
    );
    lines.push(String::new());
    lines.join("\n")
}
