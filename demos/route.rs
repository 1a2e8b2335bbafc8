//! Compare Dijkstra and A* on a terrain map in the terminal.
//!
//! Run: cargo run --bin route -- --help

use std::error::Error;
use std::io;
use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use wayfarer_core::{Point, TerrainCatalog};
use wayfarer_demos::{
    MANUAL_GOAL, MANUAL_START, View, comparison_table, manual_map, random_endpoints, random_map,
    retarget,
};
use wayfarer_paths::{Connectivity, RouteOptions, Router};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum MapKind {
    /// The fixed 15x15 test map
    Manual,
    /// Weighted random terrain
    Random,
}

#[derive(Parser, Debug)]
#[command(name = "route")]
#[command(about = "Find least-cost routes across terrain with Dijkstra and A*")]
struct Args {
    /// Map to route on
    #[arg(long, value_enum, default_value_t = MapKind::Manual)]
    map: MapKind,

    /// Random seed for reproducible maps and endpoints
    #[arg(long)]
    seed: Option<u64>,

    /// Random map width (picked between 10 and 20 when omitted)
    #[arg(long)]
    width: Option<i32>,

    /// Random map height (picked between 10 and 20 when omitted)
    #[arg(long)]
    height: Option<i32>,

    /// Start cell (format: ROW,COL)
    #[arg(long, value_parser = parse_point)]
    start: Option<Point>,

    /// Goal cell (format: ROW,COL)
    #[arg(long, value_parser = parse_point)]
    goal: Option<Point>,

    /// Cross water only when no dry route exists
    #[arg(long)]
    avoid_water: bool,

    /// Allow diagonal moves
    #[arg(long)]
    diagonal: bool,

    /// TOML terrain table replacing the default catalog
    #[arg(long)]
    terrain: Option<PathBuf>,

    /// Print without colours
    #[arg(long)]
    plain: bool,
}

fn parse_point(s: &str) -> Result<Point, String> {
    let (r, c) = s
        .split_once(',')
        .ok_or_else(|| format!("expected ROW,COL, got {s:?}"))?;
    let row = r.trim().parse::<i32>().map_err(|e| format!("bad row {r:?}: {e}"))?;
    let col = c.trim().parse::<i32>().map_err(|e| format!("bad column {c:?}: {e}"))?;
    Ok(Point::at(row, col))
}

fn show(view: &View<'_>, plain: bool) -> io::Result<()> {
    if plain {
        println!("{}", view.to_text());
        Ok(())
    } else {
        view.write_to(&mut io::stdout().lock())
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let seed = args.seed.unwrap_or_else(rand::random);
    let mut rng = StdRng::seed_from_u64(seed);

    let defaults = TerrainCatalog::default();
    let (grid, title) = match args.map {
        MapKind::Manual => (manual_map()?, "Manual map".to_owned()),
        MapKind::Random => {
            let cols = args.width.unwrap_or_else(|| rng.random_range(10..=20));
            let rows = args.height.unwrap_or_else(|| rng.random_range(10..=20));
            let grid = random_map(&mut rng, rows, cols)?;
            (grid, format!("Random map {rows}x{cols} (seed {seed})"))
        }
    };

    let (catalog, grid) = match &args.terrain {
        Some(path) => {
            let catalog = TerrainCatalog::from_toml_str(&std::fs::read_to_string(path)?)?;
            let grid = retarget(&grid, &defaults, &catalog)?;
            (catalog, grid)
        }
        None => (defaults, grid),
    };

    let (start, goal) = match (args.map, args.start, args.goal) {
        (MapKind::Manual, s, g) => (s.unwrap_or(MANUAL_START), g.unwrap_or(MANUAL_GOAL)),
        (MapKind::Random, Some(s), Some(g)) => (s, g),
        (MapKind::Random, s, g) => {
            let (rs, rg) = random_endpoints(&mut rng, &grid, &catalog)
                .ok_or("no valid start and goal cells on this map")?;
            (s.unwrap_or(rs), g.unwrap_or(rg))
        }
    };

    let options = RouteOptions {
        connectivity: if args.diagonal {
            Connectivity::Eight
        } else {
            Connectivity::Four
        },
        avoid_water: args.avoid_water,
    };
    let mut router = Router::new(&grid, &catalog, options)?;
    let cmp = router.compare(start, goal)?;

    let mut view = View {
        grid: &grid,
        catalog: &catalog,
        start,
        goal,
        result: None,
    };
    println!("{title}: {start} -> {goal}");
    show(&view, args.plain)?;
    for (_, spec) in catalog.iter() {
        println!("  {}  {:<10} cost {:.1}", spec.glyph, spec.name, spec.cost);
    }

    for r in [&cmp.dijkstra, &cmp.astar] {
        println!();
        println!("{} - visited nodes: {}", r.algorithm, r.visited.len());
        view.result = Some(r);
        show(&view, args.plain)?;
    }

    println!();
    print!("{}", comparison_table(&cmp, &grid, &catalog));
    Ok(())
}
