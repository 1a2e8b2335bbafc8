use wayfarer_core::Point;

/// Minimal pathfinding interface: provides neighbor enumeration.
pub trait Pather {
    /// Append neighbors of `p` into `buf`, in a fixed order. The caller
    /// clears `buf` before calling.
    fn neighbors(&self, p: Point, buf: &mut Vec<Point>);
}

/// Pather with weighted edges.
pub trait WeightedPather: Pather {
    /// Cost of moving from `from` to adjacent `to`. Must be finite and
    /// non-negative; the search engines reject anything else.
    fn cost(&self, from: Point, to: Point) -> f64;
}

/// Full A* pather with an admissible heuristic.
pub trait AstarPather: WeightedPather {
    /// Heuristic estimate of the cost from `from` to `to`.
    /// Must never overestimate the true cost (admissible).
    fn estimate(&self, from: Point, to: Point) -> f64;
}
