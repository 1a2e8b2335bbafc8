use std::f64::consts::SQRT_2;

use wayfarer_core::Point;

/// Manhattan (L1) distance between two points.
#[inline]
pub fn manhattan(a: Point, b: Point) -> f64 {
    f64::from((a.x - b.x).abs() + (a.y - b.y).abs())
}

/// Octile distance: the length of the shortest 8-connected path on an empty
/// grid where a diagonal step costs sqrt(2).
#[inline]
pub fn octile(a: Point, b: Point) -> f64 {
    let dx = (a.x - b.x).abs();
    let dy = (a.y - b.y).abs();
    let (lo, hi) = if dx < dy { (dx, dy) } else { (dy, dx) };
    f64::from(hi - lo) + SQRT_2 * f64::from(lo)
}
