use std::cmp::Ordering;

use wayfarer_core::{Point, Range};

use crate::error::SearchError;

// ---------------------------------------------------------------------------
// Internal node for A*/Dijkstra priority-queue searches
// ---------------------------------------------------------------------------

/// Per-cell search state. A node whose `generation` differs from the
/// current run is Unvisited; `open` distinguishes Frontier from Finalized.
#[derive(Clone)]
pub(crate) struct Node {
    pub(crate) g: f64,
    pub(crate) h: f64,
    pub(crate) parent: usize,
    pub(crate) generation: u32,
    pub(crate) open: bool,
}

impl Default for Node {
    fn default() -> Self {
        Self {
            g: f64::INFINITY,
            h: 0.0,
            parent: usize::MAX,
            generation: 0,
            open: false,
        }
    }
}

/// Frontier entry, ordered so that `BinaryHeap` (a max-heap) pops the
/// lowest `f` first, then the lowest `h`, then the earliest insertion.
///
/// Re-keying a node pushes a fresh entry with the lower key. The stale
/// entry pops later and is skipped because the node is no longer open.
#[derive(Clone, Copy)]
pub(crate) struct NodeRef {
    pub(crate) idx: usize,
    pub(crate) f: f64,
    pub(crate) h: f64,
    pub(crate) seq: u64,
}

impl Ord for NodeRef {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .f
            .total_cmp(&self.f)
            .then_with(|| other.h.total_cmp(&self.h))
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for NodeRef {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for NodeRef {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for NodeRef {}

/// Reject edge costs that would corrupt the frontier order.
#[inline]
pub(crate) fn checked_cost(from: Point, to: Point, cost: f64) -> Result<f64, SearchError> {
    if cost.is_finite() && cost >= 0.0 {
        Ok(cost)
    } else {
        Err(SearchError::InvalidEdgeCost { from, to, cost })
    }
}

// ---------------------------------------------------------------------------
// PathRange
// ---------------------------------------------------------------------------

/// Owner of the search caches for one grid rectangle.
///
/// Dijkstra and A* each keep their own node table, so a run of one never
/// observes state left by the other. Tables are invalidated lazily by
/// bumping a generation counter, so repeated queries allocate nothing after
/// the first.
pub struct PathRange {
    pub(crate) rng: Range,
    pub(crate) width: usize,
    pub(crate) astar_nodes: Vec<Node>,
    pub(crate) astar_generation: u32,
    pub(crate) dijkstra_nodes: Vec<Node>,
    pub(crate) dijkstra_generation: u32,
    // shared scratch buffer for neighbor queries
    pub(crate) nbuf: Vec<Point>,
}

impl PathRange {
    /// Create a new `PathRange` for the given grid rectangle.
    pub fn new(rng: Range) -> Self {
        let w = rng.width().max(0) as usize;
        let len = rng.len();
        Self {
            rng,
            width: w,
            astar_nodes: vec![Node::default(); len],
            astar_generation: 0,
            dijkstra_nodes: vec![Node::default(); len],
            dijkstra_generation: 0,
            nbuf: Vec::with_capacity(8),
        }
    }

    // -----------------------------------------------------------------------
    // Coordinate helpers
    // -----------------------------------------------------------------------

    /// Convert a `Point` to a flat index. Returns `None` if out of range.
    #[inline]
    pub(crate) fn idx(&self, p: Point) -> Option<usize> {
        if !self.rng.contains(p) {
            return None;
        }
        let x = (p.x - self.rng.min.x) as usize;
        let y = (p.y - self.rng.min.y) as usize;
        Some(y * self.width + x)
    }

    /// Convert a flat index back to a `Point`.
    #[inline]
    pub(crate) fn point(&self, idx: usize) -> Point {
        let x = (idx % self.width) as i32 + self.rng.min.x;
        let y = (idx / self.width) as i32 + self.rng.min.y;
        Point::new(x, y)
    }
}

/// Walk parent links from `goal` back to the root and return the path in
/// start-to-goal order.
pub(crate) fn reconstruct(range: &PathRange, nodes: &[Node], goal: usize) -> Vec<Point> {
    let mut path = Vec::new();
    let mut ci = goal;
    while ci != usize::MAX {
        path.push(range.point(ci));
        ci = nodes[ci].parent;
    }
    path.reverse();
    path
}
