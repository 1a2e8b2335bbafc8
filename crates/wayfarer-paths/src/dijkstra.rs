use std::collections::BinaryHeap;

use wayfarer_core::Point;

use crate::PathRange;
use crate::error::SearchError;
use crate::pathrange::{NodeRef, checked_cost, reconstruct};
use crate::result::{Algorithm, SearchResult};
use crate::traits::WeightedPather;

impl PathRange {
    /// Compute the cheapest path from `from` to `to` with Dijkstra's
    /// algorithm.
    ///
    /// The frontier is ordered by cost-to-reach only; ties go to the node
    /// discovered first, so the pather's neighbor order decides between
    /// equal-cost routes. The returned `visited` list holds every finalized
    /// cell in pop order, the goal included. An unreachable or out-of-range
    /// goal yields an empty path with infinite cost.
    pub fn dijkstra_path<P: WeightedPather>(
        &mut self,
        pather: &P,
        from: Point,
        to: Point,
    ) -> Result<SearchResult, SearchError> {
        let (Some(start_idx), Some(goal_idx)) = (self.idx(from), self.idx(to)) else {
            return Ok(SearchResult::unreachable(Algorithm::Dijkstra, Vec::new()));
        };

        self.dijkstra_generation = self.dijkstra_generation.wrapping_add(1);
        let cur_gen = self.dijkstra_generation;

        {
            let n = &mut self.dijkstra_nodes[start_idx];
            n.g = 0.0;
            n.h = 0.0;
            n.parent = usize::MAX;
            n.generation = cur_gen;
            n.open = true;
        }

        let mut open: BinaryHeap<NodeRef> = BinaryHeap::new();
        let mut seq: u64 = 0;
        open.push(NodeRef {
            idx: start_idx,
            f: 0.0,
            h: 0.0,
            seq,
        });

        let mut visited = Vec::new();
        let mut nbuf = std::mem::take(&mut self.nbuf);

        let outcome = 'search: loop {
            let Some(current) = open.pop() else {
                break 'search Ok(false);
            };
            let ci = current.idx;

            // Skip stale entries.
            let cn = &self.dijkstra_nodes[ci];
            if cn.generation != cur_gen || !cn.open {
                continue;
            }
            let current_g = cn.g;
            self.dijkstra_nodes[ci].open = false;

            let cp = self.point(ci);
            visited.push(cp);
            log::trace!("dijkstra: finalize {cp} at g={current_g}");

            if ci == goal_idx {
                break 'search Ok(true);
            }

            nbuf.clear();
            pather.neighbors(cp, &mut nbuf);

            for &np in nbuf.iter() {
                let Some(ni) = self.idx(np) else {
                    continue;
                };
                let step = match checked_cost(cp, np, pather.cost(cp, np)) {
                    Ok(c) => c,
                    Err(e) => break 'search Err(e),
                };
                let tentative = current_g + step;

                let n = &mut self.dijkstra_nodes[ni];
                if n.generation == cur_gen {
                    // Finalized nodes keep their cost; frontier nodes only
                    // move on a strict improvement.
                    if !n.open || tentative >= n.g {
                        continue;
                    }
                } else {
                    n.generation = cur_gen;
                }

                n.g = tentative;
                n.h = 0.0;
                n.parent = ci;
                n.open = true;
                seq += 1;
                open.push(NodeRef {
                    idx: ni,
                    f: tentative,
                    h: 0.0,
                    seq,
                });
            }
        };

        self.nbuf = nbuf;

        if !outcome? {
            return Ok(SearchResult::unreachable(Algorithm::Dijkstra, visited));
        }

        Ok(SearchResult {
            algorithm: Algorithm::Dijkstra,
            path: reconstruct(self, &self.dijkstra_nodes, goal_idx),
            cost: self.dijkstra_nodes[goal_idx].g,
            visited,
            fallback: false,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::Pather;
    use wayfarer_core::Range;

    /// Open 4-connected grid with a per-cell entry cost.
    struct CostGrid {
        w: i32,
        h: i32,
        costs: Vec<f64>,
    }

    impl Pather for CostGrid {
        fn neighbors(&self, p: Point, buf: &mut Vec<Point>) {
            for n in [p.shift(0, -1), p.shift(1, 0), p.shift(0, 1), p.shift(-1, 0)] {
                if n.x >= 0 && n.y >= 0 && n.x < self.w && n.y < self.h {
                    buf.push(n);
                }
            }
        }
    }

    impl WeightedPather for CostGrid {
        fn cost(&self, _from: Point, to: Point) -> f64 {
            self.costs[(to.y * self.w + to.x) as usize]
        }
    }

    fn uniform(w: i32, h: i32) -> CostGrid {
        CostGrid {
            w,
            h,
            costs: vec![1.0; (w * h) as usize],
        }
    }

    #[test]
    fn straight_line() {
        let g = uniform(5, 1);
        let mut pr = PathRange::new(Range::new(0, 0, 5, 1));
        let r = pr.dijkstra_path(&g, Point::new(0, 0), Point::new(4, 0)).unwrap();
        assert_eq!(r.path.len(), 5);
        assert_eq!(r.cost, 4.0);
        assert_eq!(r.visited.len(), 5);
        assert_eq!(r.visited.last(), Some(&Point::new(4, 0)));
    }

    #[test]
    fn same_start_and_goal() {
        let g = uniform(3, 3);
        let mut pr = PathRange::new(Range::new(0, 0, 3, 3));
        let r = pr.dijkstra_path(&g, Point::new(1, 1), Point::new(1, 1)).unwrap();
        assert_eq!(r.path, vec![Point::new(1, 1)]);
        assert_eq!(r.cost, 0.0);
        assert_eq!(r.visited, vec![Point::new(1, 1)]);
    }

    #[test]
    fn goes_around_expensive_cell() {
        let mut g = uniform(3, 3);
        g.costs[4] = 10.0; // centre
        let mut pr = PathRange::new(Range::new(0, 0, 3, 3));
        let r = pr.dijkstra_path(&g, Point::new(1, 0), Point::new(1, 2)).unwrap();
        assert_eq!(r.cost, 4.0);
        assert!(!r.path.contains(&Point::new(1, 1)));
    }

    #[test]
    fn ties_follow_neighbor_order() {
        // Right is enumerated before down, so the path hugs the top row.
        let g = uniform(2, 2);
        let mut pr = PathRange::new(Range::new(0, 0, 2, 2));
        let r = pr.dijkstra_path(&g, Point::new(0, 0), Point::new(1, 1)).unwrap();
        assert_eq!(
            r.path,
            vec![Point::new(0, 0), Point::new(1, 0), Point::new(1, 1)]
        );
    }

    #[test]
    fn out_of_range_goal_is_unreachable() {
        let g = uniform(3, 3);
        let mut pr = PathRange::new(Range::new(0, 0, 3, 3));
        let r = pr.dijkstra_path(&g, Point::new(0, 0), Point::new(9, 9)).unwrap();
        assert!(!r.is_reachable());
        assert!(r.cost.is_infinite());
    }

    #[test]
    fn negative_edge_is_rejected() {
        let mut g = uniform(3, 1);
        g.costs[1] = -2.0;
        let mut pr = PathRange::new(Range::new(0, 0, 3, 1));
        let err = pr.dijkstra_path(&g, Point::new(0, 0), Point::new(2, 0)).unwrap_err();
        assert_eq!(
            err,
            SearchError::InvalidEdgeCost {
                from: Point::new(0, 0),
                to: Point::new(1, 0),
                cost: -2.0,
            }
        );
        // The range stays usable afterwards.
        g.costs[1] = 1.0;
        assert!(pr.dijkstra_path(&g, Point::new(0, 0), Point::new(2, 0)).unwrap().is_reachable());
    }

    #[test]
    fn visited_has_no_duplicates() {
        let mut g = uniform(6, 6);
        for (i, c) in g.costs.iter_mut().enumerate() {
            *c = 1.0 + (i % 7) as f64 * 0.3;
        }
        let mut pr = PathRange::new(Range::new(0, 0, 6, 6));
        let r = pr.dijkstra_path(&g, Point::new(0, 0), Point::new(5, 5)).unwrap();
        let mut seen = r.visited.clone();
        seen.sort();
        seen.dedup();
        assert_eq!(seen.len(), r.visited.len());
    }
}
