use std::collections::BinaryHeap;

use wayfarer_core::Point;

use crate::PathRange;
use crate::error::SearchError;
use crate::pathrange::{NodeRef, checked_cost, reconstruct};
use crate::result::{Algorithm, SearchResult};
use crate::traits::AstarPather;

impl PathRange {
    /// Compute the cheapest path from `from` to `to` using A*.
    ///
    /// The frontier is ordered by `g + h`; on equal keys the node with the
    /// smaller estimate wins, then the one discovered first. With an
    /// admissible and consistent estimate the returned cost equals
    /// Dijkstra's. Results have the same shape as
    /// [`dijkstra_path`](Self::dijkstra_path).
    pub fn astar_path<P: AstarPather>(
        &mut self,
        pather: &P,
        from: Point,
        to: Point,
    ) -> Result<SearchResult, SearchError> {
        let (Some(start_idx), Some(goal_idx)) = (self.idx(from), self.idx(to)) else {
            return Ok(SearchResult::unreachable(Algorithm::AStar, Vec::new()));
        };

        // Bump generation to lazily invalidate all nodes.
        self.astar_generation = self.astar_generation.wrapping_add(1);
        let cur_gen = self.astar_generation;

        let start_h = pather.estimate(from, to);
        {
            let node = &mut self.astar_nodes[start_idx];
            node.g = 0.0;
            node.h = start_h;
            node.parent = usize::MAX;
            node.generation = cur_gen;
            node.open = true;
        }

        let mut open: BinaryHeap<NodeRef> = BinaryHeap::new();
        let mut seq: u64 = 0;
        open.push(NodeRef {
            idx: start_idx,
            f: start_h,
            h: start_h,
            seq,
        });

        let mut visited = Vec::new();
        let mut nbuf = std::mem::take(&mut self.nbuf);

        let found = 'search: loop {
            let Some(current) = open.pop() else {
                break 'search Ok(false);
            };

            let ci = current.idx;

            // Skip stale entries.
            if self.astar_nodes[ci].generation != cur_gen || !self.astar_nodes[ci].open {
                continue;
            }

            self.astar_nodes[ci].open = false;
            let current_g = self.astar_nodes[ci].g;
            let current_point = self.point(ci);
            visited.push(current_point);
            log::trace!("astar: finalize {current_point} at g={current_g} f={}", current.f);

            if ci == goal_idx {
                break 'search Ok(true);
            }

            nbuf.clear();
            pather.neighbors(current_point, &mut nbuf);

            for &np in nbuf.iter() {
                let Some(ni) = self.idx(np) else {
                    continue;
                };
                let step = match checked_cost(current_point, np, pather.cost(current_point, np)) {
                    Ok(c) => c,
                    Err(e) => break 'search Err(e),
                };
                let tentative_g = current_g + step;

                let n = &mut self.astar_nodes[ni];
                if n.generation == cur_gen {
                    if !n.open || tentative_g >= n.g {
                        continue;
                    }
                } else {
                    n.generation = cur_gen;
                    n.h = pather.estimate(np, to);
                }

                n.g = tentative_g;
                n.parent = ci;
                n.open = true;
                seq += 1;

                open.push(NodeRef {
                    idx: ni,
                    f: tentative_g + n.h,
                    h: n.h,
                    seq,
                });
            }
        };

        self.nbuf = nbuf;

        if !found? {
            return Ok(SearchResult::unreachable(Algorithm::AStar, visited));
        }

        Ok(SearchResult {
            algorithm: Algorithm::AStar,
            path: reconstruct(self, &self.astar_nodes, goal_idx),
            cost: self.astar_nodes[goal_idx].g,
            visited,
            fallback: false,
        })
    }
}
