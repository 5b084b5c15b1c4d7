//! Search strategies over a [PathGrid] together with the shared visitation bookkeeping
//! and the backward walk that turns a parent tree into a route.

use grid_util::grid::{BoolGrid, Grid, SimpleGrid};
use grid_util::point::Point;

use crate::path_grid::PathGrid;

pub mod bfs;
pub mod dfs;

/// A search strategy over a [PathGrid]. Implementations only explore; writing the route
/// back onto the grid is done by [PathGrid::solve].
pub trait GridSolver {
    /// Searches for a route from `start` to `end`, moving through the four axis-aligned
    /// neighbours of each cell and never entering a wall. Returns the route cells from
    /// start to end inclusive, or [None] when the search is exhausted without reaching
    /// `end`.
    fn find_path(&self, grid: &PathGrid, start: Point, end: Point) -> Option<Vec<Point>>;
}

/// Transient per-search state: which cells have been discovered and which neighbour first
/// reached them. Scoped to a single [GridSolver::find_path] call, never stored in the
/// grid itself.
pub(crate) struct SearchContext {
    visited: BoolGrid,
    parents: SimpleGrid<Point>,
}

impl SearchContext {
    pub(crate) fn new(size: usize) -> SearchContext {
        SearchContext {
            visited: BoolGrid::new(size, size, false),
            parents: SimpleGrid::new(size, size, Point::new(-1, -1)),
        }
    }

    pub(crate) fn visited(&self, p: Point) -> bool {
        self.visited.get_point(p)
    }

    pub(crate) fn visit(&mut self, p: Point) {
        self.visited.set_point(p, true);
    }

    /// Records the neighbour `p` was reached from.
    pub(crate) fn link(&mut self, p: Point, parent: Point) {
        self.parents.set_point(p, parent);
    }

    /// Backward walk from `end` to `start` along the recorded parent links, reversed into
    /// a start-to-end route. The chain terminates because every link points at a cell
    /// visited earlier in the same search.
    pub(crate) fn reconstruct(&self, start: Point, end: Point) -> Vec<Point> {
        let mut path: Vec<Point> = itertools::unfold(end, |p| {
            if *p == start {
                None
            } else {
                let cell = *p;
                *p = self.parents.get_point(cell);
                Some(cell)
            }
        })
        .collect();
        path.push(start);
        path.reverse();
        path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reconstruct_walks_parent_links_back_to_start() {
        let mut context = SearchContext::new(3);
        let corridor = [
            Point::new(0, 0),
            Point::new(0, 1),
            Point::new(1, 1),
            Point::new(2, 1),
        ];
        context.visit(corridor[0]);
        for pair in corridor.windows(2) {
            context.visit(pair[1]);
            context.link(pair[1], pair[0]);
        }
        let path = context.reconstruct(corridor[0], corridor[3]);
        assert_eq!(path, corridor.to_vec());
    }

    #[test]
    fn reconstruct_of_start_is_a_single_cell() {
        let context = SearchContext::new(2);
        let start = Point::new(0, 0);
        assert_eq!(context.reconstruct(start, start), vec![start]);
    }
}
