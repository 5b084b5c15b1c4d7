use grid_util::point::Point;
use log::info;

use crate::path_grid::PathGrid;
use crate::solver::{GridSolver, SearchContext};

/// Depth-first search driven by an explicit stack, marking cells visited as they are
/// popped. Finds some route, not necessarily a shortest one; the first neighbour whose
/// subtree reaches the end short-circuits the rest.
#[derive(Clone, Copy, Debug, Default)]
pub struct DfsSolver;

impl GridSolver for DfsSolver {
    fn find_path(&self, grid: &PathGrid, start: Point, end: Point) -> Option<Vec<Point>> {
        let mut context = SearchContext::new(grid.size());
        let mut stack = vec![start];
        while let Some(current) = stack.pop() {
            if context.visited(current) {
                continue;
            }
            context.visit(current);
            if current == end {
                return Some(context.reconstruct(start, end));
            }
            // Pushed in reverse so the first direction of the probe order is explored
            // first, matching the descent order of a recursive version. A cell can sit on
            // the stack more than once; the link in effect when it is first popped is the
            // one the route follows, and it always points at an earlier-visited cell.
            for neighbour in grid.open_neighbours(current).rev() {
                if !context.visited(neighbour) {
                    context.link(neighbour, current);
                    stack.push(neighbour);
                }
            }
        }
        info!("DFS exhausted its stack without reaching {}", end);
        None
    }
}
