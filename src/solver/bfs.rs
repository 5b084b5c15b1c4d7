use std::collections::VecDeque;

use grid_util::point::Point;
use log::info;

use crate::path_grid::PathGrid;
use crate::solver::{GridSolver, SearchContext};

/// Breadth-first search. Expands the frontier level by level through a FIFO queue, so the
/// first time the end is dequeued its parent chain is a minimum-step route.
#[derive(Clone, Copy, Debug, Default)]
pub struct BfsSolver;

impl GridSolver for BfsSolver {
    fn find_path(&self, grid: &PathGrid, start: Point, end: Point) -> Option<Vec<Point>> {
        let mut context = SearchContext::new(grid.size());
        let mut frontier = VecDeque::new();
        context.visit(start);
        frontier.push_back(start);
        while let Some(current) = frontier.pop_front() {
            if current == end {
                return Some(context.reconstruct(start, end));
            }
            for neighbour in grid.open_neighbours(current) {
                if !context.visited(neighbour) {
                    context.visit(neighbour);
                    context.link(neighbour, current);
                    frontier.push_back(neighbour);
                }
            }
        }
        info!("BFS exhausted its frontier without reaching {}", end);
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path_grid::GridConfig;

    #[test]
    fn shortest_route_on_an_open_board() {
        let config = GridConfig {
            size: 4,
            walls: Default::default(),
            start: Point::new(0, 0),
            end: Point::new(3, 2),
        };
        let grid = PathGrid::new(config).unwrap();
        let path = BfsSolver
            .find_path(&grid, grid.start(), grid.end())
            .unwrap();
        // Manhattan distance plus the starting cell.
        assert_eq!(path.len(), 6);
        assert_eq!(path[0], grid.start());
        assert_eq!(*path.last().unwrap(), grid.end());
    }

    #[test]
    fn exhausted_frontier_reports_no_route() {
        let config = GridConfig {
            size: 3,
            walls: [Point::new(0, 1), Point::new(1, 0), Point::new(1, 1)]
                .into_iter()
                .collect(),
            start: Point::new(0, 0),
            end: Point::new(2, 2),
        };
        let grid = PathGrid::new(config).unwrap();
        assert!(BfsSolver.find_path(&grid, grid.start(), grid.end()).is_none());
    }
}
