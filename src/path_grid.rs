use core::fmt;

use fxhash::FxHashSet;
use grid_util::grid::{Grid, SimpleGrid};
use grid_util::point::Point;
use log::{info, warn};
use petgraph::unionfind::UnionFind;

use crate::solver::bfs::BfsSolver;
use crate::solver::dfs::DfsSolver;
use crate::solver::GridSolver;

/// Classification of a single grid cell. Exactly one cell holds [Cell::Start] and exactly
/// one holds [Cell::End]; every other cell is open, walled or marked as part of a solved
/// route.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Cell {
    #[default]
    Empty,
    Wall,
    Start,
    End,
    Path,
}

impl Cell {
    /// Searches may pass through anything that is not a wall.
    pub fn walkable(self) -> bool {
        self != Cell::Wall
    }
}

/// Side length of the sample board.
pub const DEFAULT_GRID_SIZE: usize = 29;

/// Probe order shared by both searches. Ties between equal-length routes are broken by
/// this enumeration order, not by any distance metric.
const DIRECTIONS: [(i32, i32); 4] = [(0, 1), (0, -1), (1, 0), (-1, 0)];

/// Initial layout of a [PathGrid]: square size, pre-placed walls and marker positions.
///
/// The default value reproduces the sample board of the visualizer: a 29x29 grid with a
/// short wall segment as obstacle and the markers in opposite corners.
#[derive(Clone, Debug)]
pub struct GridConfig {
    pub size: usize,
    pub walls: FxHashSet<Point>,
    pub start: Point,
    pub end: Point,
}

impl Default for GridConfig {
    fn default() -> GridConfig {
        let walls = [(6, 4), (6, 5), (6, 6), (6, 7), (6, 8), (3, 3)]
            .into_iter()
            .map(|(x, y)| Point::new(x, y))
            .collect();
        let corner = DEFAULT_GRID_SIZE as i32 - 1;
        GridConfig {
            size: DEFAULT_GRID_SIZE,
            walls,
            start: Point::new(0, 0),
            end: Point::new(corner, corner),
        }
    }
}

/// Rejected grid mutations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GridError {
    /// Coordinate lies outside the square `[0, size)` range.
    OutOfBounds { point: Point, size: usize },
    /// Destination of a marker move holds a wall or the other marker.
    Occupied { point: Point, cell: Cell },
    /// Start and end markers would share a cell.
    MarkersCoincide(Point),
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            GridError::OutOfBounds { point, size } => {
                write!(f, "{} is outside the {}x{} grid", point, size, size)
            }
            GridError::Occupied { point, cell } => {
                write!(f, "{} already holds {:?}", point, cell)
            }
            GridError::MarkersCoincide(point) => {
                write!(f, "start and end markers would both sit at {}", point)
            }
        }
    }
}

impl std::error::Error for GridError {}

/// [PathGrid] owns the square matrix of [Cell] classifications together with the current
/// marker coordinates. Connected components of walkable cells are maintained in a
/// [UnionFind] structure so that solving towards an unreachable end bails out without
/// flooding the grid.
#[derive(Clone, Debug)]
pub struct PathGrid {
    cells: SimpleGrid<Cell>,
    start: Point,
    end: Point,
    components: UnionFind<usize>,
    components_dirty: bool,
}

impl Default for PathGrid {
    fn default() -> PathGrid {
        PathGrid::new(GridConfig::default()).unwrap()
    }
}

impl PathGrid {
    /// Builds a grid from `config`, placing its walls and then its markers. A wall listed
    /// on a marker coordinate is skipped; the marker wins. Out-of-range coordinates and
    /// coinciding markers are rejected.
    pub fn new(config: GridConfig) -> Result<PathGrid, GridError> {
        if config.start == config.end {
            return Err(GridError::MarkersCoincide(config.start));
        }
        let size = config.size;
        let mut grid = PathGrid {
            cells: SimpleGrid::new(size, size, Cell::Empty),
            start: config.start,
            end: config.end,
            components: UnionFind::new(size * size),
            components_dirty: false,
        };
        for marker in [config.start, config.end] {
            if !grid.in_bounds(marker.x, marker.y) {
                return Err(GridError::OutOfBounds { point: marker, size });
            }
        }
        for &wall in &config.walls {
            if !grid.in_bounds(wall.x, wall.y) {
                return Err(GridError::OutOfBounds { point: wall, size });
            }
            if wall == config.start || wall == config.end {
                continue;
            }
            grid.cells.set_point(wall, Cell::Wall);
        }
        grid.cells.set_point(config.start, Cell::Start);
        grid.cells.set_point(config.end, Cell::End);
        grid.generate_components();
        Ok(grid)
    }

    /// The sample board with the markers moved to the given positions.
    pub fn with_markers(start: Point, end: Point) -> Result<PathGrid, GridError> {
        PathGrid::new(GridConfig {
            start,
            end,
            ..GridConfig::default()
        })
    }

    /// Side length of the square matrix.
    pub fn size(&self) -> usize {
        self.cells.width()
    }

    /// The full matrix of classifications, for a renderer to draw.
    pub fn cells(&self) -> &SimpleGrid<Cell> {
        &self.cells
    }

    /// Classification of the cell at `(x, y)`.
    pub fn cell(&self, x: usize, y: usize) -> Cell {
        self.cells.get(x, y)
    }

    pub fn start(&self) -> Point {
        self.start
    }

    pub fn end(&self) -> Point {
        self.end
    }

    fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && self.cells.index_in_bounds(x as usize, y as usize)
    }

    fn checked(&self, x: i32, y: i32) -> Result<Point, GridError> {
        if self.in_bounds(x, y) {
            Ok(Point::new(x, y))
        } else {
            Err(GridError::OutOfBounds {
                point: Point::new(x, y),
                size: self.size(),
            })
        }
    }

    /// A search may move to `pos` if it is on the grid and not walled.
    pub fn can_move_to(&self, pos: Point) -> bool {
        self.in_bounds(pos.x, pos.y) && self.cells.get_point(pos).walkable()
    }

    /// The walkable axis-aligned neighbours of `pos`, in the fixed probe order.
    pub fn open_neighbours(&self, pos: Point) -> impl DoubleEndedIterator<Item = Point> + '_ {
        DIRECTIONS
            .iter()
            .map(move |&(dx, dy)| Point::new(pos.x + dx, pos.y + dy))
            .filter(|p| self.can_move_to(*p))
    }

    /// Places or removes a wall at `(x, y)`. Marker cells are left untouched; removal only
    /// clears cells that actually hold a wall. Joins newly connected components on removal
    /// and flags the components as dirty when a wall (potentially) breaks one apart.
    pub fn set_wall(&mut self, x: i32, y: i32, present: bool) -> Result<(), GridError> {
        let p = self.checked(x, y)?;
        if p == self.start || p == self.end {
            return Ok(());
        }
        if present {
            if self.cells.get_point(p).walkable() {
                self.cells.set_point(p, Cell::Wall);
                self.components_dirty = true;
            }
        } else if self.cells.get_point(p) == Cell::Wall {
            self.cells.set_point(p, Cell::Empty);
            let neighbours = self.open_neighbours(p).collect::<Vec<Point>>();
            for n in neighbours {
                self.components.union(
                    self.cells.get_ix(p.x as usize, p.y as usize),
                    self.cells.get_ix(n.x as usize, n.y as usize),
                );
            }
        }
        Ok(())
    }

    /// Relocates the start marker to `(x, y)`. The old cell reverts to empty; a destination
    /// holding a wall or the end marker is rejected, one holding a stale route cell is
    /// overwritten.
    pub fn move_start(&mut self, x: i32, y: i32) -> Result<(), GridError> {
        let dest = self.checked(x, y)?;
        if dest == self.end {
            return Err(GridError::Occupied {
                point: dest,
                cell: Cell::End,
            });
        }
        if self.cells.get_point(dest) == Cell::Wall {
            return Err(GridError::Occupied {
                point: dest,
                cell: Cell::Wall,
            });
        }
        if self.cells.get_point(self.start) == Cell::Start {
            self.cells.set_point(self.start, Cell::Empty);
        }
        self.start = dest;
        self.cells.set_point(dest, Cell::Start);
        Ok(())
    }

    /// Relocates the end marker to `(x, y)`. Same rules as [move_start](Self::move_start).
    pub fn move_end(&mut self, x: i32, y: i32) -> Result<(), GridError> {
        let dest = self.checked(x, y)?;
        if dest == self.start {
            return Err(GridError::Occupied {
                point: dest,
                cell: Cell::Start,
            });
        }
        if self.cells.get_point(dest) == Cell::Wall {
            return Err(GridError::Occupied {
                point: dest,
                cell: Cell::Wall,
            });
        }
        if self.cells.get_point(self.end) == Cell::End {
            self.cells.set_point(self.end, Cell::Empty);
        }
        self.end = dest;
        self.cells.set_point(dest, Cell::End);
        Ok(())
    }

    /// Reverts every route cell to empty and re-asserts the markers. Walls are untouched.
    pub fn reset_path(&mut self) {
        let n = self.size();
        for x in 0..n {
            for y in 0..n {
                if self.cells.get(x, y) == Cell::Path {
                    self.cells.set(x, y, Cell::Empty);
                }
            }
        }
        self.cells.set_point(self.start, Cell::Start);
        self.cells.set_point(self.end, Cell::End);
    }

    /// Retrieves the component id a given [Point] belongs to.
    pub fn get_component(&self, point: &Point) -> usize {
        self.components.find(self.cells.get_ix_point(point))
    }

    /// Checks if `a` and `b` are on the same component.
    pub fn reachable(&self, a: &Point, b: &Point) -> bool {
        !self.unreachable(a, b)
    }

    /// Checks if `a` and `b` are not on the same component. Out-of-range points are
    /// unreachable by definition.
    pub fn unreachable(&self, a: &Point, b: &Point) -> bool {
        if self.in_bounds(a.x, a.y) && self.in_bounds(b.x, b.y) {
            !self
                .components
                .equiv(self.cells.get_ix_point(a), self.cells.get_ix_point(b))
        } else {
            true
        }
    }

    /// Regenerates the components if they are marked as dirty.
    pub fn update(&mut self) {
        if self.components_dirty {
            info!("Components are dirty: regenerating components");
            self.generate_components();
        }
    }

    /// Generates a new [UnionFind] structure and links up walkable grid neighbours to the
    /// same components.
    pub fn generate_components(&mut self) {
        info!("Generating connected components");
        let n = self.size();
        self.components = UnionFind::new(n * n);
        self.components_dirty = false;
        for x in 0..n {
            for y in 0..n {
                if !self.cells.get(x, y).walkable() {
                    continue;
                }
                let parent_ix = self.cells.get_ix(x, y);
                let point = Point::new(x as i32, y as i32);
                let neighbours = [
                    Point::new(point.x, point.y + 1),
                    Point::new(point.x + 1, point.y),
                ]
                .into_iter()
                .filter(|p| self.can_move_to(*p))
                .map(|p| self.cells.get_ix(p.x as usize, p.y as usize))
                .collect::<Vec<usize>>();
                for ix in neighbours {
                    self.components.union(parent_ix, ix);
                }
            }
        }
    }

    /// Runs `solver` from the start marker to the end marker and marks the discovered route
    /// on the grid. Returns the route cells, start and end inclusive, or [None] when the
    /// end is not reachable, in which case the grid is left unmodified.
    pub fn solve<S: GridSolver>(&mut self, solver: &S) -> Option<Vec<Point>> {
        self.update();
        let (start, end) = (self.start, self.end);
        if self.unreachable(&start, &end) {
            info!("{} is not reachable from {}", end, start);
            return None;
        }
        info!("{} is reachable from {}, computing path", end, start);
        match solver.find_path(self, start, end) {
            Some(path) => {
                self.mark_path(&path);
                Some(path)
            }
            None => {
                warn!("Reachable end could not be pathed to, is the component structure correct?");
                None
            }
        }
    }

    /// Solves with [BfsSolver], yielding a route with the minimum number of steps.
    pub fn bfs(&mut self) -> Option<Vec<Point>> {
        self.solve(&BfsSolver)
    }

    /// Solves with [DfsSolver], yielding some route, not necessarily a shortest one.
    pub fn dfs(&mut self) -> Option<Vec<Point>> {
        self.solve(&DfsSolver)
    }

    /// Writes the route onto the grid. The marker coordinates keep their classification
    /// and both markers are re-asserted afterwards in case the route touched them.
    fn mark_path(&mut self, path: &[Point]) {
        for &p in path {
            if p != self.start && p != self.end {
                self.cells.set_point(p, Cell::Path);
            }
        }
        self.cells.set_point(self.start, Cell::Start);
        self.cells.set_point(self.end, Cell::End);
    }
}

impl fmt::Display for PathGrid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for x in 0..self.size() {
            for y in 0..self.size() {
                let c = match self.cells.get(x, y) {
                    Cell::Empty => '.',
                    Cell::Wall => '#',
                    Cell::Start => 'S',
                    Cell::End => 'E',
                    Cell::Path => '*',
                };
                write!(f, "{}", c)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open_config(n: usize) -> GridConfig {
        GridConfig {
            size: n,
            walls: Default::default(),
            start: Point::new(0, 0),
            end: Point::new(n as i32 - 1, n as i32 - 1),
        }
    }

    #[test]
    fn sample_board_layout() {
        let grid = PathGrid::default();
        assert_eq!(grid.size(), DEFAULT_GRID_SIZE);
        assert_eq!(grid.cell(0, 0), Cell::Start);
        assert_eq!(grid.cell(28, 28), Cell::End);
        assert_eq!(grid.cell(6, 6), Cell::Wall);
        assert_eq!(grid.cell(3, 3), Cell::Wall);
        assert_eq!(grid.cell(10, 10), Cell::Empty);
    }

    #[test]
    fn coinciding_markers_are_rejected() {
        let mut config = open_config(5);
        config.end = config.start;
        assert_eq!(
            PathGrid::new(config).unwrap_err(),
            GridError::MarkersCoincide(Point::new(0, 0))
        );
    }

    #[test]
    fn marker_wins_over_configured_wall() {
        let mut config = open_config(5);
        config.walls.insert(Point::new(0, 0));
        let grid = PathGrid::new(config).unwrap();
        assert_eq!(grid.cell(0, 0), Cell::Start);
    }

    #[test]
    fn wall_toggle_respects_markers() {
        let mut grid = PathGrid::new(open_config(5)).unwrap();
        grid.set_wall(0, 0, true).unwrap();
        assert_eq!(grid.cell(0, 0), Cell::Start);
        grid.set_wall(4, 4, true).unwrap();
        assert_eq!(grid.cell(4, 4), Cell::End);
        grid.set_wall(2, 2, true).unwrap();
        assert_eq!(grid.cell(2, 2), Cell::Wall);
        grid.set_wall(2, 2, false).unwrap();
        assert_eq!(grid.cell(2, 2), Cell::Empty);
    }

    #[test]
    fn out_of_range_mutations_are_rejected() {
        let mut grid = PathGrid::new(open_config(5)).unwrap();
        assert!(matches!(
            grid.set_wall(5, 0, true),
            Err(GridError::OutOfBounds { .. })
        ));
        assert!(matches!(
            grid.move_start(-1, 2),
            Err(GridError::OutOfBounds { .. })
        ));
        assert!(matches!(
            grid.move_end(0, 7),
            Err(GridError::OutOfBounds { .. })
        ));
    }

    #[test]
    fn marker_moves_update_cells() {
        let mut grid = PathGrid::new(open_config(5)).unwrap();
        grid.move_start(2, 1).unwrap();
        assert_eq!(grid.start(), Point::new(2, 1));
        assert_eq!(grid.cell(2, 1), Cell::Start);
        assert_eq!(grid.cell(0, 0), Cell::Empty);
        grid.move_end(0, 3).unwrap();
        assert_eq!(grid.end(), Point::new(0, 3));
        assert_eq!(grid.cell(0, 3), Cell::End);
        assert_eq!(grid.cell(4, 4), Cell::Empty);
    }

    #[test]
    fn with_markers_keeps_the_sample_walls() {
        let grid = PathGrid::with_markers(Point::new(14, 0), Point::new(14, 28)).unwrap();
        assert_eq!(grid.cell(14, 0), Cell::Start);
        assert_eq!(grid.cell(14, 28), Cell::End);
        assert_eq!(grid.cell(6, 6), Cell::Wall);
    }

    #[test]
    fn marker_moves_reject_occupied_destinations() {
        let mut grid = PathGrid::new(open_config(5)).unwrap();
        grid.set_wall(1, 1, true).unwrap();
        assert_eq!(
            grid.move_start(1, 1),
            Err(GridError::Occupied {
                point: Point::new(1, 1),
                cell: Cell::Wall
            })
        );
        assert_eq!(
            grid.move_start(4, 4),
            Err(GridError::Occupied {
                point: Point::new(4, 4),
                cell: Cell::End
            })
        );
        assert_eq!(grid.start(), Point::new(0, 0));
        assert_eq!(grid.cell(0, 0), Cell::Start);
    }

    #[test]
    fn reset_path_clears_route_only() {
        let mut grid = PathGrid::new(open_config(3)).unwrap();
        grid.set_wall(1, 1, true).unwrap();
        grid.bfs().unwrap();
        assert!((0..3).any(|x| (0..3).any(|y| grid.cell(x, y) == Cell::Path)));
        grid.reset_path();
        for x in 0..3 {
            for y in 0..3 {
                assert_ne!(grid.cell(x, y), Cell::Path);
            }
        }
        assert_eq!(grid.cell(1, 1), Cell::Wall);
        assert_eq!(grid.cell(0, 0), Cell::Start);
        assert_eq!(grid.cell(2, 2), Cell::End);
    }

    /// Walling off a full column splits the board in two; clearing one cell rejoins it.
    #[test]
    fn components_track_wall_edits() {
        let mut grid = PathGrid::new(open_config(5)).unwrap();
        for y in 0..5 {
            grid.set_wall(2, y, true).unwrap();
        }
        grid.update();
        assert!(grid.unreachable(&Point::new(0, 0), &Point::new(4, 4)));
        grid.set_wall(2, 3, false).unwrap();
        grid.update();
        assert!(grid.reachable(&Point::new(0, 0), &Point::new(4, 4)));
        assert_eq!(
            grid.get_component(&Point::new(0, 0)),
            grid.get_component(&Point::new(4, 4))
        );
    }
}
