//! # grid_pathviz
//!
//! The grid model behind a grid-based pathfinding visualizer. A [PathGrid] is a square
//! matrix of [Cell] classifications: open cells, walls, a start marker and an end marker.
//! The two bundled solvers walk it with
//! [breadth-first search](https://en.wikipedia.org/wiki/Breadth-first_search) or
//! [depth-first search](https://en.wikipedia.org/wiki/Depth-first_search) and mark the
//! cells of the found route so a renderer can draw them. Pre-computes
//! [connected components](https://en.wikipedia.org/wiki/Component_(graph_theory))
//! to avoid flood-filling behaviour if no path exists.

pub mod path_grid;
pub mod solver;

pub use path_grid::{Cell, GridConfig, GridError, PathGrid};
pub use solver::bfs::BfsSolver;
pub use solver::dfs::DfsSolver;
pub use solver::GridSolver;
