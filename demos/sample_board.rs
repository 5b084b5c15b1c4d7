use grid_pathviz::PathGrid;

// Solves the default 29x29 sample board twice, once per search, and prints the marked
// board after each solve. BFS finds a minimum-step route; DFS usually wanders.

fn main() {
    let mut grid = PathGrid::default();

    match grid.bfs() {
        Some(path) => println!("BFS route with {} cells:\n{}", path.len(), grid),
        None => println!("No route found."),
    }

    grid.reset_path();

    match grid.dfs() {
        Some(path) => println!("DFS route with {} cells:\n{}", path.len(), grid),
        None => println!("No route found."),
    }
}
