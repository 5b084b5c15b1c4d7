use grid_pathviz::{GridConfig, PathGrid};
use grid_util::point::Point;

// In this example a route is found on a 3x3 grid with shape
//  ___
// |S  |
// | # |
// |  E|
//  ___
// where
// - # marks a wall
// - S marks the start
// - E marks the end
//
// Cells have a 4-neighbourhood

fn main() {
    let config = GridConfig {
        size: 3,
        walls: [Point::new(1, 1)].into_iter().collect(),
        start: Point::new(0, 0),
        end: Point::new(2, 2),
    };
    let mut grid = PathGrid::new(config).unwrap();
    if let Some(path) = grid.bfs() {
        println!("A route has been found:");
        for p in path {
            println!("{:?}", p);
        }
    }
    println!("{}", grid);
}
