use grid_router::ObstacleGrid;
use grid_util::grid::Grid;
use grid_util::point::Point;

// In this example a path is found on a 3x3 grid with shape
//  ___
// |S..|
// |.#.|
// |..E|
//  ---
// where
// - # marks an obstacle
// - S marks the start
// - E marks the end
//
// Cells have a 4-neighborhood

fn main() {
    let mut obstacle_grid = ObstacleGrid::new(3, 3, false);
    obstacle_grid.set(1, 1, true);
    obstacle_grid.generate_components();
    println!("{}", obstacle_grid);
    let start = Point::new(0, 0);
    let end = Point::new(2, 2);
    let path = obstacle_grid.find_path(start, end).unwrap();
    println!("Path:");
    for p in path {
        println!("{:?}", p);
    }
}
