use grid_router::ObstacleGrid;
use grid_util::grid::Grid;
use grid_util::point::Point;
use rand::prelude::*;

// Replays the kind of session an interactive front end drives: paint a wall
// cell by cell, route between the grid corners, then wipe the board and try
// again on a randomized layout.

fn render(grid: &ObstacleGrid, path: &[Point]) {
    for y in 0..grid.height() as i32 {
        for x in 0..grid.width() as i32 {
            let p = Point::new(x, y);
            if path.contains(&p) {
                print!("*");
            } else if grid.get(x as usize, y as usize) {
                print!("#");
            } else {
                print!(".");
            }
        }
        println!();
    }
    println!();
}

fn main() {
    let mut grid = ObstacleGrid::new(10, 10, false);
    let start = Point::new(0, 0);
    let end = Point::new(9, 9);

    // Paint a wall across most of the fourth row, one click at a time.
    for x in 0..9 {
        grid.toggle(x, 3);
    }
    grid.update();
    match grid.find_path(start, end) {
        Some(path) => render(&grid, &path),
        None => println!("no route"),
    }

    // Wipe the board and scatter obstacles instead.
    grid.clear();
    let mut rng = StdRng::seed_from_u64(7);
    grid.randomize(&mut rng, 0.2);
    grid.set(0, 0, false);
    grid.set(9, 9, false);
    if grid.reachable(&start, &end) {
        let path = grid.find_path(start, end).unwrap();
        render(&grid, &path);
    } else {
        println!("randomized layout disconnected the corners");
    }
}
