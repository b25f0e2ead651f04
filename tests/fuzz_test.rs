/// Fuzzes the pathfinding system by checking for many random grids that a
/// path is found exactly when the component index says the goal is reachable,
/// and that every found path is a valid 4-directional walk of optimal length
/// (compared against a plain breadth-first reference).
use grid_router::ObstacleGrid;
use grid_util::*;
use rand::prelude::*;
use std::collections::VecDeque;

fn random_grid(w: usize, h: usize, rng: &mut StdRng) -> ObstacleGrid {
    let mut obstacle_grid = ObstacleGrid::new(w, h, false);
    obstacle_grid.randomize(rng, 0.4);
    obstacle_grid
}

fn visualize_grid(grid: &ObstacleGrid, start: &Point, end: &Point) {
    for y in 0..grid.height() as i32 {
        for x in 0..grid.width() as i32 {
            let p = Point::new(x, y);
            if *start == p {
                print!("S");
            } else if *end == p {
                print!("G");
            } else if grid.get(x as usize, y as usize) {
                print!("#");
            } else {
                print!(".");
            }
        }
        println!();
    }
}

/// Reference shortest-path edge count by breadth-first search.
fn bfs_distance(grid: &ObstacleGrid, start: Point, end: Point) -> Option<usize> {
    let w = grid.width() as i32;
    let h = grid.height() as i32;
    let ix = |p: Point| (p.y * w + p.x) as usize;
    let mut dist = vec![usize::MAX; (w * h) as usize];
    let mut queue = VecDeque::new();
    dist[ix(start)] = 0;
    queue.push_back(start);
    while let Some(p) = queue.pop_front() {
        if p == end {
            return Some(dist[ix(p)]);
        }
        let neighbours = [
            Point::new(p.x, p.y - 1),
            Point::new(p.x, p.y + 1),
            Point::new(p.x - 1, p.y),
            Point::new(p.x + 1, p.y),
        ];
        for n in neighbours {
            if n.x < 0 || n.x >= w || n.y < 0 || n.y >= h {
                continue;
            }
            if grid.get(n.x as usize, n.y as usize) || dist[ix(n)] != usize::MAX {
                continue;
            }
            dist[ix(n)] = dist[ix(p)] + 1;
            queue.push_back(n);
        }
    }
    None
}

#[test]
fn fuzz() {
    const N: usize = 10;
    const N_GRIDS: usize = 10000;
    let mut rng = StdRng::seed_from_u64(0);
    let start = Point::new(0, 0);
    let end = Point::new(N as i32 - 1, N as i32 - 1);
    for _ in 0..N_GRIDS {
        let mut random_grid = random_grid(N, N, &mut rng);
        random_grid.set(0, 0, false);
        random_grid.set(N - 1, N - 1, false);
        let reachable = random_grid.reachable(&start, &end);
        let path = random_grid.find_path(start, end);
        // Show the grid if the search and the component index disagree
        if path.is_some() != reachable {
            visualize_grid(&random_grid, &start, &end);
        }
        assert!(path.is_some() == reachable);
    }
}

#[test]
fn fuzz_distance() {
    const N: usize = 5;
    const N_GRIDS: usize = 10000;
    let mut rng = StdRng::seed_from_u64(0);
    let start = Point::new(0, 0);
    let end = Point::new(N as i32 - 1, N as i32 - 1);
    for _ in 0..N_GRIDS {
        let mut random_grid = random_grid(N, N, &mut rng);
        random_grid.set(0, 0, false);
        random_grid.set(N - 1, N - 1, false);
        let reference = bfs_distance(&random_grid, start, end);
        let path = random_grid.find_path(start, end);
        match (path, reference) {
            (Some(path), Some(distance)) => {
                if path.len() != distance + 1 {
                    println!("Reference distance: {distance}; found: {}", path.len() - 1);
                    println!("Path: {path:?}");
                    visualize_grid(&random_grid, &start, &end);
                }
                assert_eq!(path.len(), distance + 1);
                for pair in path.windows(2) {
                    let step = (pair[1].x - pair[0].x).abs() + (pair[1].y - pair[0].y).abs();
                    assert_eq!(step, 1);
                }
            }
            (None, None) => {}
            (path, reference) => {
                visualize_grid(&random_grid, &start, &end);
                panic!("search found {path:?} but reference found {reference:?}");
            }
        }
    }
}
