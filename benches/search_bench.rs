use criterion::{criterion_group, criterion_main, Criterion};
use grid_router::ObstacleGrid;
use grid_util::grid::Grid;
use grid_util::point::Point;
use rand::prelude::*;
use std::hint::black_box;

fn random_grid_bench(c: &mut Criterion) {
    const N: usize = 50;
    const N_GRIDS: usize = 100;
    let mut rng = StdRng::seed_from_u64(0);
    let mut grids = Vec::new();
    for _ in 0..N_GRIDS {
        let mut grid = ObstacleGrid::new(N, N, false);
        grid.randomize(&mut rng, 0.2);
        grid.set(0, 0, false);
        grid.set(N - 1, N - 1, false);
        grids.push(grid);
    }
    let start = Point::new(0, 0);
    let end = Point::new(N as i32 - 1, N as i32 - 1);
    c.bench_function("random 50x50, 0.2 obstacle density", |b| {
        b.iter(|| {
            for grid in &grids {
                black_box(grid.find_path(start, end));
            }
        })
    });
}

fn open_grid_bench(c: &mut Criterion) {
    const N: usize = 50;
    let grid = ObstacleGrid::new(N, N, false);
    let start = Point::new(0, 0);
    let end = Point::new(N as i32 - 1, N as i32 - 1);
    c.bench_function("open 50x50, corner to corner", |b| {
        b.iter(|| black_box(grid.find_path(start, end)))
    });
}

criterion_group!(benches, random_grid_bench, open_grid_bench);
criterion_main!(benches);
