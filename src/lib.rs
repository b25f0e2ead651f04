//! # grid_router
//!
//! Best-first shortest paths on a uniform-cost 4-connected grid. A caller
//! (typically an interactive layer that lets a user paint obstacles cell by
//! cell) owns an [ObstacleGrid], toggles cells between open and blocked, and
//! asks for a shortest obstacle-free route between two cells. Pre-computes
//! [connected components](https://en.wikipedia.org/wiki/Component_(graph_theory))
//! so callers can rule out disconnected cell pairs without flood-filling the
//! whole grid with a search.
mod best_first;

use grid_util::grid::{BoolGrid, Grid};
use grid_util::point::Point;
use log::info;
use petgraph::unionfind::UnionFind;
use rand::Rng;

use crate::best_first::best_first_search;
use core::fmt;

/// State of a single grid cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CellState {
    Open,
    Blocked,
}

impl CellState {
    /// Whether a cell in this state blocks movement.
    pub fn is_blocked(self) -> bool {
        self == CellState::Blocked
    }

    /// The other state.
    pub fn toggled(self) -> CellState {
        match self {
            CellState::Open => CellState::Blocked,
            CellState::Blocked => CellState::Open,
        }
    }
}

/// Heuristic distance for 4-directional movement.
fn manhattan_distance(a: &Point, b: &Point) -> i32 {
    (a.x - b.x).abs() + (a.y - b.y).abs()
}

/// [ObstacleGrid] holds the obstacle layout in a [BoolGrid] ([true] meaning
/// blocked) and maintains component information about the open cells using a
/// [UnionFind] structure. Components answer reachability questions in near
/// constant time; pathfinding itself runs on the raw grid values only, so a
/// dirty component index never changes a search result. Implements [Grid] by
/// building on [BoolGrid].
#[derive(Clone, Debug)]
pub struct ObstacleGrid {
    pub grid: BoolGrid,
    pub components: UnionFind<usize>,
    pub components_dirty: bool,
}

impl Default for ObstacleGrid {
    fn default() -> ObstacleGrid {
        ObstacleGrid {
            grid: BoolGrid::default(),
            components: UnionFind::new(0),
            components_dirty: false,
        }
    }
}

impl ObstacleGrid {
    /// The von Neumann neighbourhood of a point: up, down, left, right.
    fn neighbourhood_points(&self, point: &Point) -> [Point; 4] {
        [
            Point::new(point.x, point.y - 1),
            Point::new(point.x, point.y + 1),
            Point::new(point.x - 1, point.y),
            Point::new(point.x + 1, point.y),
        ]
    }
    fn open_neighbours(&self, point: &Point) -> Vec<Point> {
        self.neighbourhood_points(point)
            .into_iter()
            .filter(|p| self.can_move_to(*p))
            .collect::<Vec<Point>>()
    }
    fn can_move_to(&self, pos: Point) -> bool {
        self.in_bounds(pos.x, pos.y) && !self.grid.get(pos.x as usize, pos.y as usize)
    }
    fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && self.grid.index_in_bounds(x as usize, y as usize)
    }

    /// The state of the cell at (x, y).
    pub fn cell(&self, x: usize, y: usize) -> CellState {
        if self.grid.get(x, y) {
            CellState::Blocked
        } else {
            CellState::Open
        }
    }

    /// Sets the cell at (x, y), keeping the component index up to date the
    /// same way [set](Grid::set) does.
    pub fn set_cell(&mut self, x: usize, y: usize, state: CellState) {
        self.set(x, y, state.is_blocked());
    }

    /// Flips the cell at (x, y) between [CellState::Open] and
    /// [CellState::Blocked], returning the new state.
    pub fn toggle(&mut self, x: usize, y: usize) -> CellState {
        let state = self.cell(x, y).toggled();
        self.set_cell(x, y, state);
        state
    }

    /// Opens every cell and rebuilds the component index.
    pub fn clear(&mut self) {
        for x in 0..self.grid.width() {
            for y in 0..self.grid.height() {
                self.grid.set(x, y, false);
            }
        }
        self.generate_components();
    }

    /// Blocks each cell independently with the given probability and opens it
    /// otherwise, then rebuilds the component index. The caller supplies the
    /// [Rng] so grid generation stays reproducible under a seeded generator.
    pub fn randomize<R: Rng>(&mut self, rng: &mut R, probability: f64) {
        for x in 0..self.grid.width() {
            for y in 0..self.grid.height() {
                self.grid.set(x, y, rng.gen_bool(probability));
            }
        }
        self.generate_components();
    }

    /// Retrieves the component id a given [Point] belongs to.
    pub fn get_component(&self, point: &Point) -> usize {
        self.components.find(self.get_ix_point(point))
    }

    /// Checks if start and goal are on the same component.
    pub fn reachable(&self, start: &Point, goal: &Point) -> bool {
        !self.unreachable(start, goal)
    }

    /// Checks if start and goal are not on the same component. Out of bounds
    /// points are unreachable by definition.
    pub fn unreachable(&self, start: &Point, goal: &Point) -> bool {
        if self.in_bounds(start.x, start.y) && self.in_bounds(goal.x, goal.y) {
            let start_ix = self.get_ix_point(start);
            let goal_ix = self.get_ix_point(goal);
            !self.components.equiv(start_ix, goal_ix)
        } else {
            true
        }
    }

    /// Computes a shortest path from start to end, inclusive on both ends, or
    /// [None] if no obstacle-free route exists. Search is best-first over the
    /// 4-neighbourhood with a Manhattan distance heuristic and unit step
    /// costs; on equally good frontier candidates the first one discovered
    /// wins, so repeated calls on an unchanged grid return the same path.
    ///
    /// Only neighbour cells are tested for obstacles during the search. The
    /// start cell itself is seeded unconditionally: a search out of a blocked
    /// start cell can still succeed, and `start == end` returns the
    /// single-cell path whatever the state of that cell. The component index
    /// is not consulted, so obstacle edits never leave a stale answer here.
    pub fn find_path(&self, start: Point, end: Point) -> Option<Vec<Point>> {
        let result = best_first_search(
            &start,
            |node| {
                self.open_neighbours(node)
                    .into_iter()
                    .map(|p| (p, 1))
                    .collect::<Vec<_>>()
            },
            |point| manhattan_distance(point, &end),
            |point| *point == end,
        );
        if result.is_none() {
            info!("{} cannot be reached from {}", end, start);
        }
        result.map(|(path, _cost)| path)
    }

    /// Regenerates the components if they are marked as dirty.
    pub fn update(&mut self) {
        if self.components_dirty {
            info!("Components are dirty: regenerating components");
            self.generate_components();
        }
    }

    /// Generates a new [UnionFind] structure and links up grid neighbours to
    /// the same components.
    pub fn generate_components(&mut self) {
        info!("Generating connected components");
        let w = self.grid.width;
        let h = self.grid.height;
        self.components = UnionFind::new(w * h);
        self.components_dirty = false;
        for x in 0..w {
            for y in 0..h {
                if !self.grid.get(x, y) {
                    let parent_ix = self.grid.get_ix(x, y);
                    let point = Point::new(x as i32, y as i32);
                    // Unioning right and down neighbours covers every open
                    // 4-adjacency exactly once.
                    let neighbours = [
                        Point::new(point.x + 1, point.y),
                        Point::new(point.x, point.y + 1),
                    ]
                    .into_iter()
                    .filter(|p| self.can_move_to(*p))
                    .map(|p| self.grid.get_ix(p.x as usize, p.y as usize))
                    .collect::<Vec<usize>>();
                    for ix in neighbours {
                        self.components.union(parent_ix, ix);
                    }
                }
            }
        }
    }
}

impl fmt::Display for ObstacleGrid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for y in 0..self.grid.height {
            for x in 0..self.grid.width {
                write!(f, "{}", if self.grid.get(x, y) { '#' } else { '.' })?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl Grid<bool> for ObstacleGrid {
    fn new(width: usize, height: usize, default_value: bool) -> Self {
        ObstacleGrid {
            grid: BoolGrid::new(width, height, default_value),
            components: UnionFind::new(width * height),
            components_dirty: false,
        }
    }
    fn get(&self, x: usize, y: usize) -> bool {
        self.grid.get(x, y)
    }
    /// Updates a position on the grid. Joins newly connected components and
    /// flags the components as dirty if components are (potentially) broken
    /// apart into multiple.
    fn set(&mut self, x: usize, y: usize, blocked: bool) {
        let p = Point::new(x as i32, y as i32);
        if self.grid.get(x, y) != blocked && blocked {
            self.components_dirty = true;
        } else {
            for n in self.open_neighbours(&p) {
                self.components.union(
                    self.grid.get_ix(x, y),
                    self.grid.get_ix(n.x as usize, n.y as usize),
                );
            }
        }
        self.grid.set(x, y, blocked);
    }
    fn width(&self) -> usize {
        self.grid.width()
    }
    fn height(&self) -> usize {
        self.grid.height()
    }
}
