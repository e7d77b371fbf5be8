//! Maze Generation
//!
//! Randomized depth-first spanning-tree carve (recursive backtracker) with
//! optional loop injection. The carve guarantees full connectivity; loop
//! injection only removes walls, so connectivity is preserved (monotonic
//! union of edges). Generation never fails for positive dimensions.

use serde::{Serialize, Deserialize};
use tracing::debug;

use crate::core::rng::DeterministicRng;
use crate::core::tile::{TilePos, Direction};
use crate::game::grid::Grid;

/// A generated maze: the immutable grid plus its designated exit.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Maze {
    grid: Grid,
    exit: TilePos,
    extra_openings: u32,
}

impl Maze {
    /// Generate a maze.
    ///
    /// Carves a spanning tree from `(0, 0)`, then removes
    /// `floor(width * height * removal_fraction)` additional interior walls
    /// to create loops. The exit is the bottom-right cell.
    ///
    /// All randomness is drawn from `rng`; the same seed reproduces the
    /// same maze. Dimensions are assumed positive.
    pub fn generate(
        width: u32,
        height: u32,
        removal_fraction: f64,
        rng: &mut DeterministicRng,
    ) -> Self {
        let mut grid = Grid::sealed(width, height);
        carve(&mut grid, rng);
        let extra_openings = inject_loops(&mut grid, removal_fraction, rng);

        debug!(
            "generated {}x{} maze with {} extra openings",
            width, height, extra_openings
        );

        Self {
            grid,
            exit: TilePos::new(width as i32 - 1, height as i32 - 1),
            extra_openings,
        }
    }

    /// The generated grid, read-only from here on.
    #[inline]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// The designated exit tile (bottom-right cell).
    #[inline]
    pub fn exit(&self) -> TilePos {
        self.exit
    }

    /// How many walls loop injection actually removed.
    #[inline]
    pub fn extra_openings(&self) -> u32 {
        self.extra_openings
    }
}

/// Depth-first spanning-tree carve over the whole grid.
///
/// Invariant on exit: every cell was visited exactly once, so every cell is
/// connected to `(0, 0)` and the open edges form a tree. The transient
/// visited flags are cleared before returning.
fn carve(grid: &mut Grid, rng: &mut DeterministicRng) {
    let start = TilePos::new(0, 0);
    grid.mark_visited(start);
    let mut stack = vec![start];

    while let Some(&current) = stack.last() {
        // Unvisited raw-grid neighbors (adjacency, not wall openness)
        let mut candidates: Vec<Direction> = Vec::with_capacity(4);
        for dir in Direction::ALL {
            let neighbor = current.step(dir);
            if grid.contains(neighbor) && !grid.visited(neighbor) {
                candidates.push(dir);
            }
        }

        match rng.choose(&candidates) {
            Some(&dir) => {
                let next = current.step(dir);
                grid.mark_visited(next);
                grid.remove_wall(current, dir);
                stack.push(next);
            }
            None => {
                stack.pop();
            }
        }
    }

    grid.clear_visited();
}

/// Upper bound on rejection-sampling attempts per requested removal.
///
/// Large removal fractions leave few eligible walls standing, so late
/// samples mostly miss; the budget keeps generation finite in that regime.
const ATTEMPTS_PER_REMOVAL: u64 = 64;

/// Knock out extra interior walls to create loops.
///
/// Samples a cell inside the right/bottom margin (`x <= width-2`,
/// `y <= height-2`) and a side in {East, South}; a still-present wall is
/// removed, anything else is a retry. Returns the number of removals.
fn inject_loops(grid: &mut Grid, removal_fraction: f64, rng: &mut DeterministicRng) -> u32 {
    let width = grid.width();
    let height = grid.height();

    let target = ((width as f64) * (height as f64) * removal_fraction).floor() as u32;
    if target == 0 {
        return 0;
    }

    // A grid thinner than 2 tiles has no eligible {East, South} interior wall.
    if width < 2 || height < 2 {
        debug!("grid too thin for loop injection, skipping");
        return 0;
    }

    let max_attempts = (target as u64) * ATTEMPTS_PER_REMOVAL + 256;
    let mut removed = 0u32;
    let mut attempts = 0u64;

    while removed < target && attempts < max_attempts {
        attempts += 1;

        let pos = TilePos::new(
            rng.next_int(width - 1) as i32,
            rng.next_int(height - 1) as i32,
        );
        let dir = if rng.next_int(2) == 0 {
            Direction::East
        } else {
            Direction::South
        };

        if grid.has_wall(pos, dir) {
            grid.remove_wall(pos, dir);
            removed += 1;
        }
    }

    if removed < target {
        debug!(
            "loop injection stopped short: removed {} of {} walls",
            removed, target
        );
    }

    removed
}
