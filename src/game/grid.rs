//! Maze Grid Model
//!
//! The cell/wall data structure and its adjacency queries.
//! Cells live in a single flat `width * height` array addressed by `(x, y)`;
//! a wall is a shared-edge property and is always kept symmetric: removing
//! the East wall of `(x, y)` also removes the West wall of `(x + 1, y)`.
//!
//! After generation the grid is immutable and every query is pure.

use serde::{Serialize, Deserialize};

use crate::core::tile::{TilePos, Direction};

/// One tile of the grid: four wall flags plus a transient generation flag.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct Cell {
    /// Wall flags indexed by [`Direction`]; `true` = wall present.
    walls: [bool; 4],
    /// Carve bookkeeping. Only meaningful during generation; reset to
    /// `false` before the grid is published.
    visited: bool,
}

impl Cell {
    /// A cell with all four walls present.
    const fn sealed() -> Self {
        Self {
            walls: [true; 4],
            visited: false,
        }
    }

    /// Whether the wall on the given side is present.
    #[inline]
    pub fn wall(&self, dir: Direction) -> bool {
        self.walls[dir.index()]
    }
}

/// A fixed-size rectangular grid of cells.
///
/// Built once by the maze generator, then shared read-only by the
/// pathfinder, the player's movement checks and the adversary.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Grid {
    width: u32,
    height: u32,
    cells: Vec<Cell>,
}

impl Grid {
    /// Create a grid with every wall present.
    ///
    /// Dimensions are assumed positive; validating them is the caller's
    /// job (see [`SimConfig::validate`](crate::game::config::SimConfig::validate)).
    pub fn sealed(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::sealed(); (width as usize) * (height as usize)],
        }
    }

    /// Grid width in tiles.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Grid height in tiles.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Whether a position lies inside the grid.
    #[inline]
    pub fn contains(&self, pos: TilePos) -> bool {
        pos.x >= 0
            && pos.y >= 0
            && (pos.x as u32) < self.width
            && (pos.y as u32) < self.height
    }

    /// Flat index of an in-bounds position.
    #[inline]
    pub(crate) fn index(&self, pos: TilePos) -> Option<usize> {
        if self.contains(pos) {
            Some((pos.y as usize) * (self.width as usize) + pos.x as usize)
        } else {
            None
        }
    }

    /// Whether the wall on side `dir` of the cell at `pos` is present.
    ///
    /// Out-of-bounds positions count as sealed.
    #[inline]
    pub fn has_wall(&self, pos: TilePos, dir: Direction) -> bool {
        match self.index(pos) {
            Some(idx) => self.cells[idx].wall(dir),
            None => true,
        }
    }

    /// Movement predicate: can an entity standing at `pos` step in `dir`?
    ///
    /// False when `pos` or the destination is outside the grid, or when the
    /// shared wall is present. Pure query, no side effects.
    #[inline]
    pub fn can_move(&self, pos: TilePos, dir: Direction) -> bool {
        self.contains(pos) && self.contains(pos.step(dir)) && !self.has_wall(pos, dir)
    }

    /// The neighbors reachable from `pos` through open walls.
    ///
    /// Enumerated in [`Direction::ALL`] order. Callers must not rely on the
    /// order for correctness, only for reproducibility.
    pub fn open_neighbors(&self, pos: TilePos) -> Vec<TilePos> {
        let mut neighbors = Vec::with_capacity(4);
        for dir in Direction::ALL {
            if self.can_move(pos, dir) {
                neighbors.push(pos.step(dir));
            }
        }
        neighbors
    }

    /// Remove the shared wall between `pos` and its neighbor in `dir`.
    ///
    /// Both sides are cleared together so the symmetry invariant holds by
    /// construction. Caller guarantees both cells are in bounds.
    pub(crate) fn remove_wall(&mut self, pos: TilePos, dir: Direction) {
        let neighbor = pos.step(dir);
        debug_assert!(self.contains(pos) && self.contains(neighbor));

        if let Some(idx) = self.index(pos) {
            self.cells[idx].walls[dir.index()] = false;
        }
        if let Some(idx) = self.index(neighbor) {
            self.cells[idx].walls[dir.opposite().index()] = false;
        }
    }

    /// Number of open edges in the grid.
    ///
    /// Each shared edge is counted once (via its East/South side). A
    /// spanning tree over the grid has exactly `width * height - 1` open
    /// edges; loop injection adds one per removed wall.
    pub fn open_edge_count(&self) -> u32 {
        let mut count = 0;
        for y in 0..self.height as i32 {
            for x in 0..self.width as i32 {
                let pos = TilePos::new(x, y);
                if self.can_move(pos, Direction::East) {
                    count += 1;
                }
                if self.can_move(pos, Direction::South) {
                    count += 1;
                }
            }
        }
        count
    }

    /// Generation bookkeeping: has this cell been carved into?
    #[inline]
    pub(crate) fn visited(&self, pos: TilePos) -> bool {
        match self.index(pos) {
            Some(idx) => self.cells[idx].visited,
            None => true,
        }
    }

    /// Generation bookkeeping: mark a cell as carved.
    pub(crate) fn mark_visited(&mut self, pos: TilePos) {
        if let Some(idx) = self.index(pos) {
            self.cells[idx].visited = true;
        }
    }

    /// Clear the transient carve flag on every cell.
    ///
    /// The flag only ever meant "already carved"; it must not leak into
    /// gameplay queries.
    pub(crate) fn clear_visited(&mut self) {
        for cell in &mut self.cells {
            cell.visited = false;
        }
    }
}
