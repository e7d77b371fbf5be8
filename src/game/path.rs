//! Shortest-Path Search
//!
//! Breadth-first search over the open-edge graph induced by the grid.
//! Edges are unweighted and undirected, so BFS order guarantees the
//! returned path is minimal in tile-steps. Ties between equal-length paths
//! are broken by [`Direction::ALL`] enumeration order; the choice carries
//! no meaning but keeps runs reproducible.

use std::collections::VecDeque;

use crate::core::tile::{TilePos, Direction};
use crate::game::grid::Grid;

/// Find the shortest path from `start` to `goal` through open walls.
///
/// Returns the full waypoint sequence including both endpoints, a
/// single-element path when `start == goal`, or `None` when the goal is
/// unreachable or either endpoint is out of bounds. Unreachable goals are
/// an expected outcome, not an error: on a generated (connected) maze they
/// only arise from out-of-bounds queries, but callers must handle the
/// absent case regardless.
pub fn find_path(grid: &Grid, start: TilePos, goal: TilePos) -> Option<Vec<TilePos>> {
    let start_idx = grid.index(start)?;
    let goal_idx = grid.index(goal)?;

    if start_idx == goal_idx {
        return Some(vec![start]);
    }

    let len = (grid.width() as usize) * (grid.height() as usize);
    // Parent pointers over the flat cell array; also doubles as the
    // visited set (start is its own parent).
    let mut parents: Vec<Option<u32>> = vec![None; len];
    parents[start_idx] = Some(start_idx as u32);

    let mut queue = VecDeque::from([start]);
    while let Some(current) = queue.pop_front() {
        if current == goal {
            return Some(reconstruct(grid, &parents, start, goal));
        }

        for dir in Direction::ALL {
            if !grid.can_move(current, dir) {
                continue;
            }
            let next = current.step(dir);
            let Some(next_idx) = grid.index(next) else {
                continue;
            };
            if parents[next_idx].is_some() {
                continue;
            }
            // Mark on enqueue, not on dequeue, so no cell is expanded twice
            parents[next_idx] = grid.index(current).map(|idx| idx as u32);
            queue.push_back(next);
        }
    }

    None
}

/// Walk the parent chain from `goal` back to `start` and reverse it.
fn reconstruct(
    grid: &Grid,
    parents: &[Option<u32>],
    start: TilePos,
    goal: TilePos,
) -> Vec<TilePos> {
    let mut path = Vec::new();
    let mut cursor = Some(goal);

    while let Some(pos) = cursor {
        path.push(pos);
        if pos == start {
            break;
        }
        cursor = grid
            .index(pos)
            .and_then(|idx| parents[idx])
            .map(|parent_idx| tile_at(grid, parent_idx as usize));
    }

    path.reverse();
    path
}

/// Position of a flat cell index.
#[inline]
fn tile_at(grid: &Grid, idx: usize) -> TilePos {
    let width = grid.width() as usize;
    TilePos::new((idx % width) as i32, (idx / width) as i32)
}
