//! Shortest path search over the true wall graph.
//!
//! This module contains the breadth-first search behind hints. It reads the real wall flags of the
//! grid and ignores what the player has discovered so far.

use std::collections::VecDeque;

use tracing::{debug, error};

use crate::{
    maze::{Grid, Position},
    MazeError,
};

/// Computes the shortest path between two cells.
///
/// This function runs a breadth-first search through open edges, recording one predecessor for each
/// newly reached cell, and stops as soon as the goal is dequeued. The path is then rebuilt by walking
/// predecessors back to `start`. The returned sequence includes both endpoints. Since generated grids
/// are spanning trees, this is also the only simple path between the two cells.
///
/// # Errors
///
/// - [`MazeError::OutOfBounds`] if either endpoint lies outside the grid.
/// - [`MazeError::InconsistentMaze`] if the goal cannot be reached, which can only happen when the
///   grid was not produced by the generator.
pub fn find_path(grid: &Grid, start: Position, goal: Position) -> Result<Vec<Position>, MazeError> {
    let dimensions = grid.dimensions();
    let start_index = dimensions
        .index_of(start)
        .ok_or(MazeError::OutOfBounds { position: start })?;
    if !dimensions.contains(goal) {
        return Err(MazeError::OutOfBounds { position: goal });
    }

    let mut predecessors: Vec<Option<Position>> = vec![None; dimensions.cell_count()];
    let mut visited = vec![false; dimensions.cell_count()];
    if let Some(flag) = visited.get_mut(start_index) {
        *flag = true;
    }

    let mut queue = VecDeque::from([start]);
    let mut reached = false;

    while let Some(current) = queue.pop_front() {
        if current == goal {
            reached = true;
            break;
        }

        for next in grid.open_neighbors(current) {
            let Some(index) = dimensions.index_of(next) else {
                continue;
            };
            let Some(flag) = visited.get_mut(index) else {
                continue;
            };
            if *flag {
                continue;
            }
            *flag = true;
            if let Some(slot) = predecessors.get_mut(index) {
                *slot = Some(current);
            }
            queue.push_back(next);
        }
    }

    if !reached {
        error!(%start, %goal, "goal unreachable, grid is not a spanning tree");
        return Err(MazeError::InconsistentMaze { start, goal });
    }

    let mut path = vec![goal];
    let mut cursor = goal;
    while cursor != start {
        cursor = dimensions
            .index_of(cursor)
            .and_then(|index| predecessors.get(index).copied().flatten())
            .ok_or(MazeError::InconsistentMaze { start, goal })?;
        path.push(cursor);
    }
    path.reverse();

    debug!(%start, %goal, length = path.len(), "computed hint path");

    Ok(path)
}

/// Checks that consecutive cells of `path` are joined by open edges.
#[must_use]
pub fn path_is_connected(grid: &Grid, path: &[Position]) -> bool {
    path.windows(2).all(|pair| match pair {
        [from, to] => grid.open_neighbors(*from).any(|next| next == *to),
        _ => false,
    })
}
