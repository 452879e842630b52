//! Randomised depth-first maze generation.
//!
//! The generator carves a spanning tree over the grid graph with an explicit stack: it starts at the
//! origin, repeatedly opens the wall to a random unvisited neighbour of the cell on top of the stack
//! and backtracks when that cell has none left.

use rand::Rng;
use tracing::debug;

use crate::{
    maze::{Dimensions, Direction, Grid, Position},
    MazeError,
};

/// Generates a perfect maze of the given size.
///
/// The random source is injected so that a seeded generator reproduces the exact same maze. The
/// result always has `rows * cols - 1` open edges forming a single tree, which makes exactly one
/// simple path between any two cells.
///
/// # Errors
///
/// Returns [`MazeError::InvalidDimensions`] before any carving when a side is out of bounds.
pub fn generate_maze<R>(rows: usize, cols: usize, rng: &mut R) -> Result<Grid, MazeError>
where
    R: Rng + ?Sized,
{
    Ok(generate_grid(Dimensions::new(rows, cols)?, rng))
}

/// Generates a perfect maze for already validated `dimensions`.
pub fn generate_grid<R>(dimensions: Dimensions, rng: &mut R) -> Grid
where
    R: Rng + ?Sized,
{
    let mut grid = Grid::closed(dimensions);
    let mut visited = vec![false; dimensions.cell_count()];

    let origin = Position::new(0, 0);
    mark_visited(&mut visited, dimensions, origin);
    let mut stack = vec![origin];

    while let Some(&current) = stack.last() {
        let candidates: Vec<Direction> = Direction::ALL
            .into_iter()
            .filter(|&direction| {
                dimensions
                    .neighbor(current, direction)
                    .is_some_and(|neighbor| !is_visited(&visited, dimensions, neighbor))
            })
            .collect();

        if candidates.is_empty() {
            let _ = stack.pop();
            continue;
        }

        let Some(&direction) = candidates.get(rng.gen_range(0..candidates.len())) else {
            continue;
        };
        if let Some(next) = grid.carve(current, direction) {
            mark_visited(&mut visited, dimensions, next);
            stack.push(next);
        }
    }

    debug!(
        rows = dimensions.rows(),
        cols = dimensions.cols(),
        open_edges = grid.open_edge_count(),
        "generated maze"
    );

    grid
}

/// Whether the generator already reached `position`.
fn is_visited(visited: &[bool], dimensions: Dimensions, position: Position) -> bool {
    dimensions
        .index_of(position)
        .and_then(|index| visited.get(index).copied())
        .unwrap_or(true)
}

/// Flags `position` as reached.
fn mark_visited(visited: &mut [bool], dimensions: Dimensions, position: Position) {
    if let Some(flag) = dimensions
        .index_of(position)
        .and_then(|index| visited.get_mut(index))
    {
        *flag = true;
    }
}
