//! This crate contains the engine and terminal front end of the game invisible-wall.
//!
//! The player walks a perfect maze whose walls stay hidden until bumped into. The engine modules
//! ([`maze`], [`generator`], [`fog`], [`movement`], [`pathfinding`], [`play`]) carry all of the game
//! rules and can be driven without a terminal; [`App`] renders them with Ratatui.

#![expect(
    clippy::cargo_common_metadata,
    reason = "Temporary allow during development."
)]

mod app;
mod events;
mod feedback;
mod types;
mod ui;

pub mod config;
pub mod fog;
pub mod generator;
pub mod maze;
pub mod movement;
pub mod pathfinding;
pub mod play;
pub mod records;
pub mod storage;

pub use app::App;
use thiserror::Error;

use crate::maze::Position;

/// Errors raised by the maze engine.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum MazeError {
    /// Requested size is outside the supported bounds; nothing was generated.
    #[error("unsupported maze size {rows}x{cols}")]
    InvalidDimensions {
        /// Requested rows.
        rows: usize,
        /// Requested columns.
        cols: usize,
    },
    /// A position does not belong to the grid.
    #[error("position {position} is outside the maze")]
    OutOfBounds {
        /// Offending position.
        position: Position,
    },
    /// No path joins two cells, so the grid is not a spanning tree.
    #[error("no path from {start} to {goal}, the maze is inconsistent")]
    InconsistentMaze {
        /// Where the search started.
        start: Position,
        /// Cell that could not be reached.
        goal: Position,
    },
}
