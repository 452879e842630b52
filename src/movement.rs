//! Move resolution against hidden walls.
//!
//! This module decides what happens when the player pushes in a direction. The decision reads the
//! true grid, while the only visible side effect of a blocked move is a newly revealed wall.

use crate::{
    fog::WallRevealTracker,
    maze::{Direction, Grid, Position},
};

/// Player position and step counter for the current attempt.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PlayerState {
    /// Cell the player stands on.
    pub position: Position,
    /// Successful moves made since the attempt started.
    pub steps: u32,
}

impl PlayerState {
    /// A fresh player standing on `start` with no steps taken.
    #[must_use]
    pub const fn at(start: Position) -> Self {
        Self {
            position: start,
            steps: 0,
        }
    }
}

/// Result of a single move attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The player stepped into a new cell.
    Moved {
        /// Cell the player now stands on.
        position: Position,
        /// Whether that cell is the goal.
        goal_reached: bool,
    },
    /// A wall or the grid border stopped the player; the wall on that side is now revealed.
    Bumped(Direction),
}

impl MoveOutcome {
    /// Whether this move ended on the goal.
    #[must_use]
    pub const fn goal_reached(&self) -> bool {
        matches!(
            self,
            Self::Moved {
                goal_reached: true,
                ..
            }
        )
    }
}

/// Resolves a move attempt.
///
/// If the target lies outside the grid or a wall stands in the way, the blocking side is revealed
/// (together with its mirror for internal walls) and the player does not move. Otherwise the player
/// moves one cell and gains exactly one step. Nothing else is read or written.
pub fn resolve_move(
    grid: &Grid,
    player: &mut PlayerState,
    goal: Position,
    direction: Direction,
    revealed: &mut WallRevealTracker,
) -> MoveOutcome {
    let current = player.position;

    let target = match grid.dimensions().neighbor(current, direction) {
        Some(target) if !grid.has_wall(current, direction) => target,
        _ => {
            revealed.reveal(current, direction);
            return MoveOutcome::Bumped(direction);
        }
    };

    player.position = target;
    player.steps = player.steps.saturating_add(1);

    MoveOutcome::Moved {
        position: target,
        goal_reached: target == goal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::maze::fixtures::u_shaped_grid;

    #[test]
    fn test_internal_wall_bumps_and_reveals_both_sides() {
        let grid = u_shaped_grid();
        let mut fog = WallRevealTracker::new(grid.dimensions());
        let mut player = PlayerState::at(Position::new(0, 0));

        let outcome = resolve_move(
            &grid,
            &mut player,
            Position::new(1, 1),
            Direction::South,
            &mut fog,
        );

        assert_eq!(outcome, MoveOutcome::Bumped(Direction::South));
        assert_eq!(player, PlayerState::at(Position::new(0, 0)));
        assert!(fog.is_revealed(Position::new(0, 0), Direction::South));
        assert!(fog.is_revealed(Position::new(1, 0), Direction::North));
    }

    #[test]
    fn test_open_edge_moves_one_step() {
        let grid = u_shaped_grid();
        let mut fog = WallRevealTracker::new(grid.dimensions());
        let mut player = PlayerState::at(Position::new(0, 0));

        let outcome = resolve_move(
            &grid,
            &mut player,
            Position::new(1, 1),
            Direction::East,
            &mut fog,
        );

        assert_eq!(
            outcome,
            MoveOutcome::Moved {
                position: Position::new(0, 1),
                goal_reached: false
            }
        );
        assert_eq!(player.position, Position::new(0, 1));
        assert_eq!(player.steps, 1);
        assert!(fog.is_empty());
    }

    #[test]
    fn test_border_bump_reveals_single_side() {
        let grid = u_shaped_grid();
        let mut fog = WallRevealTracker::new(grid.dimensions());
        let mut player = PlayerState::at(Position::new(0, 0));

        let outcome = resolve_move(
            &grid,
            &mut player,
            Position::new(1, 1),
            Direction::West,
            &mut fog,
        );

        assert_eq!(outcome, MoveOutcome::Bumped(Direction::West));
        assert_eq!(player.steps, 0);
        assert_eq!(fog.len(), 1);
        assert!(fog.is_revealed(Position::new(0, 0), Direction::West));
    }

    #[test]
    fn test_reaching_goal_is_flagged() {
        let grid = u_shaped_grid();
        let mut fog = WallRevealTracker::new(grid.dimensions());
        let mut player = PlayerState::at(Position::new(0, 1));
        player.steps = 4;

        let outcome = resolve_move(
            &grid,
            &mut player,
            Position::new(1, 1),
            Direction::South,
            &mut fog,
        );

        assert!(outcome.goal_reached());
        assert_eq!(player.steps, 5);
    }
}
