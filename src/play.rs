//! Play lifecycle of a single maze.
//!
//! [`GameSession`] ties the engine pieces together: it owns the grid, the player, the discovered
//! walls and the score book, and moves between the [`Phase::Playing`] and [`Phase::Won`] phases.

use rand::SeedableRng as _;
use rand_chacha::ChaCha8Rng;
use tracing::info;

use crate::{
    fog::WallRevealTracker,
    generator::{generate_grid, generate_maze},
    maze::{Dimensions, Direction, Grid, Position},
    movement::{resolve_move, MoveOutcome, PlayerState},
    pathfinding::find_path,
    records::{Clock, HistoryEntry, ScoreBook, WinSummary},
    storage::Store,
    MazeError,
};

/// Cell every attempt starts from.
pub const START: Position = Position::new(0, 0);

/// Phase of the current attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// The player is still looking for the goal.
    Playing,
    /// The goal has been reached; only a new maze or a restart leave this phase.
    Won,
}

impl Phase {
    /// Phase of a fresh attempt whose goal is `goal`.
    ///
    /// A maze whose goal is the start cell is solved before the first move.
    const fn starting_at(goal: Position) -> Self {
        if goal.row == START.row && goal.col == START.col {
            Self::Won
        } else {
            Self::Playing
        }
    }
}

/// State of one player working through mazes.
pub struct GameSession {
    /// Random source for maze generation.
    rng: ChaCha8Rng,
    /// Seed the random source was created from.
    seed: u64,
    /// Current maze.
    grid: Grid,
    /// Player position and steps.
    player: PlayerState,
    /// Goal cell.
    goal: Position,
    /// Walls the player has bumped into.
    revealed: WallRevealTracker,
    /// Current phase.
    phase: Phase,
    /// Last hint computed, until dismissed or superseded.
    hint: Option<Vec<Position>>,
    /// Outcome of the last win, while in [`Phase::Won`].
    last_win: Option<WinSummary>,
    /// Best scores and history.
    records: ScoreBook,
    /// Timestamp source for history entries.
    clock: Box<dyn Clock>,
}

impl std::fmt::Debug for GameSession {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("GameSession")
            .field("seed", &self.seed)
            .field("dimensions", &self.grid.dimensions())
            .field("player", &self.player)
            .field("goal", &self.goal)
            .field("phase", &self.phase)
            .field("records", &self.records)
            .finish_non_exhaustive()
    }
}

impl GameSession {
    /// Starts a session and generates its first maze.
    ///
    /// # Errors
    ///
    /// Returns [`MazeError::InvalidDimensions`] for an unsupported size.
    pub fn new(
        rows: usize,
        cols: usize,
        seed: u64,
        store: Box<dyn Store>,
        clock: Box<dyn Clock>,
    ) -> Result<Self, MazeError> {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let grid = generate_maze(rows, cols, &mut rng)?;
        let dimensions = grid.dimensions();
        let mut records = ScoreBook::load(store);
        records.load_best(dimensions);

        info!(rows, cols, seed, "session started");

        Ok(Self {
            rng,
            seed,
            grid,
            player: PlayerState::at(START),
            goal: dimensions.far_corner(),
            revealed: WallRevealTracker::new(dimensions),
            phase: Phase::starting_at(dimensions.far_corner()),
            hint: None,
            last_win: None,
            records,
            clock,
        })
    }

    /// Replaces the maze with a freshly generated one and starts over.
    ///
    /// On error the current maze and attempt are left untouched.
    ///
    /// # Errors
    ///
    /// Returns [`MazeError::InvalidDimensions`] for an unsupported size.
    pub fn new_maze(&mut self, rows: usize, cols: usize) -> Result<(), MazeError> {
        let grid = generate_maze(rows, cols, &mut self.rng)?;
        let dimensions = grid.dimensions();

        self.grid = grid;
        self.goal = dimensions.far_corner();
        self.revealed = WallRevealTracker::new(dimensions);
        self.player = PlayerState::at(START);
        self.phase = Phase::starting_at(self.goal);
        self.hint = None;
        self.last_win = None;
        self.records.load_best(dimensions);

        info!(rows, cols, "new maze");

        Ok(())
    }

    /// Generates a new maze of the current size.
    pub fn regenerate(&mut self) {
        self.grid = generate_grid(self.grid.dimensions(), &mut self.rng);
        self.restart();
        self.hint = None;
    }

    /// Sends the player back to the start of the same maze.
    ///
    /// Discovered walls are forgotten and must be found again.
    pub fn restart(&mut self) {
        self.player = PlayerState::at(START);
        self.revealed.clear();
        self.phase = Phase::starting_at(self.goal);
        self.last_win = None;
    }

    /// Attempts a move.
    ///
    /// Returns `None` without touching anything once the maze is won. Reaching the goal moves the
    /// session to [`Phase::Won`] and records the attempt.
    pub fn move_player(&mut self, direction: Direction) -> Option<MoveOutcome> {
        if self.phase == Phase::Won {
            return None;
        }

        let outcome = resolve_move(
            &self.grid,
            &mut self.player,
            self.goal,
            direction,
            &mut self.revealed,
        );

        if outcome.goal_reached() {
            let dimensions = self.grid.dimensions();
            let summary = self.records.record_win(HistoryEntry {
                timestamp: self.clock.now_millis(),
                steps: self.player.steps,
                rows: dimensions.rows(),
                cols: dimensions.cols(),
            });
            info!(steps = summary.steps, best = summary.best, "goal reached");
            self.phase = Phase::Won;
            self.last_win = Some(summary);
        }

        Some(outcome)
    }

    /// Computes the shortest path from the player to the goal.
    ///
    /// The path is kept as the pending hint until dismissed or superseded. Discovered walls and the
    /// player are left alone.
    ///
    /// # Errors
    ///
    /// Returns [`MazeError::InconsistentMaze`] if the grid is broken.
    pub fn hint(&mut self) -> Result<&[Position], MazeError> {
        let path = find_path(&self.grid, self.player.position, self.goal)?;
        let pending = self.hint.insert(path);
        Ok(pending.as_slice())
    }

    /// Drops the pending hint.
    pub fn dismiss_hint(&mut self) {
        self.hint = None;
    }

    /// Forgets the win history.
    pub fn clear_history(&mut self) {
        self.records.clear_history();
    }

    /// Current maze.
    #[must_use]
    pub const fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Size of the current maze.
    #[must_use]
    pub const fn dimensions(&self) -> Dimensions {
        self.grid.dimensions()
    }

    /// Player position and steps.
    #[must_use]
    pub const fn player(&self) -> PlayerState {
        self.player
    }

    /// Steps taken in the current attempt.
    #[must_use]
    pub const fn steps(&self) -> u32 {
        self.player.steps
    }

    /// Goal cell.
    #[must_use]
    pub const fn goal(&self) -> Position {
        self.goal
    }

    /// Current phase.
    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    /// Walls discovered in the current attempt.
    #[must_use]
    pub const fn revealed_walls(&self) -> &WallRevealTracker {
        &self.revealed
    }

    /// Pending hint path, if any.
    #[must_use]
    pub fn pending_hint(&self) -> Option<&[Position]> {
        self.hint.as_deref()
    }

    /// Summary of the win that ended the current attempt.
    #[must_use]
    pub const fn last_win(&self) -> Option<WinSummary> {
        self.last_win
    }

    /// Best score for the current maze size.
    #[must_use]
    pub fn best(&self) -> Option<u32> {
        self.records.best(self.grid.dimensions())
    }

    /// Recent wins, newest first.
    #[must_use]
    pub fn history(&self) -> &[HistoryEntry] {
        self.records.history()
    }

    /// Seed the session's random source was created from.
    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.seed
    }
}
