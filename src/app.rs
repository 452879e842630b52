//! Core application state and logic for the maze game.

use std::time::Instant;

use color_eyre::eyre::Result;
use ratatui::DefaultTerminal;
use tracing::warn;

use crate::{
    config::{Cli, MAX_PLAYABLE_SIDE, MIN_PLAYABLE_SIDE},
    events,
    feedback::Flash,
    maze::{Direction, Position},
    movement::MoveOutcome,
    play::GameSession,
    records::SystemClock,
    types::{MainMenuItem, OptionsMenuItem, Screen},
    ui,
};

/// Application state container for the maze game.
///
/// This structure holds the state of the application, which is to say the structure from which
/// Ratatui will render the game and Crossterm events will help writing to.
pub struct App {
    /// Application exit flag.
    ///
    /// This field indicates whether the application should exit. It is set to `true` when the user
    /// wants to quit the game but it starts off `false`.
    pub(crate) exit: bool,
    /// Current screen being displayed to the user.
    ///
    /// This field holds the current screen of the game. It is used to determine which screen to
    /// render and what actions to take based on user input.
    pub(crate) screen: Screen,
    /// Game engine state.
    ///
    /// This field holds the maze, the player, the discovered walls and the score records.
    pub(crate) session: GameSession,
    /// Rows chosen in the options menu.
    ///
    /// This field only takes effect the next time a maze is generated.
    pub(crate) rows: u16,
    /// Columns chosen in the options menu.
    pub(crate) cols: u16,
    /// Cell highlighted after the last bump, with its timer.
    pub(crate) bump: Option<(Position, Flash)>,
    /// Timer of the hint currently on screen.
    ///
    /// The path itself lives in the session as its pending hint. When this timer runs out the hint
    /// is dismissed.
    pub(crate) hint: Option<Flash>,
    /// Status message shown under the maze.
    pub(crate) message: Option<String>,
}

impl std::fmt::Debug for App {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("App")
            .field("exit", &self.exit)
            .field("screen", &self.screen)
            .field("session", &self.session)
            .field("rows", &self.rows)
            .field("cols", &self.cols)
            .finish_non_exhaustive()
    }
}

impl App {
    /// Creates a new instance of the App structure from the command line configuration.
    ///
    /// # Errors
    ///
    /// This function may return errors if the configured maze size is not supported by the engine.
    pub fn new(cli: &Cli) -> Result<Self> {
        let session = GameSession::new(
            cli.rows.into(),
            cli.cols.into(),
            cli.seed_or_random(),
            cli.open_store(),
            Box::new(SystemClock),
        )?;

        Ok(Self {
            exit: false,
            screen: Screen::MainMenu(MainMenuItem::StartGame),
            session,
            rows: cli.rows,
            cols: cli.cols,
            bump: None,
            hint: None,
            message: None,
        })
    }

    /// Runs the main loop of the application.
    ///
    /// This function handles user input and updates the application state. The loop continues until
    /// the exit condition is `true`, after which the function returns to the call site.
    ///
    /// # Errors
    ///
    /// - [`std::io::Error`]
    pub fn run(&mut self, terminal: &mut DefaultTerminal) -> Result<()> {
        while !self.exit {
            let _ = terminal.try_draw(|frame| {
                ui::draw(self, frame).map_err(std::io::Error::other)
            })?;
            events::handle_events(self)?;
            self.tick(Instant::now());
        }

        Ok(())
    }

    /// Expires the transient cues whose timers ran out.
    pub(crate) fn tick(&mut self, now: Instant) {
        if self.bump.is_some_and(|(_, flash)| flash.is_expired_at(now)) {
            self.bump = None;
        }
        if self.hint.is_some_and(|flash| flash.is_expired_at(now)) {
            self.hint = None;
            self.session.dismiss_hint();
        }
    }

    /// Attempts a move and records the feedback it produces.
    pub(crate) fn move_player(&mut self, direction: Direction) {
        let from = self.session.player().position;

        match self.session.move_player(direction) {
            Some(MoveOutcome::Bumped(_)) => {
                self.bump = Some((from, Flash::bump()));
            }
            Some(MoveOutcome::Moved {
                goal_reached: true, ..
            }) => {
                self.message = self.session.last_win().map(|win| {
                    if win.new_best {
                        format!("Goal reached in {} steps, a new best!", win.steps)
                    } else {
                        format!("Goal reached in {} steps (best {}).", win.steps, win.best)
                    }
                });
            }
            Some(MoveOutcome::Moved { .. }) | None => {}
        }
    }

    /// Shows the shortest path to the goal for a few seconds.
    ///
    /// A new request replaces the hint already on screen and restarts its timer.
    pub(crate) fn request_hint(&mut self) {
        match self.session.hint() {
            Ok(_) => self.hint = Some(Flash::hint()),
            Err(err) => {
                warn!(%err, "hint unavailable");
                self.message = Some(err.to_string());
            }
        }
    }

    /// Generates a maze of the size chosen in the options menu.
    pub(crate) fn new_maze(&mut self) {
        match self.session.new_maze(self.rows.into(), self.cols.into()) {
            Ok(()) => self.clear_feedback(),
            Err(err) => self.message = Some(err.to_string()),
        }
    }

    /// Restarts the current maze, forgetting discovered walls.
    pub(crate) fn restart(&mut self) {
        self.session.restart();
        self.bump = None;
        self.message = None;
    }

    /// Changes the pending maze size for the selected options entry.
    pub(crate) fn adjust_size(&mut self, item: OptionsMenuItem, increase: bool) {
        let side = match item {
            OptionsMenuItem::Rows => &mut self.rows,
            OptionsMenuItem::Cols => &mut self.cols,
            OptionsMenuItem::Back => return,
        };

        *side = if increase {
            side.saturating_add(1).min(MAX_PLAYABLE_SIDE)
        } else {
            side.saturating_sub(1).max(MIN_PLAYABLE_SIDE)
        };
    }

    /// Drops every transient cue.
    fn clear_feedback(&mut self) {
        self.bump = None;
        self.hint = None;
        self.message = None;
    }
}
