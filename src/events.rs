//! Event handling functions for user input and application state updates.

use std::time::Duration;

use color_eyre::eyre::Result;
use ratatui::crossterm::event::{self, Event, KeyCode, KeyEventKind};

use crate::{
    maze::Direction,
    types::{MainMenuItem, OptionsMenuItem, Screen},
    App,
};

/// Handles input events and updates the application state accordingly.
///
/// This function polls for keyboard events and dispatches them to [`handle_key`]. It uses a timeout
/// to avoid blocking the UI, so that feedback timers keep expiring while the player is idle.
pub(crate) fn handle_events(app: &mut App) -> Result<()> {
    if event::poll(Duration::from_millis(100))? {
        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                handle_key(app, key.code);
            }
        }
    }

    Ok(())
}

/// Dispatches a single key press.
pub(crate) fn handle_key(app: &mut App, code: KeyCode) {
    match code {
        KeyCode::Char('q') => app.exit = true,
        KeyCode::Char('j') => handle_j_events(app),
        KeyCode::Char('k') => handle_k_events(app),
        KeyCode::Char('l') => handle_l_events(app),
        KeyCode::Char('h') => handle_h_events(app),
        KeyCode::Char('+') | KeyCode::Right => handle_size_events(app, true, Direction::East),
        KeyCode::Char('-') | KeyCode::Left => handle_size_events(app, false, Direction::West),
        KeyCode::Up => handle_move_events(app, Direction::North),
        KeyCode::Down => handle_move_events(app, Direction::South),
        KeyCode::Char(other) => handle_game_events(app, other),
        _ => {}
    }
}

/// Handles 'j' key press events for downward navigation.
///
/// This function processes the 'j' key press which is used for moving down in menus.
pub(crate) fn handle_j_events(app: &mut App) {
    match app.screen {
        Screen::MainMenu(MainMenuItem::StartGame) => {
            app.screen = Screen::MainMenu(MainMenuItem::Options);
        }
        Screen::MainMenu(MainMenuItem::Options) => {
            app.screen = Screen::MainMenu(MainMenuItem::Quit);
        }
        Screen::OptionsMenu(OptionsMenuItem::Rows) => {
            app.screen = Screen::OptionsMenu(OptionsMenuItem::Cols);
        }
        Screen::OptionsMenu(OptionsMenuItem::Cols) => {
            app.screen = Screen::OptionsMenu(OptionsMenuItem::Back);
        }
        _ => {}
    }
}

/// Handles 'k' key press events for upward navigation.
///
/// This function processes the 'k' key press which is used for moving up in menus.
pub(crate) fn handle_k_events(app: &mut App) {
    match app.screen {
        Screen::MainMenu(MainMenuItem::Quit) => {
            app.screen = Screen::MainMenu(MainMenuItem::Options);
        }
        Screen::MainMenu(MainMenuItem::Options) => {
            app.screen = Screen::MainMenu(MainMenuItem::StartGame);
        }
        Screen::OptionsMenu(OptionsMenuItem::Back) => {
            app.screen = Screen::OptionsMenu(OptionsMenuItem::Cols);
        }
        Screen::OptionsMenu(OptionsMenuItem::Cols) => {
            app.screen = Screen::OptionsMenu(OptionsMenuItem::Rows);
        }
        _ => {}
    }
}

/// Handles 'l' key press events for selection and forward navigation.
///
/// This function processes the 'l' key press which is used for selecting menu items. Leaving the
/// options menu applies the chosen size if it differs from the current maze.
pub(crate) fn handle_l_events(app: &mut App) {
    match app.screen {
        Screen::MainMenu(MainMenuItem::StartGame) => {
            app.screen = Screen::InGame;
        }
        Screen::MainMenu(MainMenuItem::Options) => {
            app.screen = Screen::OptionsMenu(OptionsMenuItem::Rows);
        }
        Screen::MainMenu(MainMenuItem::Quit) => {
            app.exit = true;
        }
        Screen::OptionsMenu(OptionsMenuItem::Back) => {
            let dimensions = app.session.dimensions();
            if dimensions.rows() != usize::from(app.rows) || dimensions.cols() != usize::from(app.cols)
            {
                app.new_maze();
            }
            app.screen = Screen::MainMenu(MainMenuItem::StartGame);
        }
        _ => {}
    }
}

/// Handles 'h' key press events for backward navigation.
///
/// This function processes the 'h' key press which is used for returning to previous screens: from
/// the game to the main menu and from the history back to the game.
pub(crate) fn handle_h_events(app: &mut App) {
    match app.screen {
        Screen::InGame => {
            app.screen = Screen::MainMenu(MainMenuItem::StartGame);
        }
        Screen::History => {
            app.screen = Screen::InGame;
        }
        _ => {}
    }
}

/// Handles size changes in the options menu, and horizontal moves in game.
pub(crate) fn handle_size_events(app: &mut App, increase: bool, direction: Direction) {
    match app.screen {
        Screen::OptionsMenu(item) => app.adjust_size(item, increase),
        Screen::InGame => app.move_player(direction),
        _ => {}
    }
}

/// Handles arrow key moves while in game.
pub(crate) fn handle_move_events(app: &mut App, direction: Direction) {
    if app.screen == Screen::InGame {
        app.move_player(direction);
    }
}

/// Handles the in-game and history command keys.
pub(crate) fn handle_game_events(app: &mut App, key: char) {
    match (app.screen, key) {
        (Screen::InGame, 'n') => app.new_maze(),
        (Screen::InGame, 'r') => app.restart(),
        (Screen::InGame, 's') => app.request_hint(),
        (Screen::InGame, 't') => app.screen = Screen::History,
        (Screen::History, 't') => app.screen = Screen::InGame,
        (Screen::History, 'c') => app.session.clear_history(),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::Cli, maze::Position};

    fn test_app() -> App {
        let cli = Cli {
            seed: Some(3),
            no_persist: true,
            ..Cli::default()
        };
        App::new(&cli).expect("app should start")
    }

    #[test]
    fn test_menu_navigation_reaches_game() {
        let mut app = test_app();

        handle_key(&mut app, KeyCode::Char('j'));
        assert_eq!(app.screen, Screen::MainMenu(MainMenuItem::Options));
        handle_key(&mut app, KeyCode::Char('k'));
        handle_key(&mut app, KeyCode::Char('l'));
        assert_eq!(app.screen, Screen::InGame);
        handle_key(&mut app, KeyCode::Char('h'));
        assert_eq!(app.screen, Screen::MainMenu(MainMenuItem::StartGame));
    }

    #[test]
    fn test_quit_from_menu_and_key() {
        let mut app = test_app();
        handle_key(&mut app, KeyCode::Char('q'));
        assert!(app.exit);

        let mut app = test_app();
        app.screen = Screen::MainMenu(MainMenuItem::Quit);
        handle_key(&mut app, KeyCode::Char('l'));
        assert!(app.exit);
    }

    #[test]
    fn test_options_change_size_on_back() {
        let mut app = test_app();
        app.screen = Screen::OptionsMenu(OptionsMenuItem::Rows);

        handle_key(&mut app, KeyCode::Char('+'));
        handle_key(&mut app, KeyCode::Char('j'));
        handle_key(&mut app, KeyCode::Char('-'));
        handle_key(&mut app, KeyCode::Char('j'));
        handle_key(&mut app, KeyCode::Char('l'));

        assert_eq!(app.session.dimensions().rows(), 8);
        assert_eq!(app.session.dimensions().cols(), 6);
        assert_eq!(app.screen, Screen::MainMenu(MainMenuItem::StartGame));
    }

    #[test]
    fn test_arrows_only_move_in_game() {
        let mut app = test_app();

        handle_key(&mut app, KeyCode::Up);
        assert!(app.session.revealed_walls().is_empty());

        app.screen = Screen::InGame;
        handle_key(&mut app, KeyCode::Up);
        assert!(app
            .session
            .revealed_walls()
            .is_revealed(Position::new(0, 0), Direction::North));
    }

    #[test]
    fn test_game_commands() {
        let mut app = test_app();
        app.screen = Screen::InGame;

        handle_key(&mut app, KeyCode::Char('s'));
        assert!(app.session.pending_hint().is_some());

        handle_key(&mut app, KeyCode::Left);
        handle_key(&mut app, KeyCode::Char('r'));
        assert!(app.session.revealed_walls().is_empty());

        handle_key(&mut app, KeyCode::Char('t'));
        assert_eq!(app.screen, Screen::History);
        handle_key(&mut app, KeyCode::Char('h'));
        assert_eq!(app.screen, Screen::InGame);

        handle_key(&mut app, KeyCode::Char('n'));
        assert!(app.session.pending_hint().is_none());
    }
}
