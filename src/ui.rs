//! User interface rendering functions for all application screens.

use std::rc::Rc;

use color_eyre::eyre::{OptionExt as _, Result};
use ratatui::{
    layout::{Alignment, Constraint, Flex, Layout, Rect},
    style::{Color, Style},
    text::Line,
    widgets::{Block, BorderType, Clear, Paragraph},
    Frame,
};

use crate::{
    maze::{Direction, Position},
    play::{GameSession, Phase},
    records::HistoryEntry,
    types::{MainMenuItem, MenuType, OptionsMenuItem, Screen},
    App,
};

/// Width of a cell interior in terminal columns.
const CELL_WIDTH: usize = 3;

/// Updates the application UI based on the persistent state.
///
/// This function renders different screens based on the current state stored in the [`App`]
/// structure, dispatching to the appropriate rendering function for each screen type.
///
/// # Errors
///
/// This function may return errors from layout lookups or size conversion failures.
pub(crate) fn draw(app: &App, frame: &mut Frame) -> Result<()> {
    match app.screen {
        Screen::MainMenu(item) => main_menu(frame, item),
        Screen::OptionsMenu(item) => options_menu(app, frame, item),
        Screen::InGame => in_game(app, frame)?,
        Screen::History => history(app, frame)?,
    }

    Ok(())
}

/// Clears the terminal screen by rendering a [`Clear`] widget.
///
/// This function renders a clear widget over the entire area of the frame to prepare for
/// rendering new content without artifacts from previous buffers rendered on the same frame.
pub(crate) fn clear(frame: &mut Frame) {
    let clear = Clear;
    frame.render_widget(clear, frame.area());
}

/// Renders the generic layout structure for the main and options menus.
///
/// This function creates the common layout and block structure used by both menus. The generic part
/// includes the centered positioning and border styling, while the specific menu content is handled
/// by the caller using the [`MenuType`] parameter.
#[expect(
    clippy::indexing_slicing,
    reason = "The collection is created in-place with few, known elements; there is no risk of bad indexing."
)]
pub(crate) fn init_menu(frame: &mut Frame, menu: &MenuType) -> Rc<[Rect]> {
    let space = Layout::vertical([
        Constraint::Percentage(40),
        Constraint::Percentage(20),
        Constraint::Percentage(40),
    ])
    .split(frame.area())[1];
    let space = Layout::horizontal([
        Constraint::Percentage(35),
        Constraint::Percentage(30),
        Constraint::Percentage(35),
    ])
    .split(space)[1];

    let layout = Layout::vertical([Constraint::Max(u16::from(menu.value() + 2))])
        .flex(Flex::Center)
        .split(space)[0];

    let block = Block::bordered()
        .title(menu.repr())
        .title_bottom(menu.help())
        .title_alignment(Alignment::Center)
        .style(Color::Green)
        .border_type(BorderType::Rounded);

    let inner_space = block.inner(layout);

    frame.render_widget(block, layout);

    Layout::vertical(vec![Constraint::Max(1); usize::from(menu.value())]).split(inner_space)
}

/// Renders a list of menu entries, highlighting the selected one.
fn render_entries(frame: &mut Frame, areas: &[Rect], entries: &[(String, bool)]) {
    let content_style = Style::default().fg(Color::Green);
    let active_content_style = Style::default().fg(Color::White).bg(Color::Green);

    for (area, (label, active)) in areas.iter().zip(entries) {
        let style = if *active {
            active_content_style
        } else {
            content_style
        };
        frame.render_widget(Line::raw(label.as_str()).centered().style(style), *area);
    }
}

/// Renders the main menu screen with navigation options.
///
/// This function displays the main menu with options for "Start Game", "Options", and "Quit". It
/// highlights the currently selected option.
pub(crate) fn main_menu(frame: &mut Frame, item: MainMenuItem) {
    clear(frame);

    let inner_layout = init_menu(frame, &MenuType::MainMenu(3));

    render_entries(
        frame,
        &inner_layout,
        &[
            ("Start Game".to_owned(), item == MainMenuItem::StartGame),
            ("Options".to_owned(), item == MainMenuItem::Options),
            ("Quit".to_owned(), item == MainMenuItem::Quit),
        ],
    );
}

/// Renders the options menu screen with the maze size choices.
///
/// This function displays the pending row and column counts and a "Return" entry, which applies
/// them.
pub(crate) fn options_menu(app: &App, frame: &mut Frame, item: OptionsMenuItem) {
    clear(frame);

    let inner_layout = init_menu(frame, &MenuType::OptionsMenu(3));

    render_entries(
        frame,
        &inner_layout,
        &[
            (format!("Rows: {}", app.rows), item == OptionsMenuItem::Rows),
            (format!("Cols: {}", app.cols), item == OptionsMenuItem::Cols),
            ("Return".to_owned(), item == OptionsMenuItem::Back),
        ],
    );
}

/// Builds the text rows depicting the maze as the player knows it.
///
/// Corners are always drawn, but walls only appear once revealed. The player is `@`, the goal `G`
/// and cells on the hint path `*`.
pub(crate) fn maze_lines(session: &GameSession, hint: Option<&[Position]>) -> Vec<String> {
    let dimensions = session.dimensions();
    let revealed = session.revealed_walls();
    let player = session.player().position;
    let goal = session.goal();
    let on_hint = |position: Position| hint.is_some_and(|path| path.contains(&position));

    let horizontal = |row: usize, direction: Direction| {
        let mut line = String::from("+");
        for col in 0..dimensions.cols() {
            let segment = if revealed.is_revealed(Position::new(row, col), direction) {
                "-"
            } else {
                " "
            };
            line.push_str(&segment.repeat(CELL_WIDTH));
            line.push('+');
        }
        line
    };

    let mut lines = Vec::with_capacity(dimensions.rows() * 2 + 1);
    for row in 0..dimensions.rows() {
        lines.push(horizontal(row, Direction::North));

        let mut line = String::new();
        for col in 0..dimensions.cols() {
            let position = Position::new(row, col);
            line.push(if revealed.is_revealed(position, Direction::West) {
                '|'
            } else {
                ' '
            });
            let marker = if position == player {
                '@'
            } else if position == goal {
                'G'
            } else if on_hint(position) {
                '*'
            } else {
                ' '
            };
            line.push(' ');
            line.push(marker);
            line.push(' ');
        }
        let last = Position::new(row, dimensions.cols() - 1);
        line.push(if revealed.is_revealed(last, Direction::East) {
            '|'
        } else {
            ' '
        });
        lines.push(line);
    }
    lines.push(horizontal(dimensions.rows() - 1, Direction::South));

    lines
}

/// Builds the status line shown under the maze.
pub(crate) fn status_line(app: &App) -> String {
    let best = app
        .session
        .best()
        .map_or_else(|| "-".to_owned(), |best| best.to_string());
    let mut status = format!("Steps: {}  Best: {best}", app.session.steps());

    if let Some(message) = &app.message {
        status.push_str("  ");
        status.push_str(message);
    } else if app.session.phase() == Phase::Won {
        status.push_str("  You reached the goal!");
    }

    status
}

/// Renders the in-game screen with the partially revealed maze.
///
/// This function draws the maze as known to the player, the hint path while its timer runs, and a
/// status block with the step count and best score. The border flashes red right after a bump.
///
/// # Errors
///
/// This function may return errors from size conversion operations or layout lookups.
pub(crate) fn in_game(app: &App, frame: &mut Frame) -> Result<()> {
    clear(frame);

    let hint = app.hint.and(app.session.pending_hint());
    let lines = maze_lines(&app.session, hint);
    let maze_height = u16::try_from(lines.len())?;
    let maze_width = u16::try_from(
        lines
            .first()
            .ok_or_eyre("failed to retrieve first maze row")?
            .len(),
    )?;

    // Create overall layout: maze area + tooltip at bottom
    let overall_layout =
        Layout::vertical([Constraint::Min(1), Constraint::Length(3)]).split(frame.area());
    let maze_content_area = *overall_layout
        .first()
        .ok_or_eyre("failed to get maze content area from layout")?;
    let tooltip_area = *overall_layout
        .last()
        .ok_or_eyre("failed to get tooltip area from layout")?;

    let maze_area = centered(maze_content_area, maze_width + 2, maze_height + 2)?;

    let border_color = if app.bump.is_some() {
        Color::Red
    } else if app.session.phase() == Phase::Won {
        Color::Yellow
    } else {
        Color::Green
    };
    let block = Block::bordered()
        .title_top(format!(
            "{}x{} maze",
            app.session.dimensions().rows(),
            app.session.dimensions().cols()
        ))
        .title_alignment(Alignment::Center)
        .style(border_color)
        .border_type(BorderType::Rounded);

    let maze = Paragraph::new(lines.into_iter().map(Line::raw).collect::<Vec<_>>())
        .style(Style::default().fg(Color::Green))
        .block(block);
    frame.render_widget(maze, maze_area);

    let tooltip = Paragraph::new(vec![
        Line::raw(status_line(app)).centered(),
        Line::raw("(arrows) move / (s) hint / (r) restart / (n) new / (t) history / (h) back")
            .centered(),
    ])
    .style(Style::default().fg(Color::Green));
    frame.render_widget(tooltip, tooltip_area);

    Ok(())
}

/// Formats one history entry for display.
pub(crate) fn history_line(entry: &HistoryEntry) -> String {
    let date = entry.recorded_at().map_or_else(
        || "unknown date".to_owned(),
        |date| date.format("%Y-%m-%d %H:%M").to_string(),
    );

    format!(
        "{date}  Steps: {}  {}x{}",
        entry.steps, entry.rows, entry.cols
    )
}

/// Average step count over the history, rounded to the nearest step.
///
/// # Errors
///
/// This function may return errors if the totals do not fit the arithmetic type.
pub(crate) fn average_steps(entries: &[HistoryEntry]) -> Result<Option<i32>> {
    if entries.is_empty() {
        return Ok(None);
    }

    let total = entries
        .iter()
        .map(|entry| i32::try_from(entry.steps))
        .sum::<Result<i32, _>>()?;

    Ok(Some(rounded_div::i32(total, i32::try_from(entries.len())?)))
}

/// Renders the list of recent wins.
///
/// # Errors
///
/// This function may return errors from size conversion operations or layout lookups.
pub(crate) fn history(app: &App, frame: &mut Frame) -> Result<()> {
    clear(frame);

    let entries = app.session.history();
    let mut lines: Vec<Line> = if entries.is_empty() {
        vec![Line::raw("No attempts yet.").centered()]
    } else {
        entries
            .iter()
            .map(|entry| Line::raw(history_line(entry)))
            .collect()
    };
    if let Some(average) = average_steps(entries)? {
        lines.push(Line::raw(""));
        lines.push(Line::raw(format!("Average steps: {average}")).centered());
    }

    let height = u16::try_from(lines.len())? + 2;
    let area = centered(frame.area(), 48, height)?;
    let block = Block::bordered()
        .title_top(format!("History (last {})", entries.len()))
        .title_bottom("(c) clear / (t) or (h) return")
        .title_alignment(Alignment::Center)
        .style(Color::Green)
        .border_type(BorderType::Rounded);

    frame.render_widget(Paragraph::new(lines).block(block), area);

    Ok(())
}

/// Centers a `width` by `height` rectangle inside `area`.
///
/// # Errors
///
/// This function may return errors if the layout does not yield the middle cell.
fn centered(area: Rect, width: u16, height: u16) -> Result<Rect> {
    let column = Layout::vertical([
        Constraint::Min(0),
        Constraint::Length(height),
        Constraint::Min(0),
    ])
    .split(area)
    .get(1)
    .copied()
    .ok_or_eyre("failed to get centered row from vertical layout")?;

    Layout::horizontal([
        Constraint::Min(0),
        Constraint::Length(width),
        Constraint::Min(0),
    ])
    .split(column)
    .get(1)
    .copied()
    .ok_or_eyre("failed to get centered column from horizontal layout")
}

#[cfg(test)]
mod tests {
    use ratatui::{backend::TestBackend, Terminal};

    use super::*;
    use crate::{
        config::Cli,
        play::START,
        records::Clock,
        storage::MemoryStore,
    };

    /// Clock frozen at the Unix epoch.
    struct EpochClock;

    impl Clock for EpochClock {
        fn now_millis(&self) -> i64 {
            0
        }
    }

    fn session(rows: usize, cols: usize) -> GameSession {
        GameSession::new(
            rows,
            cols,
            1,
            Box::new(MemoryStore::new()),
            Box::new(EpochClock),
        )
        .expect("session should start")
    }

    fn test_app() -> App {
        let cli = Cli {
            seed: Some(5),
            no_persist: true,
            ..Cli::default()
        };
        App::new(&cli).expect("app should start")
    }

    #[test]
    fn test_fresh_maze_shows_no_walls() {
        let game = session(2, 3);

        let lines = maze_lines(&game, None);

        assert_eq!(
            lines,
            vec![
                "+   +   +   +",
                "  @          ",
                "+   +   +   +",
                "          G  ",
                "+   +   +   +",
            ]
        );
    }

    #[test]
    fn test_revealed_border_walls_are_drawn() {
        let mut game = session(2, 2);
        let _ = game.move_player(Direction::North);
        let _ = game.move_player(Direction::West);

        let lines = maze_lines(&game, None);

        assert_eq!(lines.first().map(String::as_str), Some("+---+   +"));
        assert_eq!(lines.get(1).map(String::as_str), Some("| @      "));
    }

    #[test]
    fn test_hint_cells_are_marked() {
        let mut game = session(3, 3);
        let path = game.hint().expect("hint should exist").to_vec();

        let lines = maze_lines(&game, Some(path.as_slice()));
        let stars = lines
            .iter()
            .map(|line| line.matches('*').count())
            .sum::<usize>();

        // Start and goal keep their own markers.
        assert_eq!(stars, path.len() - 2);
        assert_eq!(path.first().copied(), Some(START));
    }

    #[test]
    fn test_history_formatting_and_average() {
        let entry = |steps| HistoryEntry {
            timestamp: 0,
            steps,
            rows: 7,
            cols: 7,
        };
        let entries = [entry(10), entry(15), entry(15)];

        assert_eq!(
            entries.first().map(history_line).as_deref(),
            Some("1970-01-01 00:00  Steps: 10  7x7")
        );
        assert_eq!(average_steps(&entries).expect("average should fit"), Some(13));
        assert_eq!(average_steps(&[]).expect("empty average should fit"), None);
    }

    #[test]
    fn test_status_line_shows_steps_and_best() {
        let app = test_app();

        assert_eq!(status_line(&app), "Steps: 0  Best: -");
    }

    #[test]
    fn test_every_screen_draws() {
        let mut app = test_app();
        let mut terminal = Terminal::new(TestBackend::new(100, 40)).expect("terminal should build");

        for screen in [
            Screen::MainMenu(MainMenuItem::Options),
            Screen::OptionsMenu(OptionsMenuItem::Cols),
            Screen::InGame,
            Screen::History,
        ] {
            app.screen = screen;
            let _ = terminal
                .try_draw(|frame| draw(&app, frame).map_err(std::io::Error::other))
                .expect("screen should draw");
        }
    }
}
