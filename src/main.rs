//! This crate contains the source code for the binary for the game invisible-wall.

#![expect(
    clippy::cargo_common_metadata,
    reason = "Temporary allow during development."
)]
#![expect(
    unused_crate_dependencies,
    reason = "The dependencies are used in the library crate."
)]

use clap::Parser as _;
use color_eyre::{eyre::Result, install};
use invisible_wall::{
    config::{init_logging, Cli},
    App,
};

fn main() -> Result<()> {
    install()?;

    let cli = Cli::parse();
    init_logging(&cli)?;
    let mut app = App::new(&cli)?;

    let mut terminal = ratatui::init();
    let result = app.run(&mut terminal);
    ratatui::restore();

    result
}
