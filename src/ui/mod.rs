//! User-facing surfaces: the clap command line and the ratatui screen.

pub mod cli;
pub mod tui;

pub use cli::{Cli, Command};
pub use tui::run_tui;
