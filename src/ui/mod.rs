pub mod cli;
pub mod tui;

pub use cli::{Cli, Command, parse_assignment};
pub use tui::run_tui;
