// TUI widget modules for each dashboard panel.

pub mod available;
pub mod confirm;
pub mod draft_board;
pub mod roster;
pub mod setup;
pub mod status_bar;
