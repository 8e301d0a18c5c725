//! TUI module for the interactive filter menu.
//!
//! Uses `ratatui` + `crossterm` for rendering.

mod filter_menu;
/// Filter options panel state.
pub mod filter_options;
mod ui;

pub use filter_menu::{MenuExit, run_filter_menu};
