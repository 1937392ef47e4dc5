//! Interactive command selection and run confirmation.
//!
//! # User Interface
//!
//! The candidate list supports:
//! - Arrow keys, vim-style (j/k) navigation or the mouse wheel
//! - Enter or a mouse click to select a command
//! - Digits 1-9 to select a command directly
//! - '/' to filter commands (fuzzy search, or by index when numeric)
//! - 'q', Escape or Ctrl+C to quit
//!
//! Commands the safety check flags are tinted red.

pub mod colors;
pub mod input;
pub mod types;
pub mod ui;

// Re-exports for convenience
pub use input::{confirm_command_should_run, write_command_summary};
pub use types::{CommandChoice, RunChoice};
pub use ui::prompt_for_command_choice;
