//! Rust How CLI Library
//!
//! This crate provides the command-line interface for rust-how: it loads the
//! commands an LLM suggested, lets the user pick one, customize its
//! parameters on a live highlighted preview, and then runs or copies it.
//!
//! # Key Features
//!
//! - **Interactive Command Selection**: Terminal-based list of the candidate commands
//! - **Live Customization**: Edit detected parameters in place, cycle suggestions, paste
//! - **Presets**: Fill parameters from the command line with `-p key=value`
//! - **Command Confirmation**: Safety warnings and a confirmation before execution
//! - **Plain Output**: A numbered parameter table when no terminal is attached
//!
//! # Architecture
//!
//! - [`cli_args`]: Command-line argument parsing
//! - [`arguments`]: Preset processing
//! - [`command_selection`]: Candidate list, colors and run confirmation
//! - [`customization`]: The customization screen and its event loop
//! - [`terminal`]: Scoped raw mode / alternate screen setup
//! - [`clipboard`]: The system clipboard
//!
//! # Examples
//!
//! The CLI binary (`how`) can be used in several ways:
//!
//! ```bash
//! # Pick from the commands in a response file
//! how --response-file response.json
//!
//! # Customize a single command given as words
//! how ffmpeg -i input.mp4 -ss 00:00:05 output.mp4
//!
//! # Preset the second parameter and only print the result
//! how --dry-run -p 2=00:01:00 ffmpeg -i input.mp4 -ss 00:00:05 output.mp4
//!
//! # Read the response from stdin and list parameters without a UI
//! llm-parse | how --list -r -
//! ```

pub mod arguments;
pub mod cli_args;
pub mod clipboard;
pub mod command_selection;
pub mod customization;
pub mod terminal;
