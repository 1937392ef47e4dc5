//! Rust How Core Library
//!
//! This crate provides the engine behind rust-how, a terminal tool that takes
//! shell commands suggested by an LLM and lets the user inspect, tweak and run
//! one of them.
//!
//! # Key Features
//!
//! - **Parameter Detection**: Find file names, placeholders, paths, flag values
//!   and timecodes a user would want to change, as non-overlapping spans
//! - **Hint Merging**: Fold parameter hints from the LLM response into the
//!   detected set without ever overriding a heuristic match
//! - **Customization Sessions**: A key-driven state machine that edits any
//!   subset of parameters and renders a highlighted live preview
//! - **Candidate Files**: Parse the commands of a JSON or YAML response
//! - **Safety Checks**: Warn about destructive commands before they run
//!
//! # Examples
//!
//! Detecting and editing parameters:
//!
//! ```
//! use rust_how_core::detection::detect_parameters;
//! use rust_how_core::session::{CommitMode, CustomizationSession, Outcome, SessionStart};
//!
//! let base = "ffmpeg -i input.mp4 -ss 00:00:05 output.mp4";
//! let SessionStart::Interactive(mut session) =
//!     CustomizationSession::start(base, detect_parameters(base))
//! else {
//!     unreachable!("the command has parameters");
//! };
//!
//! session.select_prev()?;
//! session.begin_edit(None)?;
//! session.commit_edit("clip.mp4")?;
//!
//! assert_eq!(
//!     session.commit(CommitMode::Execute)?,
//!     Outcome::Commit("ffmpeg -i input.mp4 -ss 00:00:05 clip.mp4".to_string())
//! );
//! # Ok::<(), rust_how_core::error::Error>(())
//! ```

pub mod catalog;
pub mod command_definitions;
pub mod config;
pub mod detection;
pub mod error;
pub mod execution;
pub mod file_handling;
pub mod hints;
pub mod interaction;
pub mod parameters;
pub mod rendering;
pub mod safety;
pub mod session;
pub mod suggestions;
