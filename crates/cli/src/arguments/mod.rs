//! Parameter presets given on the command line.
//!
//! Presets pre-fill edits before a customization session opens:
//! - **By index**: `-p 2=clip.mov` edits the second detected parameter
//! - **By name**: `-p "start time=00:01:00"` matches a parameter name,
//!   ignoring case
//!
//! Malformed pairs and keys that match no parameter are errors.

pub mod processing;

pub use processing::{parse_preset, process_presets};
