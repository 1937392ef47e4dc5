//! Command-line argument parsing.
//!
//! This module defines the command-line interface structure using the
//! `clap` crate.

use clap::Parser;
use rust_how_core::command_definitions::CommandCandidate;
use rust_how_core::error::{Error, Result};
use rust_how_core::file_handling;

/// Command-line arguments for the `how` binary.
///
/// Candidate commands come either from a response file or from the trailing
/// words, which form a single candidate.
///
/// # Examples
///
/// ```rust
/// use clap::Parser;
/// use rust_how_cli::cli_args::Args;
///
/// let args = Args::parse_from(["how", "-d", "ffmpeg", "-i", "in.mp4", "out.gif"]);
/// assert!(args.dry_run);
/// assert_eq!(args.command, vec!["ffmpeg", "-i", "in.mp4", "out.gif"]);
/// ```
#[derive(Parser, Debug)] // requires `derive` feature
#[command(term_width = 0)] // Just to make testing across clap features easier
#[allow(clippy::struct_excessive_bools)] // silence clippy's warning on this struct
pub struct Args {
    /// Path to the settings YAML.
    ///
    /// If not provided, defaults to `~/.rust-how/config.yml`.
    #[arg(long, short = 'c')]
    pub config_path: Option<String>,

    /// Path to a JSON or YAML file holding the suggested commands, `-` for stdin.
    #[arg(long, short = 'r')]
    pub response_file: Option<String>,

    /// 1-based candidate to customize, skipping the selection list.
    #[arg(long, short = 'n')]
    pub choice: Option<usize>,

    /// Perform a dry run, which just prints out the command but does not execute it.
    #[arg(long, short = 'd', action)]
    pub dry_run: bool,

    /// Run the command without first confirming if the command should be run.
    #[arg(long, short = 'f', action)]
    pub force: bool,

    /// Print the detected parameters instead of opening the interactive editor.
    #[arg(long, short = 'l', action)]
    pub list: bool,

    /// Preset parameter values in the format key=value.
    ///
    /// The key is a 1-based parameter index or a parameter name. Multiple
    /// presets can be provided with repeated `-p` flags.
    ///
    /// # Examples
    /// ```bash
    /// how -p 1=clip.mov -p "start time=00:01:00" -r response.json
    /// ```
    #[arg(long = "param", short = 'p', action = clap::ArgAction::Append)]
    pub parameters: Vec<String>,

    /// A command to customize, given as trailing words.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub command: Vec<String>,
}

impl Args {
    /// Loads the candidate commands named by the arguments.
    ///
    /// # Errors
    ///
    /// Returns an error if both or neither of a response file and command
    /// words are given, or if the response file cannot be loaded.
    pub fn candidates(&self) -> Result<Vec<CommandCandidate>> {
        match (&self.response_file, CommandCandidate::from_words(&self.command)) {
            (Some(_), Some(_)) => Err(Error::Misc(
                "Give either a response file or a command, not both".to_string(),
            )),
            (Some(path), None) => file_handling::load_candidates(path),
            (None, Some(candidate)) => Ok(vec![candidate]),
            (None, None) => Err(Error::Misc(
                "Nothing to customize: pass --response-file or a command".to_string(),
            )),
        }
    }

    /// Converts `--choice` to a 0-based index into `candidates`.
    ///
    /// # Errors
    ///
    /// Returns an error if the choice is out of range.
    pub fn choice_index(&self, candidate_count: usize) -> Result<Option<usize>> {
        match self.choice {
            None => Ok(None),
            Some(choice) if (1..=candidate_count).contains(&choice) => Ok(Some(choice - 1)),
            Some(choice) => Err(Error::Misc(format!(
                "Command index out of range: {choice}! There are {candidate_count} commands."
            ))),
        }
    }
}
