//! Reading settings and candidate command files.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use log::debug;

use crate::command_definitions::{CandidateFile, CommandCandidate};
use crate::config::Settings;
use crate::error::{Error, Result};

/// Path meaning "read the response from standard input".
pub const STDIN_PATH: &str = "-";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseFormat {
    Json,
    Yaml,
}

impl ResponseFormat {
    /// `.json` files are JSON, everything else (stdin included) is YAML.
    pub fn from_path(path: &str) -> Self {
        let is_json = Path::new(path)
            .extension()
            .is_some_and(|e| e.eq_ignore_ascii_case("json"));

        if is_json {
            ResponseFormat::Json
        } else {
            ResponseFormat::Yaml
        }
    }
}

fn get_reader(file_description: &str, path: &str) -> Result<File> {
    File::open(path).map_err(|e| Error::io_error(file_description.to_string(), path.to_string(), e))
}

/// Loads settings, falling back to defaults when the file does not exist.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read, is not valid YAML,
/// or holds invalid key bindings or colors.
pub fn load_settings(config_path: &str) -> Result<Settings> {
    if !Path::new(config_path).exists() {
        debug!("No settings file at `{config_path}`, using defaults");
        return Ok(Settings::default());
    }

    let reader = get_reader("config", config_path)?;
    let settings: Settings = serde_yaml::from_reader(reader).map_err(|e| {
        Error::yaml_error(
            "reading".to_string(),
            "config".to_string(),
            config_path.to_string(),
            e,
        )
    })?;

    settings.validate()?;
    debug!("Loaded settings from `{config_path}`");

    Ok(settings)
}

/// Loads the candidate commands from a response file, or stdin for `-`.
///
/// # Errors
///
/// Returns an error if the source cannot be read or parsed, holds no
/// commands, or holds a blank command.
pub fn load_candidates(path: &str) -> Result<Vec<CommandCandidate>> {
    let mut contents = String::new();

    if path == STDIN_PATH {
        std::io::stdin()
            .read_to_string(&mut contents)
            .map_err(|e| Error::io_error("response".to_string(), "<stdin>".to_string(), e))?;
    } else {
        get_reader("response", path)?
            .read_to_string(&mut contents)
            .map_err(|e| Error::io_error("response".to_string(), path.to_string(), e))?;
    }

    parse_candidates(&contents, ResponseFormat::from_path(path), path)
}

/// Parses and validates response file contents. `path` is only used in errors.
pub fn parse_candidates(
    contents: &str,
    format: ResponseFormat,
    path: &str,
) -> Result<Vec<CommandCandidate>> {
    let parsed: CandidateFile = match format {
        ResponseFormat::Json => serde_json::from_str(contents).map_err(|e| {
            Error::json_error(
                "reading".to_string(),
                "response".to_string(),
                path.to_string(),
                e,
            )
        })?,
        ResponseFormat::Yaml => serde_yaml::from_str(contents).map_err(|e| {
            Error::yaml_error(
                "reading".to_string(),
                "response".to_string(),
                path.to_string(),
                e,
            )
        })?,
    };

    let candidates = parsed.into_candidates();

    if candidates.is_empty() {
        return Err(Error::empty_candidate_list(path.to_string()));
    }

    if let Some(index) = candidates.iter().position(|c| c.command.trim().is_empty()) {
        return Err(Error::EmptyCommand {
            path: path.to_string(),
            index: index + 1,
        });
    }

    debug!("Loaded {} candidate commands from `{path}`", candidates.len());
    Ok(candidates)
}
