use log::debug;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("The sub process exiting with non-success code.")]
    SubProcessExit,

    #[error("Error with sub process process: {}", _0)]
    SubProcess(#[from] std::io::Error),

    #[error("Error {} {} file at `{}`: {}", .action, .file_description, .path, .original)]
    Yaml {
        action: String,
        file_description: String,
        path: String,
        original: serde_yaml::Error,
    },

    #[error("Error {} {} file at `{}`: {}", .action, .file_description, .path, .original)]
    Json {
        action: String,
        file_description: String,
        path: String,
        original: serde_json::Error,
    },

    #[error("For a color, only one of `rgb`, `ansi` or `name` should be defined.")]
    MultipleColorTypes,

    #[error("Unknown color name: \"{}\"", _0)]
    UnknownColorName(String),

    #[error("Invalid key binding `{}`: expected a single character or `ctrl+<char>`", _0)]
    InvalidKeyBinding(String),

    #[error("No commands were found in the response file. Is `{}` empty?", .path)]
    EmptyCandidateList { path: String },

    #[error("Command #{} in `{}` is blank", .index, .path)]
    EmptyCommand { path: String, index: usize },

    #[error("IO error with {} file at path `{}`: {}", .file_description, .path, .original)]
    Io {
        file_description: String,
        path: String,
        original: std::io::Error,
    },

    #[error("Parameter preset must be in the format KEY=VALUE, got `{}`", .0)]
    PresetFormat(String),

    #[error("No detected parameter matches preset key `{}`", .0)]
    UnknownPresetParameter(String),

    #[error("Cannot {} while the customization session is {}", .operation, .state)]
    InvalidTransition {
        operation: &'static str,
        state: &'static str,
    },

    #[error("Terminal error: {}", .0)]
    Terminal(std::io::Error),

    #[error("Clipboard error: {}", .0)]
    Clipboard(String),

    #[error("Misc error: {}", .0)]
    Misc(String),
}

impl Error {
    pub fn empty_candidate_list(path: String) -> Self {
        Self::EmptyCandidateList { path }
    }

    pub fn yaml_error(
        action: String,
        file_description: String,
        path: String,
        original: serde_yaml::Error,
    ) -> Self {
        Self::Yaml {
            action,
            file_description,
            path,
            original,
        }
    }

    pub fn json_error(
        action: String,
        file_description: String,
        path: String,
        original: serde_json::Error,
    ) -> Self {
        Self::Json {
            action,
            file_description,
            path,
            original,
        }
    }

    pub fn io_error(file_description: String, path: String, original: std::io::Error) -> Self {
        Self::Io {
            file_description,
            path,
            original,
        }
    }

    pub fn invalid_transition(operation: &'static str, state: &'static str) -> Self {
        debug!("Rejected `{operation}` in state `{state}`");
        Self::InvalidTransition { operation, state }
    }
}
