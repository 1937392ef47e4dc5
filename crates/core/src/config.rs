//! Configuration for rust-how.
//!
//! Settings are read from a YAML file (see [`crate::file_handling::load_settings`]);
//! every field has a default, so a missing file or a partial one is fine.

use std::fmt::{Display, Formatter};
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Default path for the settings file
const DEFAULT_CONFIG_PATH: &str = "~/.rust-how/config.yml";

/// Default shell to use for command execution
pub const DEFAULT_SHELL: &str = "/bin/bash";

/// Resolves the settings file path, expanding `~`.
///
/// # Examples
///
/// ```
/// use rust_how_core::config::get_config_path;
///
/// let default_path = get_config_path(&None);
/// assert!(default_path.ends_with("config.yml"));
///
/// let custom_path = get_config_path(&Some("/path/to/config.yml".to_string()));
/// assert_eq!(custom_path, "/path/to/config.yml");
/// ```
pub fn get_config_path(config_path_arg: &Option<String>) -> String {
    let config_path = match config_path_arg {
        Some(config_path) => config_path,
        None => DEFAULT_CONFIG_PATH,
    };

    shellexpand::tilde(config_path).to_string()
}

/// Expands shell variables like `~` in a working directory path.
///
/// ```
/// use rust_how_core::config::expand_working_directory;
///
/// assert!(expand_working_directory(&Some("~/projects".to_string())).is_some());
/// assert!(expand_working_directory(&None).is_none());
/// ```
pub fn expand_working_directory(working_directory: &Option<String>) -> Option<String> {
    working_directory
        .as_ref()
        .map(|working_directory| shellexpand::tilde(working_directory).to_string())
}

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    pub customization: CustomizationSettings,
    pub execution: ExecutionSettings,
    pub colors: ColorSettings,
}

impl Settings {
    /// Checks values serde cannot check on its own.
    pub fn validate(&self) -> Result<()> {
        self.customization.copy_binding()?;
        self.customization.paste_binding()?;

        for color in self.colors.all() {
            color.validate()?;
        }

        Ok(())
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct CustomizationSettings {
    /// Suggest file and directory names from the working directory.
    pub probe_filesystem: bool,
    /// How long to wait for the rest of an escape sequence.
    pub escape_timeout_ms: u64,
    /// Suggestions shown while editing a value.
    pub max_suggestions: usize,
    pub copy_key: String,
    pub paste_key: String,
}

impl Default for CustomizationSettings {
    fn default() -> Self {
        Self {
            probe_filesystem: true,
            escape_timeout_ms: 50,
            max_suggestions: 3,
            copy_key: "ctrl+y".to_string(),
            paste_key: "ctrl+v".to_string(),
        }
    }
}

impl CustomizationSettings {
    pub fn copy_binding(&self) -> Result<KeyBinding> {
        self.copy_key.parse()
    }

    pub fn paste_binding(&self) -> Result<KeyBinding> {
        self.paste_key.parse()
    }

    pub fn escape_timeout(&self) -> Duration {
        Duration::from_millis(self.escape_timeout_ms)
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct ExecutionSettings {
    pub require_confirmation: bool,
    /// Falls back to `$SHELL`, then [`DEFAULT_SHELL`].
    pub shell: Option<String>,
}

impl Default for ExecutionSettings {
    fn default() -> Self {
        Self {
            require_confirmation: true,
            shell: None,
        }
    }
}

impl ExecutionSettings {
    pub fn resolve_shell(&self) -> String {
        self.shell
            .clone()
            .or_else(|| std::env::var("SHELL").ok().filter(|s| !s.is_empty()))
            .unwrap_or_else(|| DEFAULT_SHELL.to_string())
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct ColorSettings {
    /// The selected parameter.
    pub selected: ColorDefinition,
    /// The selected parameter once it has been edited.
    pub selected_edited: ColorDefinition,
    pub parameter: ColorDefinition,
    pub edited: ColorDefinition,
}

impl Default for ColorSettings {
    fn default() -> Self {
        Self {
            selected: ColorDefinition::named("blue"),
            selected_edited: ColorDefinition::named("darkmagenta"),
            parameter: ColorDefinition::named("cyan"),
            edited: ColorDefinition::named("yellow"),
        }
    }
}

impl ColorSettings {
    fn all(&self) -> [&ColorDefinition; 4] {
        [
            &self.selected,
            &self.selected_edited,
            &self.parameter,
            &self.edited,
        ]
    }
}

/// A color given as exactly one of `rgb`, `ansi` or `name`.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct ColorDefinition {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rgb: Option<(u8, u8, u8)>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ansi: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl ColorDefinition {
    pub fn named(name: &str) -> Self {
        Self {
            name: Some(name.to_string()),
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        let defined = [self.rgb.is_some(), self.ansi.is_some(), self.name.is_some()]
            .into_iter()
            .filter(|d| *d)
            .count();

        if defined > 1 {
            return Err(Error::MultipleColorTypes);
        }

        Ok(())
    }
}

/// A key binding such as `y` or `ctrl+y`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyBinding {
    pub ctrl: bool,
    pub key: char,
}

impl FromStr for KeyBinding {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let lower = s.trim().to_lowercase();
        let (ctrl, key) = match lower.strip_prefix("ctrl+") {
            Some(rest) => (true, rest),
            None => (false, lower.as_str()),
        };

        let mut chars = key.chars();
        match (chars.next(), chars.next()) {
            (Some(key), None) if !key.is_whitespace() => Ok(Self { ctrl, key }),
            _ => Err(Error::InvalidKeyBinding(s.to_string())),
        }
    }
}

impl Display for KeyBinding {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        if self.ctrl {
            write!(formatter, "Ctrl+{}", self.key.to_ascii_uppercase())
        } else {
            write!(formatter, "{}", self.key)
        }
    }
}
