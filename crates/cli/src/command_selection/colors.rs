use crossterm::style::Color;
use rust_how_core::config::{ColorDefinition, ColorSettings};
use rust_how_core::error::{Error, Result};

/// Trait for converting color definitions to terminal colors
pub trait AsTermColor {
    fn as_crossterm_color(&self) -> Result<Option<Color>>;
}

impl AsTermColor for ColorDefinition {
    fn as_crossterm_color(&self) -> Result<Option<Color>> {
        self.validate()?;

        Ok(match (self.rgb, self.ansi, &self.name) {
            (Some((r, g, b)), None, None) => Some(Color::Rgb { r, g, b }),
            (None, Some(ansi), None) => Some(Color::AnsiValue(ansi)),
            (None, None, Some(name)) => Some(match name.to_lowercase().as_str() {
                "black" => Color::Black,
                "darkgrey" => Color::DarkGrey,
                "red" => Color::Red,
                "darkred" => Color::DarkRed,
                "green" => Color::Green,
                "darkgreen" => Color::DarkGreen,
                "yellow" => Color::Yellow,
                "darkyellow" => Color::DarkYellow,
                "blue" => Color::Blue,
                "darkblue" => Color::DarkBlue,
                "magenta" => Color::Magenta,
                "darkmagenta" => Color::DarkMagenta,
                "cyan" => Color::Cyan,
                "darkcyan" => Color::DarkCyan,
                "white" => Color::White,
                "grey" => Color::Grey,
                _ => return Err(Error::UnknownColorName(name.to_string())),
            }),
            (None, None, None) => None,
            _ => return Err(Error::MultipleColorTypes),
        })
    }
}

/// Terminal colors for the parameter highlights of the live preview.
///
/// An empty color definition falls back to the default for that role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub selected: Color,
    pub selected_edited: Color,
    pub parameter: Color,
    pub edited: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            selected: Color::Blue,
            selected_edited: Color::DarkMagenta,
            parameter: Color::Cyan,
            edited: Color::Yellow,
        }
    }
}

impl Palette {
    /// # Errors
    ///
    /// Returns an error for unknown color names or ambiguous definitions.
    pub fn from_settings(colors: &ColorSettings) -> Result<Self> {
        let defaults = Self::default();

        Ok(Self {
            selected: colors.selected.as_crossterm_color()?.unwrap_or(defaults.selected),
            selected_edited: colors
                .selected_edited
                .as_crossterm_color()?
                .unwrap_or(defaults.selected_edited),
            parameter: colors.parameter.as_crossterm_color()?.unwrap_or(defaults.parameter),
            edited: colors.edited.as_crossterm_color()?.unwrap_or(defaults.edited),
        })
    }

    /// Foreground color for a highlighted parameter.
    pub fn for_span(&self, selected: bool, edited: bool) -> Color {
        match (selected, edited) {
            (true, true) => self.selected_edited,
            (true, false) => self.selected,
            (false, true) => self.edited,
            (false, false) => self.parameter,
        }
    }
}
