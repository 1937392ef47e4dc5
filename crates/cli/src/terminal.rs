//! Scoped terminal setup for the full-screen views.

use std::io::stdout;

use crossterm::cursor::{Hide, Show};
use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use log::debug;
use rust_how_core::error::{Error, Result};

/// Optional terminal features a view can ask for on top of raw mode and the
/// alternate screen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TerminalFeatures {
    pub mouse_capture: bool,
    pub bracketed_paste: bool,
}

/// Puts the terminal into raw mode on the alternate screen with a hidden
/// cursor. Everything is restored when the guard is dropped, on every exit
/// path including errors and panics that unwind.
pub struct TerminalGuard {
    features: TerminalFeatures,
}

impl TerminalGuard {
    /// # Errors
    ///
    /// Returns [`Error::Terminal`] if any step fails. Steps that already
    /// succeeded are undone before returning.
    pub fn acquire(features: TerminalFeatures) -> Result<Self> {
        enable_raw_mode().map_err(Error::Terminal)?;
        // From here on, dropping the guard restores whatever was set up
        let guard = TerminalGuard { features };

        let mut stdout = stdout();
        stdout.execute(EnterAlternateScreen).map_err(Error::Terminal)?;
        stdout.execute(Hide).map_err(Error::Terminal)?;

        if features.mouse_capture {
            stdout.execute(EnableMouseCapture).map_err(Error::Terminal)?;
        }

        if features.bracketed_paste {
            stdout.execute(EnableBracketedPaste).map_err(Error::Terminal)?;
        }

        debug!("Acquired terminal with {features:?}");
        Ok(guard)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let mut stdout = stdout();

        if self.features.bracketed_paste {
            let _ = stdout.execute(DisableBracketedPaste);
        }

        if self.features.mouse_capture {
            let _ = stdout.execute(DisableMouseCapture);
        }

        let _ = stdout.execute(Show);
        let _ = stdout.execute(LeaveAlternateScreen);
        let _ = disable_raw_mode();
    }
}
