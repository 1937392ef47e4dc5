//! Interactive customization of one command.
//!
//! The terminal side of a [`CustomizationSession`]: this module owns the
//! screen and the event loop, while every decision about what a key does is
//! made by [`rust_how_core::interaction::handle_key`].
//!
//! - [`keys`]: terminal events to session key events
//! - [`view`]: drawing the highlighted preview and edit prompt
//! - [`listing`]: the plain-text fallback when no terminal is available

pub mod keys;
pub mod listing;
pub mod view;

use std::io::stdout;
use std::time::Duration;

use crossterm::event::{self, Event};
use crossterm::terminal;
use log::debug;
use rust_how_core::config::Settings;
use rust_how_core::error::{Error, Result};
use rust_how_core::interaction::{handle_key, Clipboard, Step};
use rust_how_core::session::{CustomizationSession, Outcome};

use crate::command_selection::colors::Palette;
use crate::terminal::{TerminalFeatures, TerminalGuard};
use keys::KeyBindings;
use view::ViewContext;

/// Presentation settings for a session run.
#[derive(Debug, Clone)]
pub struct SessionOptions {
    pub palette: Palette,
    pub bindings: KeyBindings,
    pub max_suggestions: usize,
    pub poll_timeout: Duration,
}

impl SessionOptions {
    /// # Errors
    ///
    /// Returns an error for invalid colors or key bindings.
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        Ok(Self {
            palette: Palette::from_settings(&settings.colors)?,
            bindings: KeyBindings::from_settings(&settings.customization)?,
            max_suggestions: settings.customization.max_suggestions,
            poll_timeout: settings.customization.escape_timeout(),
        })
    }
}

/// Runs the session on the terminal until it exits.
///
/// # Errors
///
/// Returns [`Error::Terminal`] if the terminal cannot be acquired or fails
/// while the session runs. The terminal is restored either way.
pub fn run(
    mut session: CustomizationSession,
    options: &SessionOptions,
    clipboard: &mut dyn Clipboard,
) -> Result<Outcome> {
    let _terminal_guard = TerminalGuard::acquire(TerminalFeatures {
        mouse_capture: false,
        bracketed_paste: true,
    })?;

    let mut stdout = stdout();
    let mut notice: Option<String> = None;
    let mut needs_redraw = true;

    loop {
        if needs_redraw {
            let (width, _) = terminal::size().map_err(Error::Terminal)?;
            let context = ViewContext {
                palette: &options.palette,
                bindings: &options.bindings,
                max_suggestions: options.max_suggestions,
                width,
                notice: notice.as_deref(),
            };

            view::draw(&mut stdout, &session, &context).map_err(Error::Terminal)?;
            needs_redraw = false;
        }

        if !event::poll(options.poll_timeout).map_err(Error::Terminal)? {
            continue;
        }

        let event = event::read().map_err(Error::Terminal)?;
        if let Event::Resize(..) = event {
            needs_redraw = true;
            continue;
        }

        let Some(key) = keys::translate(&event, &options.bindings) else {
            continue;
        };

        match handle_key(&mut session, key, clipboard)? {
            Step::Continue => notice = None,
            Step::Notice(text) => notice = Some(text),
            Step::Exited(outcome) => {
                debug!("Customization ended with {outcome:?}");
                return Ok(outcome);
            }
        }

        needs_redraw = true;
    }
}
