//! System clipboard access through `arboard`.

use log::{debug, warn};
use rust_how_core::error::{Error, Result};
use rust_how_core::interaction::Clipboard;

/// The native clipboard (X11/Wayland, macOS, Windows).
///
/// A handle is opened per operation, so a missing clipboard only matters
/// when the user actually copies or pastes.
#[derive(Debug, Default)]
pub struct SystemClipboard;

impl Clipboard for SystemClipboard {
    fn copy(&mut self, text: &str) -> Result<()> {
        let mut clipboard = arboard::Clipboard::new().map_err(|e| {
            warn!("Clipboard unavailable: {e}");
            Error::Clipboard(e.to_string())
        })?;

        #[cfg(target_os = "linux")]
        let copied = {
            use arboard::SetExtLinux;
            // Keep serving the selection until a clipboard manager has taken
            // it, since this process exits right after copying
            clipboard.set().wait().text(text)
        };

        #[cfg(not(target_os = "linux"))]
        let copied = clipboard.set_text(text);

        copied.map_err(|e| {
            warn!("Clipboard copy failed: {e}");
            Error::Clipboard(e.to_string())
        })
    }

    fn paste(&mut self) -> Option<String> {
        match arboard::Clipboard::new() {
            Ok(mut clipboard) => clipboard
                .get_text()
                .inspect_err(|e| debug!("Clipboard has no text: {e}"))
                .ok(),
            Err(e) => {
                warn!("Clipboard unavailable: {e}");
                None
            }
        }
    }
}
