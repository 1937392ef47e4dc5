//! Translates terminal events into session key events.

use crossterm::event::{Event, KeyCode, KeyEvent as TermKeyEvent, KeyEventKind, KeyModifiers};
use rust_how_core::config::{CustomizationSettings, KeyBinding};
use rust_how_core::error::Result;
use rust_how_core::interaction::{Direction, KeyEvent};

/// The configurable copy and paste keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyBindings {
    pub copy: KeyBinding,
    pub paste: KeyBinding,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            copy: KeyBinding { ctrl: true, key: 'y' },
            paste: KeyBinding { ctrl: true, key: 'v' },
        }
    }
}

impl KeyBindings {
    /// # Errors
    ///
    /// Returns an error if either binding cannot be parsed.
    pub fn from_settings(settings: &CustomizationSettings) -> Result<Self> {
        Ok(Self {
            copy: settings.copy_binding()?,
            paste: settings.paste_binding()?,
        })
    }
}

fn matches_binding(binding: &KeyBinding, key_event: &TermKeyEvent) -> bool {
    let KeyCode::Char(c) = key_event.code else {
        return false;
    };

    binding.ctrl == key_event.modifiers.contains(KeyModifiers::CONTROL)
        && c.to_lowercase().eq(binding.key.to_lowercase())
}

/// Maps one terminal event to a key event, `None` for events the session
/// does not care about (resizes, focus, mouse, key releases).
///
/// Ctrl+C is always an interrupt, even when a binding claims it.
pub fn translate(event: &Event, bindings: &KeyBindings) -> Option<KeyEvent> {
    let key_event = match event {
        Event::Key(key_event) if key_event.kind == KeyEventKind::Press => key_event,
        Event::Paste(text) => return Some(KeyEvent::Paste(text.clone())),
        _ => return None,
    };

    let ctrl = key_event.modifiers.contains(KeyModifiers::CONTROL);

    if ctrl && matches!(key_event.code, KeyCode::Char('c' | 'C')) {
        return Some(KeyEvent::Interrupt);
    }

    if matches_binding(&bindings.copy, key_event) {
        return Some(KeyEvent::Copy);
    }

    if matches_binding(&bindings.paste, key_event) {
        return Some(KeyEvent::PasteRequest);
    }

    Some(match key_event.code {
        KeyCode::Char(c) if !ctrl && !key_event.modifiers.contains(KeyModifiers::ALT) => {
            KeyEvent::Char(c)
        }
        KeyCode::Up => KeyEvent::Arrow(Direction::Up),
        KeyCode::Down => KeyEvent::Arrow(Direction::Down),
        KeyCode::Left => KeyEvent::Arrow(Direction::Left),
        KeyCode::Right => KeyEvent::Arrow(Direction::Right),
        KeyCode::Enter => KeyEvent::Enter,
        KeyCode::Esc => KeyEvent::Esc,
        KeyCode::Tab => KeyEvent::Tab,
        KeyCode::BackTab => KeyEvent::BackTab,
        KeyCode::Backspace => KeyEvent::Backspace,
        _ => KeyEvent::Other,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;

    fn press(code: KeyCode, modifiers: KeyModifiers) -> Event {
        Event::Key(TermKeyEvent::new(code, modifiers))
    }

    #[test]
    fn test_plain_keys() {
        let bindings = KeyBindings::default();

        for (code, expected) in [
            (KeyCode::Char('a'), KeyEvent::Char('a')),
            (KeyCode::Up, KeyEvent::Arrow(Direction::Up)),
            (KeyCode::Right, KeyEvent::Arrow(Direction::Right)),
            (KeyCode::Enter, KeyEvent::Enter),
            (KeyCode::Esc, KeyEvent::Esc),
            (KeyCode::Tab, KeyEvent::Tab),
            (KeyCode::BackTab, KeyEvent::BackTab),
            (KeyCode::Backspace, KeyEvent::Backspace),
            (KeyCode::F(5), KeyEvent::Other),
        ] {
            assert_eq!(translate(&press(code, KeyModifiers::NONE), &bindings), Some(expected));
        }

        assert_eq!(
            translate(&press(KeyCode::Char('A'), KeyModifiers::SHIFT), &bindings),
            Some(KeyEvent::Char('A'))
        );
    }

    #[test]
    fn test_bindings_and_interrupt() {
        let bindings = KeyBindings::default();

        assert_eq!(
            translate(&press(KeyCode::Char('y'), KeyModifiers::CONTROL), &bindings),
            Some(KeyEvent::Copy)
        );
        assert_eq!(
            translate(&press(KeyCode::Char('v'), KeyModifiers::CONTROL), &bindings),
            Some(KeyEvent::PasteRequest)
        );
        assert_eq!(
            translate(&press(KeyCode::Char('c'), KeyModifiers::CONTROL), &bindings),
            Some(KeyEvent::Interrupt)
        );
        // A plain `y` is still typed
        assert_eq!(
            translate(&press(KeyCode::Char('y'), KeyModifiers::NONE), &bindings),
            Some(KeyEvent::Char('y'))
        );
        // Unbound control chords are not typed
        assert_eq!(
            translate(&press(KeyCode::Char('x'), KeyModifiers::CONTROL), &bindings),
            Some(KeyEvent::Other)
        );
    }

    #[test]
    fn test_bindings_from_settings() {
        let settings = CustomizationSettings {
            copy_key: "ctrl+k".to_string(),
            ..CustomizationSettings::default()
        };
        let bindings = KeyBindings::from_settings(&settings).unwrap();

        assert_eq!(
            translate(&press(KeyCode::Char('k'), KeyModifiers::CONTROL), &bindings),
            Some(KeyEvent::Copy)
        );
        assert_eq!(
            translate(&press(KeyCode::Char('y'), KeyModifiers::CONTROL), &bindings),
            Some(KeyEvent::Other)
        );
    }

    #[test]
    fn test_paste_and_ignored_events() {
        let bindings = KeyBindings::default();

        assert_eq!(
            translate(&Event::Paste("clip.mov".to_string()), &bindings),
            Some(KeyEvent::Paste("clip.mov".to_string()))
        );
        assert_eq!(translate(&Event::Resize(80, 24), &bindings), None);
        assert_eq!(translate(&Event::FocusGained, &bindings), None);

        let release = Event::Key(TermKeyEvent {
            code: KeyCode::Char('a'),
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        });
        assert_eq!(translate(&release, &bindings), None);
    }
}
