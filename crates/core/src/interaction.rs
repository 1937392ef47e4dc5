//! Maps key events onto session operations.
//!
//! The controller is free of terminal I/O: the CLI translates terminal
//! events into [`KeyEvent`]s and draws whatever the session renders.

use log::warn;

use crate::error::Result;
use crate::session::{Cycle, CommitMode, CustomizationSession, Outcome, SessionState};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyEvent {
    Char(char),
    Arrow(Direction),
    Enter,
    Esc,
    Tab,
    BackTab,
    Backspace,
    /// Ctrl+C.
    Interrupt,
    /// The configured copy binding.
    Copy,
    /// The configured paste binding; the controller reads the clipboard.
    PasteRequest,
    /// Text delivered by the terminal as a bracketed paste.
    Paste(String),
    Other,
}

/// System clipboard access.
pub trait Clipboard {
    fn copy(&mut self, text: &str) -> Result<()>;

    /// Returns `None` when the clipboard is empty or unavailable.
    fn paste(&mut self) -> Option<String>;
}

/// What the caller should do after a key was handled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    Continue,
    /// Keep going, but show this message to the user.
    Notice(String),
    Exited(Outcome),
}

const EMPTY_CLIPBOARD: &str = "Clipboard is empty or unavailable";

/// Applies one key event to the session.
///
/// # Errors
///
/// Only on an invalid session transition, which the mapping below never
/// produces for a session that has not exited.
pub fn handle_key(
    session: &mut CustomizationSession,
    key: KeyEvent,
    clipboard: &mut dyn Clipboard,
) -> Result<Step> {
    match session.state() {
        SessionState::Viewing => handle_viewing(session, key, clipboard),
        SessionState::Editing { .. } => handle_editing(session, key, clipboard),
        SessionState::Exited(outcome) => Ok(Step::Exited(outcome.clone())),
    }
}

fn handle_viewing(
    session: &mut CustomizationSession,
    key: KeyEvent,
    clipboard: &mut dyn Clipboard,
) -> Result<Step> {
    match key {
        KeyEvent::Tab | KeyEvent::Arrow(Direction::Down | Direction::Right) => {
            session.select_next()?;
        }
        KeyEvent::BackTab | KeyEvent::Arrow(Direction::Up | Direction::Left) => {
            session.select_prev()?;
        }
        KeyEvent::Char(c) => session.begin_edit(Some(c))?,
        KeyEvent::Backspace => {
            session.begin_edit(None)?;
            session.pop_char()?;
        }
        KeyEvent::Enter => return Ok(Step::Exited(session.commit(CommitMode::Execute)?)),
        KeyEvent::Copy => return Ok(Step::Exited(session.commit(CommitMode::Copy)?)),
        KeyEvent::PasteRequest => match read_clipboard(clipboard) {
            Some(text) => session.paste_into_selected(&text)?,
            None => return Ok(Step::Notice(EMPTY_CLIPBOARD.to_string())),
        },
        KeyEvent::Paste(text) => session.paste_into_selected(&text)?,
        KeyEvent::Esc | KeyEvent::Interrupt => return Ok(Step::Exited(session.cancel()?)),
        KeyEvent::Other => {}
    }

    Ok(Step::Continue)
}

fn handle_editing(
    session: &mut CustomizationSession,
    key: KeyEvent,
    clipboard: &mut dyn Clipboard,
) -> Result<Step> {
    match key {
        KeyEvent::Char(c) => session.push_char(c)?,
        KeyEvent::Paste(text) => session.push_str(single_line(&text))?,
        KeyEvent::PasteRequest => match read_clipboard(clipboard) {
            Some(text) => session.push_str(single_line(&text))?,
            None => return Ok(Step::Notice(EMPTY_CLIPBOARD.to_string())),
        },
        KeyEvent::Backspace => session.pop_char()?,
        KeyEvent::Arrow(Direction::Up) | KeyEvent::BackTab => {
            session.cycle_suggestion(Cycle::Backward)?;
        }
        KeyEvent::Arrow(Direction::Down) | KeyEvent::Tab => {
            session.cycle_suggestion(Cycle::Forward)?;
        }
        KeyEvent::Enter => session.commit_buffer()?,
        KeyEvent::Esc | KeyEvent::Interrupt => session.abort_edit()?,
        KeyEvent::Arrow(Direction::Left | Direction::Right) | KeyEvent::Copy | KeyEvent::Other => {}
    }

    Ok(Step::Continue)
}

fn read_clipboard(clipboard: &mut dyn Clipboard) -> Option<String> {
    let text = clipboard.paste()?;
    if text.trim().is_empty() {
        warn!("Ignoring paste of blank clipboard contents");
        return None;
    }
    Some(text)
}

fn single_line(text: &str) -> &str {
    text.trim_end_matches(['\r', '\n'])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detection::detect_parameters;
    use crate::session::SessionStart;

    #[derive(Default)]
    struct MockClipboard {
        contents: Option<String>,
        copied: Vec<String>,
    }

    impl Clipboard for MockClipboard {
        fn copy(&mut self, text: &str) -> Result<()> {
            self.copied.push(text.to_string());
            Ok(())
        }

        fn paste(&mut self) -> Option<String> {
            self.contents.clone()
        }
    }

    fn session(base: &str) -> CustomizationSession {
        match CustomizationSession::start(base, detect_parameters(base)) {
            SessionStart::Interactive(session) => session,
            SessionStart::Resolved(outcome) => panic!("expected a session, got {outcome:?}"),
        }
    }

    fn press(session: &mut CustomizationSession, keys: &[KeyEvent]) -> Step {
        let mut clipboard = MockClipboard::default();
        let mut step = Step::Continue;
        for key in keys {
            step = handle_key(session, key.clone(), &mut clipboard).unwrap();
        }
        step
    }

    fn typed(text: &str) -> Vec<KeyEvent> {
        text.chars().map(KeyEvent::Char).collect()
    }

    #[test]
    fn test_type_over_value_and_run() {
        let mut session = session(r#"mv "old name.txt" new_name.txt"#);

        let mut keys = vec![KeyEvent::Backspace];
        keys.extend(std::iter::repeat(KeyEvent::Backspace).take(11));
        keys.extend(typed("archive.txt"));
        keys.push(KeyEvent::Enter);
        press(&mut session, &keys);
        assert_eq!(session.state(), &SessionState::Viewing);

        assert_eq!(
            press(&mut session, &[KeyEvent::Enter]),
            Step::Exited(Outcome::Commit(r#"mv "archive.txt" new_name.txt"#.to_string()))
        );
    }

    #[test]
    fn test_q_edits_instead_of_quitting() {
        let mut session = session("cat {FILE}");
        assert_eq!(press(&mut session, &[KeyEvent::Char('q')]), Step::Continue);
        assert_eq!(session.buffer(), Some("{FILE}q"));
    }

    #[test]
    fn test_escape_aborts_edit_then_cancels() {
        let mut session = session("cat {FILE}");
        press(&mut session, &[KeyEvent::Char('x'), KeyEvent::Esc]);
        assert_eq!(session.state(), &SessionState::Viewing);
        assert!(session.edits().is_empty());

        assert_eq!(
            press(&mut session, &[KeyEvent::Interrupt]),
            Step::Exited(Outcome::Cancelled)
        );
        assert_eq!(
            press(&mut session, &[KeyEvent::Enter]),
            Step::Exited(Outcome::Cancelled)
        );
    }

    #[test]
    fn test_navigation_keys() {
        let mut session = session("cp {A} {B} {C}");
        press(&mut session, &[KeyEvent::Tab, KeyEvent::Arrow(Direction::Right)]);
        assert_eq!(session.selected_index(), 2);
        press(&mut session, &[KeyEvent::Arrow(Direction::Down)]);
        assert_eq!(session.selected_index(), 0);
        press(&mut session, &[KeyEvent::BackTab, KeyEvent::Arrow(Direction::Up)]);
        assert_eq!(session.selected_index(), 1);
    }

    #[test]
    fn test_copy_exits_with_final_command() {
        let mut session = session("cp {A} /tmp");
        let step = press(
            &mut session,
            &[KeyEvent::Paste("x.txt".to_string()), KeyEvent::Copy],
        );
        assert_eq!(step, Step::Exited(Outcome::CopyAndExit("cp x.txt /tmp".to_string())));
    }

    #[test]
    fn test_paste_request_reads_clipboard() {
        let mut session = session("cp {A} /tmp");
        let mut clipboard = MockClipboard {
            contents: Some("from clipboard\n".to_string()),
            ..MockClipboard::default()
        };

        let step = handle_key(&mut session, KeyEvent::PasteRequest, &mut clipboard).unwrap();
        assert_eq!(step, Step::Continue);
        assert_eq!(session.apply(), "cp from clipboard /tmp");

        handle_key(&mut session, KeyEvent::Char('!'), &mut clipboard).unwrap();
        handle_key(&mut session, KeyEvent::PasteRequest, &mut clipboard).unwrap();
        assert_eq!(session.buffer(), Some("from clipboard!from clipboard"));
    }

    #[test]
    fn test_empty_clipboard_is_a_notice() {
        let mut session = session("cp {A} /tmp");
        let mut clipboard = MockClipboard {
            contents: Some("  ".to_string()),
            ..MockClipboard::default()
        };

        let step = handle_key(&mut session, KeyEvent::PasteRequest, &mut clipboard).unwrap();
        assert!(matches!(step, Step::Notice(_)));
        assert!(session.edits().is_empty());

        clipboard.contents = None;
        let step = handle_key(&mut session, KeyEvent::PasteRequest, &mut clipboard).unwrap();
        assert!(matches!(step, Step::Notice(_)));
        assert!(clipboard.copied.is_empty());
    }

    #[test]
    fn test_suggestion_keys_while_editing() {
        let mut session = session("cat {FILE}");
        let first = session.selected_parameter().suggestions[0].clone();
        let last = session.selected_parameter().suggestions[2].clone();

        press(&mut session, &[KeyEvent::Backspace, KeyEvent::Arrow(Direction::Up)]);
        assert_eq!(session.buffer(), Some(last.as_str()));
        press(&mut session, &[KeyEvent::Tab]);
        assert_eq!(session.buffer(), Some(first.as_str()));

        press(&mut session, &[KeyEvent::Enter]);
        assert_eq!(session.apply(), format!("cat {first}"));
    }
}
