//! The interactive customization state machine.
//!
//! A session owns an immutable base command and its detected parameters.
//! Every operation either moves the session to a valid next state or returns
//! [`Error::InvalidTransition`] and leaves it untouched.

use log::debug;

use crate::error::{Error, Result};
use crate::parameters::{Parameter, ParameterSet};
use crate::rendering::{self, EditMap, RenderedCommand};

/// How a session ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Run (or print) this command.
    Commit(String),
    /// Put this command on the clipboard and exit.
    CopyAndExit(String),
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitMode {
    Execute,
    Copy,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    Viewing,
    Editing {
        buffer: String,
        /// Position in the selected parameter's suggestions, once cycling started.
        suggestion_cursor: Option<usize>,
    },
    Exited(Outcome),
}

impl SessionState {
    fn name(&self) -> &'static str {
        match self {
            SessionState::Viewing => "viewing",
            SessionState::Editing { .. } => "editing",
            SessionState::Exited(_) => "exited",
        }
    }
}

/// Direction to cycle through suggestions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cycle {
    Forward,
    Backward,
}

/// Result of opening a session: commands without parameters need no UI.
#[derive(Debug)]
pub enum SessionStart {
    Interactive(CustomizationSession),
    Resolved(Outcome),
}

#[derive(Debug, Clone)]
pub struct CustomizationSession {
    base: String,
    parameters: ParameterSet,
    edits: EditMap,
    selected: usize,
    state: SessionState,
}

impl CustomizationSession {
    /// Opens a session over `base`.
    ///
    /// With no parameters there is nothing to customize and the command is
    /// committed unchanged.
    pub fn start(base: impl Into<String>, parameters: ParameterSet) -> SessionStart {
        Self::start_with_edits(base, parameters, EditMap::new())
    }

    /// Opens a session with some values already filled in.
    ///
    /// Edits for unknown indices, and edits equal to the original value, are
    /// discarded.
    pub fn start_with_edits(
        base: impl Into<String>,
        parameters: ParameterSet,
        edits: EditMap,
    ) -> SessionStart {
        let base = base.into();

        if parameters.is_empty() {
            debug!("No parameters in `{base}`, committing unchanged");
            return SessionStart::Resolved(Outcome::Commit(base));
        }

        let edits = edits
            .into_iter()
            .filter(|(index, value)| {
                parameters
                    .get(*index)
                    .is_some_and(|p| &p.original_value != value)
            })
            .collect();

        SessionStart::Interactive(Self {
            base,
            parameters,
            edits,
            selected: 0,
            state: SessionState::Viewing,
        })
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    pub fn parameters(&self) -> &ParameterSet {
        &self.parameters
    }

    pub fn edits(&self) -> &EditMap {
        &self.edits
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    pub fn selected_parameter(&self) -> &Parameter {
        &self.parameters.as_slice()[self.selected]
    }

    /// The outcome, once the session has exited.
    pub fn outcome(&self) -> Option<&Outcome> {
        match &self.state {
            SessionState::Exited(outcome) => Some(outcome),
            _ => None,
        }
    }

    /// The edit buffer while editing.
    pub fn buffer(&self) -> Option<&str> {
        match &self.state {
            SessionState::Editing { buffer, .. } => Some(buffer),
            _ => None,
        }
    }

    pub fn effective_value(&self, index: usize) -> Option<&str> {
        self.parameters
            .get(index)
            .map(|p| rendering::effective_value(p, self.edits.get(&index)))
    }

    pub fn select_next(&mut self) -> Result<()> {
        self.require_viewing("select the next parameter")?;
        self.selected = (self.selected + 1) % self.parameters.len();
        Ok(())
    }

    pub fn select_prev(&mut self) -> Result<()> {
        self.require_viewing("select the previous parameter")?;
        self.selected = (self.selected + self.parameters.len() - 1) % self.parameters.len();
        Ok(())
    }

    /// Starts editing the selected parameter from its current value.
    pub fn begin_edit(&mut self, first_char: Option<char>) -> Result<()> {
        self.require_viewing("start editing")?;

        let mut buffer = self
            .effective_value(self.selected)
            .unwrap_or_default()
            .to_string();
        buffer.extend(first_char);

        self.state = SessionState::Editing {
            buffer,
            suggestion_cursor: None,
        };
        Ok(())
    }

    pub fn push_char(&mut self, c: char) -> Result<()> {
        self.buffer_mut("type")?.push(c);
        Ok(())
    }

    pub fn push_str(&mut self, text: &str) -> Result<()> {
        self.buffer_mut("paste")?.push_str(text);
        Ok(())
    }

    pub fn pop_char(&mut self) -> Result<()> {
        self.buffer_mut("delete")?.pop();
        Ok(())
    }

    /// Replaces the buffer with the next or previous suggestion, wrapping
    /// around. Does nothing when the parameter has no suggestions.
    pub fn cycle_suggestion(&mut self, cycle: Cycle) -> Result<()> {
        if !matches!(self.state, SessionState::Editing { .. }) {
            return Err(Error::invalid_transition(
                "cycle suggestions",
                self.state.name(),
            ));
        }

        let suggestions = &self.parameters.as_slice()[self.selected].suggestions;
        let SessionState::Editing {
            buffer,
            suggestion_cursor,
        } = &mut self.state
        else {
            return Ok(());
        };

        if suggestions.is_empty() {
            return Ok(());
        }

        let len = suggestions.len();
        let next = match (cycle, *suggestion_cursor) {
            (Cycle::Forward, None) => 0,
            (Cycle::Backward, None) => len - 1,
            (Cycle::Forward, Some(i)) => (i + 1) % len,
            (Cycle::Backward, Some(i)) => (i + len - 1) % len,
        };

        *suggestion_cursor = Some(next);
        buffer.clone_from(&suggestions[next]);
        Ok(())
    }

    /// Commits `new_value` for the selected parameter and returns to viewing.
    pub fn commit_edit(&mut self, new_value: impl Into<String>) -> Result<()> {
        if !matches!(self.state, SessionState::Editing { .. }) {
            return Err(Error::invalid_transition("commit an edit", self.state.name()));
        }

        self.store(self.selected, new_value.into());
        self.state = SessionState::Viewing;
        Ok(())
    }

    /// Commits the trimmed edit buffer. An empty buffer restores the original value.
    pub fn commit_buffer(&mut self) -> Result<()> {
        let value = match &self.state {
            SessionState::Editing { buffer, .. } => buffer.trim().to_string(),
            state => return Err(Error::invalid_transition("commit an edit", state.name())),
        };

        if value.is_empty() {
            let original = self.selected_parameter().original_value.clone();
            return self.commit_edit(original);
        }

        self.commit_edit(value)
    }

    /// Leaves editing without touching any stored edit.
    pub fn abort_edit(&mut self) -> Result<()> {
        if !matches!(self.state, SessionState::Editing { .. }) {
            return Err(Error::invalid_transition("abort an edit", self.state.name()));
        }

        self.state = SessionState::Viewing;
        Ok(())
    }

    /// Sets the selected parameter to pasted text without entering editing.
    ///
    /// Trailing line breaks are dropped; text that is empty afterwards is
    /// ignored.
    pub fn paste_into_selected(&mut self, text: &str) -> Result<()> {
        self.require_viewing("paste")?;

        let text = text.trim_end_matches(['\r', '\n']);
        if text.is_empty() {
            return Ok(());
        }

        self.store(self.selected, text.to_string());
        Ok(())
    }

    /// Ends the session with the final command.
    pub fn commit(&mut self, mode: CommitMode) -> Result<Outcome> {
        self.require_viewing("commit")?;

        let command = self.apply();
        let outcome = match mode {
            CommitMode::Execute => Outcome::Commit(command),
            CommitMode::Copy => Outcome::CopyAndExit(command),
        };

        self.state = SessionState::Exited(outcome.clone());
        Ok(outcome)
    }

    /// Ends the session, discarding every edit.
    pub fn cancel(&mut self) -> Result<Outcome> {
        self.require_viewing("cancel")?;

        self.edits.clear();
        self.state = SessionState::Exited(Outcome::Cancelled);
        Ok(Outcome::Cancelled)
    }

    /// The command with all stored edits applied.
    pub fn apply(&self) -> String {
        rendering::apply(&self.base, &self.parameters, &self.edits)
    }

    /// The preview of the command. While editing, the buffer is shown in
    /// place of the selected parameter without being stored.
    pub fn render(&self) -> RenderedCommand {
        let selected = match self.state {
            SessionState::Exited(_) => None,
            _ => Some(self.selected),
        };

        match &self.state {
            SessionState::Editing { buffer, .. } => {
                let mut preview = self.edits.clone();
                preview.insert(self.selected, buffer.clone());
                rendering::render(&self.base, &self.parameters, &preview, selected)
            }
            _ => rendering::render(&self.base, &self.parameters, &self.edits, selected),
        }
    }

    fn store(&mut self, index: usize, value: String) {
        let Some(parameter) = self.parameters.get(index) else {
            return;
        };

        if parameter.original_value == value {
            self.edits.remove(&index);
        } else {
            self.edits.insert(index, value);
        }
    }

    fn require_viewing(&self, operation: &'static str) -> Result<()> {
        match self.state {
            SessionState::Viewing => Ok(()),
            ref state => Err(Error::invalid_transition(operation, state.name())),
        }
    }

    fn buffer_mut(&mut self, operation: &'static str) -> Result<&mut String> {
        match &mut self.state {
            SessionState::Editing { buffer, .. } => Ok(buffer),
            state => Err(Error::invalid_transition(operation, state.name())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detection::detect_parameters;

    fn session(base: &str) -> CustomizationSession {
        match CustomizationSession::start(base, detect_parameters(base)) {
            SessionStart::Interactive(session) => session,
            SessionStart::Resolved(outcome) => panic!("expected a session, got {outcome:?}"),
        }
    }

    fn edit(session: &mut CustomizationSession, value: &str) {
        session.begin_edit(None).unwrap();
        session.commit_edit(value).unwrap();
    }

    #[test]
    fn test_no_parameters_resolves_immediately() {
        let start = CustomizationSession::start("ls -la", detect_parameters("ls -la"));
        assert!(matches!(
            start,
            SessionStart::Resolved(Outcome::Commit(ref command)) if command == "ls -la"
        ));
    }

    #[test]
    fn test_rename_quoted_file() {
        let mut session = session(r#"mv "old name.txt" new_name.txt"#);
        edit(&mut session, "archive.txt");

        assert_eq!(
            session.commit(CommitMode::Execute).unwrap(),
            Outcome::Commit(r#"mv "archive.txt" new_name.txt"#.to_string())
        );
        assert!(matches!(session.state(), SessionState::Exited(_)));
    }

    #[test]
    fn test_edits_in_any_order() {
        let base = "ffmpeg -i input.mp4 -ss 00:00:05 output.mp4";
        let expected = "ffmpeg -i input.mp4 -ss 00:01:00 clip.mp4";

        let mut first = session(base);
        first.select_next().unwrap();
        edit(&mut first, "00:01:00");
        first.select_next().unwrap();
        edit(&mut first, "clip.mp4");

        let mut second = session(base);
        second.select_prev().unwrap();
        edit(&mut second, "clip.mp4");
        second.select_prev().unwrap();
        edit(&mut second, "00:01:00");

        assert_eq!(first.apply(), expected);
        assert_eq!(second.apply(), expected);
        assert_eq!(
            second.commit(CommitMode::Copy).unwrap(),
            Outcome::CopyAndExit(expected.to_string())
        );
    }

    #[test]
    fn test_cancel_discards_edits() {
        let base = "cp {SRC} {DEST}";
        let mut session = session(base);
        edit(&mut session, "a");
        session.select_next().unwrap();
        edit(&mut session, "b");

        assert_eq!(session.cancel().unwrap(), Outcome::Cancelled);
        assert!(session.edits().is_empty());
        assert_eq!(session.base(), base);
        assert_eq!(session.outcome(), Some(&Outcome::Cancelled));
    }

    #[test]
    fn test_selection_wraps() {
        let mut session = session("cp {A} {B} {C}");
        session.select_prev().unwrap();
        assert_eq!(session.selected_index(), 2);
        session.select_next().unwrap();
        assert_eq!(session.selected_index(), 0);
    }

    #[test]
    fn test_reverting_to_original_removes_edit() {
        let mut session = session("cat {FILE}");
        edit(&mut session, "notes.txt");
        assert_eq!(session.edits().len(), 1);

        edit(&mut session, "{FILE}");
        assert!(session.edits().is_empty());
    }

    #[test]
    fn test_buffer_editing() {
        let mut session = session("cat {FILE}");
        session.begin_edit(Some('x')).unwrap();
        assert_eq!(session.buffer(), Some("{FILE}x"));

        session.pop_char().unwrap();
        session.pop_char().unwrap();
        session.push_str("_A}").unwrap();
        session.push_char('!').unwrap();
        assert_eq!(session.buffer(), Some("{FILE_A}!"));
        assert_eq!(session.render().text, "cat {FILE_A}!");
        assert!(session.edits().is_empty());

        session.commit_buffer().unwrap();
        assert_eq!(session.apply(), "cat {FILE_A}!");
    }

    #[test]
    fn test_blank_buffer_reverts() {
        let mut session = session("cat {FILE}");
        edit(&mut session, "a.txt");

        session.begin_edit(None).unwrap();
        for _ in 0..5 {
            session.pop_char().unwrap();
        }
        session.push_str("   ").unwrap();
        session.commit_buffer().unwrap();

        assert!(session.edits().is_empty());
        assert_eq!(session.effective_value(0), Some("{FILE}"));
    }

    #[test]
    fn test_abort_edit_keeps_stored_value() {
        let mut session = session("cat {FILE}");
        edit(&mut session, "a.txt");

        session.begin_edit(Some('x')).unwrap();
        session.abort_edit().unwrap();
        assert_eq!(session.effective_value(0), Some("a.txt"));
        assert_eq!(session.state(), &SessionState::Viewing);
    }

    #[test]
    fn test_cycle_suggestions() {
        let mut session = session("cat {FILE}");
        let suggestions = session.selected_parameter().suggestions.clone();
        assert_eq!(suggestions.len(), 3);

        session.begin_edit(None).unwrap();
        session.cycle_suggestion(Cycle::Forward).unwrap();
        assert_eq!(session.buffer(), Some(suggestions[0].as_str()));
        session.cycle_suggestion(Cycle::Backward).unwrap();
        assert_eq!(session.buffer(), Some(suggestions[2].as_str()));
        session.cycle_suggestion(Cycle::Forward).unwrap();
        assert_eq!(session.buffer(), Some(suggestions[0].as_str()));
    }

    #[test]
    fn test_paste_into_selected() {
        let mut session = session("cat {FILE}");
        session.paste_into_selected("").unwrap();
        session.paste_into_selected("\n").unwrap();
        assert!(session.edits().is_empty());

        session.paste_into_selected("pasted.txt\n").unwrap();
        assert_eq!(session.apply(), "cat pasted.txt");
        assert_eq!(session.state(), &SessionState::Viewing);
    }

    #[test]
    fn test_presets_skip_unknown_and_unchanged() {
        let base = "cp {SRC} {DEST}";
        let edits = EditMap::from([
            (0, "{SRC}".to_string()),
            (1, "out".to_string()),
            (7, "ignored".to_string()),
        ]);

        let SessionStart::Interactive(session) =
            CustomizationSession::start_with_edits(base, detect_parameters(base), edits)
        else {
            panic!("expected a session");
        };
        assert_eq!(session.edits(), &EditMap::from([(1, "out".to_string())]));
    }

    #[test]
    fn test_wrong_state_is_rejected() {
        let mut session = session("cat {FILE}");
        assert!(matches!(
            session.commit_edit("x"),
            Err(Error::InvalidTransition { state: "viewing", .. })
        ));
        assert!(session.push_char('x').is_err());
        assert!(session.abort_edit().is_err());

        session.begin_edit(None).unwrap();
        assert!(session.select_next().is_err());
        assert!(session.commit(CommitMode::Execute).is_err());
        assert!(session.cancel().is_err());
        assert!(session.paste_into_selected("x").is_err());
        assert!(matches!(session.state(), SessionState::Editing { .. }));

        session.abort_edit().unwrap();
        session.cancel().unwrap();
        assert!(matches!(
            session.begin_edit(None),
            Err(Error::InvalidTransition { state: "exited", .. })
        ));
    }
}
