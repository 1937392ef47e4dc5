//! Drawing of the customization screen.

use std::io::Write;

use crossterm::cursor::{MoveTo, MoveToNextLine};
use crossterm::style::Color::{DarkGreen, Reset, Yellow};
use crossterm::style::{Attribute, Print, SetAttribute, SetBackgroundColor, SetForegroundColor};
use crossterm::terminal::{Clear, ClearType};
use crossterm::queue;
use rust_how_core::session::{CustomizationSession, SessionState};

use super::keys::KeyBindings;
use crate::command_selection::colors::Palette;

/// Everything besides the session that the screen shows.
pub struct ViewContext<'a> {
    pub palette: &'a Palette,
    pub bindings: &'a KeyBindings,
    pub max_suggestions: usize,
    pub width: u16,
    pub notice: Option<&'a str>,
}

/// The key help shown in the header bar.
pub fn help_line(state: &SessionState, bindings: &KeyBindings) -> String {
    match state {
        SessionState::Editing { .. } => {
            "Enter: Accept   |   Up/Down: Suggestions   |   Esc: Discard".to_string()
        }
        _ => format!(
            "Tab: Next   |   Type: Edit   |   Enter: Run   |   {}: Copy   |   {}: Paste   |   Esc: Cancel",
            bindings.copy, bindings.paste
        ),
    }
}

/// One line of the parameter list, e.g. `[2] Start Time: 00:00:05 -> 00:01:00`.
pub fn parameter_row(session: &CustomizationSession, index: usize) -> String {
    let Some(parameter) = session.parameters().get(index) else {
        return String::new();
    };

    let label = format!("[{}] {}", index + 1, parameter.name);
    match session.edits().get(&index) {
        Some(edit) => format!("{label}: {} -> {edit}", parameter.original_value),
        None => format!("{label}: {}", parameter.original_value),
    }
}

/// At most `max` suggestions for the selected parameter, scrolled so the
/// one picked by cycling is visible. The flag marks that one.
pub fn visible_suggestions(session: &CustomizationSession, max: usize) -> Vec<(&str, bool)> {
    let SessionState::Editing {
        suggestion_cursor, ..
    } = session.state()
    else {
        return Vec::new();
    };

    let suggestions = &session.selected_parameter().suggestions;
    let first = match suggestion_cursor {
        Some(cursor) if max > 0 && *cursor >= max => cursor + 1 - max,
        _ => 0,
    };

    suggestions
        .iter()
        .enumerate()
        .skip(first)
        .take(max)
        .map(|(i, s)| (s.as_str(), *suggestion_cursor == Some(i)))
        .collect()
}

/// Draws the whole screen: help bar, highlighted command, parameter list,
/// edit prompt with suggestions, and the latest notice.
pub fn draw(
    out: &mut impl Write,
    session: &CustomizationSession,
    context: &ViewContext<'_>,
) -> std::io::Result<()> {
    queue!(out, Clear(ClearType::All), MoveTo(0, 0))?;

    let help = help_line(session.state(), context.bindings);
    let padding = " ".repeat((context.width as usize).saturating_sub(help.chars().count() + 2));
    queue!(
        out,
        SetBackgroundColor(DarkGreen),
        Print("  "),
        Print(help),
        Print(padding),
        SetBackgroundColor(Reset),
        MoveToNextLine(2)
    )?;

    let rendered = session.render();
    for (text, span) in rendered.segments() {
        match span {
            Some(span) => {
                let color = context.palette.for_span(span.selected, span.edited);
                if span.selected {
                    queue!(out, SetAttribute(Attribute::Bold), SetAttribute(Attribute::Underlined))?;
                }
                queue!(
                    out,
                    SetForegroundColor(color),
                    Print(text),
                    SetAttribute(Attribute::Reset),
                    SetForegroundColor(Reset)
                )?;
            }
            None => queue!(out, Print(text))?,
        }
    }
    queue!(out, MoveToNextLine(2))?;

    for index in 0..session.parameters().len() {
        let is_selected = index == session.selected_index();
        let marker = if is_selected { "> " } else { "  " };
        if is_selected {
            queue!(out, SetAttribute(Attribute::Bold))?;
        }
        queue!(
            out,
            Print(marker),
            Print(parameter_row(session, index)),
            SetAttribute(Attribute::Reset),
            MoveToNextLine(1)
        )?;
    }

    if let Some(buffer) = session.buffer() {
        let parameter = session.selected_parameter();
        queue!(
            out,
            MoveToNextLine(1),
            SetAttribute(Attribute::Bold),
            Print(format!("{}: ", parameter.name)),
            SetAttribute(Attribute::Reset),
            Print(buffer),
            SetAttribute(Attribute::Reverse),
            Print(" "),
            SetAttribute(Attribute::Reset),
            MoveToNextLine(1)
        )?;

        if !parameter.description.is_empty() {
            queue!(
                out,
                SetAttribute(Attribute::Dim),
                Print(&parameter.description),
                SetAttribute(Attribute::Reset),
                MoveToNextLine(1)
            )?;
        }

        for (suggestion, is_current) in visible_suggestions(session, context.max_suggestions) {
            if is_current {
                queue!(out, SetAttribute(Attribute::Reverse))?;
            }
            queue!(
                out,
                Print("  "),
                Print(suggestion),
                SetAttribute(Attribute::Reset),
                MoveToNextLine(1)
            )?;
        }
    }

    if let Some(notice) = context.notice {
        queue!(
            out,
            MoveToNextLine(1),
            SetForegroundColor(Yellow),
            Print(notice),
            SetForegroundColor(Reset)
        )?;
    }

    out.flush()
}
