use std::fmt::Display;
use std::io::{stdout, Write};
use std::time::Duration;

use crossterm::cursor::MoveTo;
use crossterm::event::{
    Event, KeyCode, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use crossterm::style::Color::{DarkBlue, DarkGreen, DarkRed, Reset, Yellow};
use crossterm::style::{
    Attribute, Color, Print, SetAttribute, SetBackgroundColor, SetForegroundColor,
};
use crossterm::terminal::{Clear, ClearType};
use crossterm::{cursor, event, queue, terminal};
use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;
use log::debug;
use rust_how_core::command_definitions::CommandCandidate;
use rust_how_core::error::Result;
use rust_how_core::safety;

use super::types::{CommandChoice, CycleDirection, UiState};
use crate::command_selection::types::CycleDirection::{Down, Up};
use crate::terminal::{TerminalFeatures, TerminalGuard};

/// What a key press changes: a final choice, a new UI state, or a move.
type KeyResponse = (Option<CommandChoice>, Option<UiState>, Option<CycleDirection>);

/// A candidate as shown in the list.
struct CandidateRow {
    label: String,
    is_dangerous: bool,
}

impl CandidateRow {
    fn new(candidate: &CommandCandidate) -> Self {
        Self {
            label: candidate.to_string(),
            is_dangerous: safety::is_dangerous(&candidate.command),
        }
    }
}

fn redraw_ui(ui_state: &UiState, indexes_to_display: &[usize], rows: &[CandidateRow]) -> Result<()> {
    let mut stdout = stdout();

    queue!(stdout, Clear(ClearType::All), MoveTo(0, 0))?;

    print_header(ui_state, indexes_to_display.len())?;

    if indexes_to_display.is_empty() {
        queue!(
            stdout,
            MoveTo(0, 1),
            SetForegroundColor(Color::Red),
            Print("No matching commands!".to_string()),
            SetAttribute(Attribute::Reset),
            cursor::MoveToNextLine(1)
        )?;
    } else {
        print_commands_with_selection(ui_state, rows, indexes_to_display)?;
    }

    if ui_state.is_filtering {
        queue!(
            stdout,
            SetAttribute(Attribute::Bold),
            Print(format!("Filter: {}", ui_state.filter_text)),
            SetAttribute(Attribute::Reset)
        )?;
    }

    stdout.flush()?;
    Ok(())
}

/// Prompts the user to choose one of the candidate commands.
///
/// The terminal is restored before this returns.
///
/// # Errors
///
/// Returns [`rust_how_core::error::Error::Terminal`] if the terminal cannot
/// be set up, or an I/O error while drawing or reading events.
pub fn prompt_for_command_choice(candidates: &[CommandCandidate]) -> Result<CommandChoice> {
    let _terminal_guard = TerminalGuard::acquire(TerminalFeatures {
        mouse_capture: true,
        bracketed_paste: false,
    })?;

    let rows: Vec<CandidateRow> = candidates.iter().map(CandidateRow::new).collect();
    let (width, height) = terminal::size()?;

    let mut ui_state = UiState::new(width, height);
    let mut indexes_to_display = filter_displayed_indexes(&rows, &ui_state.filter_text);

    let mut down_row: Option<u16> = None;
    let mut index_change_direction: Option<CycleDirection> = None;
    let mut new_ui_state: Option<UiState> = None;

    redraw_ui(&ui_state, &indexes_to_display, &rows)?;

    loop {
        if let Some(current_ui_state) = new_ui_state.take() {
            if current_ui_state != ui_state {
                indexes_to_display = filter_displayed_indexes(&rows, &current_ui_state.filter_text);
                redraw_ui(&current_ui_state, &indexes_to_display, &rows)?;
                ui_state = current_ui_state;
            }
        }

        if !event::poll(Duration::from_millis(500))? {
            continue;
        }

        match event::read()? {
            Event::Mouse(MouseEvent {
                kind,
                row,
                modifiers,
                ..
            }) if modifiers == KeyModifiers::NONE => match kind {
                MouseEventKind::Down(MouseButton::Left) => down_row = Some(row),
                MouseEventKind::Up(MouseButton::Left) => {
                    if let Some(clicked) = down_row.take().and_then(|down_row| {
                        clicked_command(down_row, &ui_state, &indexes_to_display)
                    }) {
                        return Ok(CommandChoice::Index(clicked));
                    }
                }
                MouseEventKind::ScrollDown => index_change_direction = Some(Down),
                MouseEventKind::ScrollUp => index_change_direction = Some(Up),
                _ => {}
            },
            Event::Key(key_event) if key_event.kind == KeyEventKind::Press => {
                let (command_choice, new_state, new_direction) =
                    handle_key_event(key_event, &ui_state, &indexes_to_display, rows.len());

                if let Some(choice) = command_choice {
                    debug!("Command choice: {choice:?}");
                    return Ok(choice);
                }

                if new_state.is_some() {
                    new_ui_state = new_state;
                }

                if new_direction.is_some() {
                    index_change_direction = new_direction;
                }
            }
            Event::Resize(width, height) => {
                new_ui_state = Some(handle_resize(
                    width,
                    height,
                    &ui_state,
                    &indexes_to_display,
                ));
            }
            _ => {}
        }

        if let Some(direction) = index_change_direction.take() {
            let base_state = new_ui_state.as_ref().unwrap_or(&ui_state);
            new_ui_state = Some(move_selected_index(
                base_state,
                indexes_to_display.len(),
                Some(&direction),
            ));
        }
    }
}

/// Maps a clicked screen row to a candidate index.
fn clicked_command(row: u16, ui_state: &UiState, indexes_to_display: &[usize]) -> Option<usize> {
    if row == 0 {
        // Click on header
        return None;
    }

    let clicked_index = (row - 1) as usize + ui_state.viewport.offset;
    indexes_to_display.get(clicked_index).copied()
}

/// Handle keyboard events in the command selection UI
fn handle_key_event(
    key_event: event::KeyEvent,
    ui_state: &UiState,
    indexes_to_display: &[usize],
    candidate_count: usize,
) -> KeyResponse {
    match key_event.code {
        KeyCode::Up => (None, None, Some(Up)),
        KeyCode::Down => (None, None, Some(Down)),
        KeyCode::Enter => (
            indexes_to_display
                .get(ui_state.selected_index)
                .map(|i| CommandChoice::Index(*i)),
            None,
            None,
        ),
        KeyCode::Char('c') if key_event.modifiers.contains(KeyModifiers::CONTROL) => {
            (Some(CommandChoice::Quit), None, None)
        }
        KeyCode::Backspace if ui_state.is_filtering => {
            if ui_state.filter_text.is_empty() {
                return (None, None, None);
            }

            let mut updated_state = ui_state.clone();
            updated_state.filter_text.pop();
            (None, Some(reset_selection(updated_state)), None)
        }
        KeyCode::Char(c) if ui_state.is_filtering => {
            let mut updated_state = ui_state.clone();
            updated_state.filter_text.push(c);
            (None, Some(reset_selection(updated_state)), None)
        }
        KeyCode::Esc if ui_state.is_filtering => {
            let mut updated_state = ui_state.clone();
            updated_state.is_filtering = false;
            updated_state.filter_text = String::new();
            (None, Some(reset_selection(updated_state)), None)
        }
        KeyCode::Char('/') => {
            let mut updated_state = ui_state.clone();
            updated_state.is_filtering = true;
            (None, Some(updated_state), None)
        }
        KeyCode::Char('k') => (None, None, Some(Up)),
        KeyCode::Char('j') => (None, None, Some(Down)),
        KeyCode::Char(c @ '1'..='9') => {
            let index = c as usize - '1' as usize;
            let choice = (index < candidate_count).then_some(CommandChoice::Index(index));
            (choice, None, None)
        }
        KeyCode::Char('q') | KeyCode::Esc => (Some(CommandChoice::Quit), None, None),
        _ => (None, None, None),
    }
}

/// Moves the selection back to the first row, used when the filter changes.
fn reset_selection(mut ui_state: UiState) -> UiState {
    ui_state.selected_index = 0;
    ui_state.viewport.offset = 0;
    ui_state
}

/// Handle window resize events
fn handle_resize(
    width: u16,
    height: u16,
    ui_state: &UiState,
    indexes_to_display: &[usize],
) -> UiState {
    let new_height = height.saturating_sub(2);
    let mut ui_state = ui_state.clone();
    let selected_index = ui_state.selected_index;
    let mut new_viewport = ui_state.viewport.clone();
    new_viewport.width = width;

    // If growing taller, try to show more items above current selection
    match new_height.cmp(&ui_state.viewport.height) {
        std::cmp::Ordering::Greater if new_viewport.offset > 0 => {
            let height_increase = new_height - new_viewport.height;
            new_viewport.offset = new_viewport.offset.saturating_sub(height_increase as usize);
        }
        std::cmp::Ordering::Less if selected_index >= new_viewport.offset + new_height as usize => {
            new_viewport.offset = selected_index.saturating_sub((new_height as usize).saturating_sub(1));

            if new_viewport.offset + new_height as usize > indexes_to_display.len() {
                new_viewport.offset = indexes_to_display.len().saturating_sub(new_height as usize);
            }
        }
        _ => {}
    }

    new_viewport.height = new_height;
    ui_state.viewport = new_viewport;
    ui_state
}

/// Print the header for the command selection UI
fn print_header(ui_state: &UiState, command_display_count: usize) -> Result<()> {
    let mut stdout = stdout();
    let width = ui_state.viewport.width as usize;

    let left_padding_size = 2usize;
    let left_padding = " ".repeat(left_padding_size);

    let instructions = if ui_state.is_filtering {
        "<esc>: Stop Filtering".to_string()
    } else {
        format!(
            "/: Begin Filtering   |   {}/{}   |   q: Quit",
            pad_to_width_of(ui_state.selected_index + 1, command_display_count),
            command_display_count
        )
    };

    let right_padding =
        " ".repeat(width.saturating_sub(left_padding_size + instructions.chars().count()));

    queue!(
        stdout,
        MoveTo(0, 0),
        SetBackgroundColor(DarkGreen),
        Print(left_padding),
        Print(instructions),
        Print(right_padding),
        SetBackgroundColor(Reset),
        SetForegroundColor(Reset),
    )?;

    Ok(())
}

/// Pad a value to match the width of the largest value
fn pad_to_width_of<T: Display>(value: T, max_number: usize) -> String {
    let width = format!("{max_number}").len();
    format!("{:>width$}", value.to_string())
}

/// The text of one row, `[ n] command (description)`, indexes 1-based.
fn row_content(candidate_index: usize, rows: &[CandidateRow]) -> String {
    let index_as_string = pad_to_width_of(candidate_index + 1, rows.len());
    format!("[{index_as_string}] {}", rows[candidate_index].label)
}

/// Clear and write a command row in the selection UI
fn clear_and_write_command_row(
    row: u16,
    rows: &[CandidateRow],
    candidate_index: usize,
    is_selected: bool,
    terminal_width: u16,
) -> Result<()> {
    let mut stdout = stdout();

    queue!(stdout, MoveTo(0, row), Clear(ClearType::CurrentLine))?;

    let content = row_content(candidate_index, rows);
    let padding = " ".repeat((terminal_width as usize).saturating_sub(content.chars().count()));

    if is_selected {
        queue!(
            stdout,
            SetAttribute(Attribute::Bold),
            SetBackgroundColor(DarkBlue),
            SetForegroundColor(Yellow),
        )?;
    } else {
        let foreground_color = if rows[candidate_index].is_dangerous {
            DarkRed
        } else {
            Reset
        };

        queue!(
            stdout,
            SetBackgroundColor(Reset),
            SetForegroundColor(foreground_color),
        )?;
    }

    queue!(
        stdout,
        Print(content),
        Print(padding),
        SetAttribute(Attribute::Reset),
        SetBackgroundColor(Reset),
        SetForegroundColor(Reset),
    )?;

    Ok(())
}

/// Print all commands with the selected one highlighted
fn print_commands_with_selection(
    ui_state: &UiState,
    rows: &[CandidateRow],
    indexes_to_display: &[usize],
) -> Result<()> {
    let mut stdout = stdout();

    let viewport = &ui_state.viewport;

    let visible_commands = indexes_to_display
        .iter()
        .skip(viewport.offset)
        .take(viewport.height as usize);

    for (i, candidate_index) in visible_commands.enumerate() {
        let is_selected = i + viewport.offset == ui_state.selected_index;

        clear_and_write_command_row(
            i as u16 + 1,
            rows,
            *candidate_index,
            is_selected,
            viewport.width,
        )?;
        queue!(stdout, cursor::MoveToNextLine(1))?;
    }

    Ok(())
}

/// Move the selected index in the given direction
fn move_selected_index(
    ui_state: &UiState,
    commands_to_display_length: usize,
    direction: Option<&CycleDirection>,
) -> UiState {
    if commands_to_display_length == 0 {
        return ui_state.clone();
    }

    let mut new_index = ui_state.selected_index;
    let mut ui_state = ui_state.clone();
    let viewport_height = (ui_state.viewport.height as usize).max(1);

    match direction {
        Some(Up) => {
            if new_index == 0 {
                new_index = commands_to_display_length - 1;
                ui_state.viewport.offset = new_index.saturating_sub(viewport_height - 1);
            } else {
                new_index -= 1;
                if new_index < ui_state.viewport.offset {
                    ui_state.viewport.offset = new_index;
                }
            }
        }
        Some(Down) => {
            new_index = (new_index + 1) % commands_to_display_length;
            if new_index < ui_state.selected_index {
                ui_state.viewport.offset = 0;
            } else if new_index >= ui_state.viewport.offset + viewport_height {
                ui_state.viewport.offset = new_index - viewport_height + 1;
            }
        }
        None => {}
    }

    ui_state.selected_index = new_index;
    ui_state
}

/// Candidate indexes matching the filter, in list order.
///
/// A numeric filter matches the 1-based index, anything else is matched
/// fuzzily against the command and its description.
fn filter_displayed_indexes(rows: &[CandidateRow], predicate: &str) -> Vec<usize> {
    if predicate.is_empty() {
        return (0..rows.len()).collect();
    }

    let matcher = SkimMatcherV2::default();
    let predicate_index = predicate.parse::<usize>().ok();

    rows.iter()
        .enumerate()
        .filter(|(i, row)| match predicate_index {
            Some(pred_idx) => (i + 1).to_string().contains(&pred_idx.to_string()),
            None => matcher.fuzzy_match(&row.label, predicate).is_some(),
        })
        .map(|(i, _)| i)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEvent;

    fn rows(commands: &[&str]) -> Vec<CandidateRow> {
        commands
            .iter()
            .map(|c| CandidateRow::new(&CommandCandidate::new(*c)))
            .collect()
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn filtering(text: &str) -> UiState {
        let mut ui_state = UiState::new(80, 12);
        ui_state.is_filtering = true;
        ui_state.filter_text = text.to_string();
        ui_state
    }

    #[test]
    fn test_candidate_row_flags_dangerous_commands() {
        let rows = rows(&["ls -la", "rm -rf build"]);

        assert!(!rows[0].is_dangerous);
        assert!(rows[1].is_dangerous);
    }

    #[test]
    fn test_row_content_uses_padded_one_based_index() {
        let commands: Vec<String> = (0..12).map(|i| format!("echo {i}")).collect();
        let commands: Vec<&str> = commands.iter().map(String::as_str).collect();
        let rows = rows(&commands);

        assert_eq!(row_content(0, &rows), "[ 1] echo 0");
        assert_eq!(row_content(11, &rows), "[12] echo 11");
    }

    #[test]
    fn test_filter_by_text_and_index() {
        let rows = rows(&["ffmpeg -i a.mp4 b.gif", "convert a.png b.jpg", "ffprobe a.mp4"]);

        assert_eq!(filter_displayed_indexes(&rows, ""), vec![0, 1, 2]);
        assert_eq!(filter_displayed_indexes(&rows, "ffmpeg"), vec![0]);
        assert_eq!(filter_displayed_indexes(&rows, "ff"), vec![0, 2]);
        assert_eq!(filter_displayed_indexes(&rows, "2"), vec![1]);
        assert!(filter_displayed_indexes(&rows, "zzz").is_empty());
    }

    #[test]
    fn test_enter_selects_the_displayed_row() {
        let mut ui_state = filtering("ff");
        ui_state.selected_index = 1;

        let (choice, _, _) = handle_key_event(key(KeyCode::Enter), &ui_state, &[0, 2], 3);
        assert_eq!(choice, Some(CommandChoice::Index(2)));

        let (choice, _, _) = handle_key_event(key(KeyCode::Enter), &ui_state, &[], 3);
        assert_eq!(choice, None);
    }

    #[test]
    fn test_digits_select_when_not_filtering() {
        let ui_state = UiState::new(80, 12);

        let (choice, _, _) = handle_key_event(key(KeyCode::Char('2')), &ui_state, &[0, 1, 2], 3);
        assert_eq!(choice, Some(CommandChoice::Index(1)));

        let (choice, _, _) = handle_key_event(key(KeyCode::Char('7')), &ui_state, &[0, 1, 2], 3);
        assert_eq!(choice, None);

        let (choice, state, _) =
            handle_key_event(key(KeyCode::Char('2')), &filtering("x"), &[0, 1, 2], 3);
        assert_eq!(choice, None);
        assert_eq!(state.unwrap().filter_text, "x2");
    }

    #[test]
    fn test_filtering_keys() {
        let ui_state = UiState::new(80, 12);

        let (_, state, _) = handle_key_event(key(KeyCode::Char('/')), &ui_state, &[0], 1);
        assert!(state.unwrap().is_filtering);

        let mut scrolled = filtering("abc");
        scrolled.selected_index = 4;
        let (_, state, _) = handle_key_event(key(KeyCode::Backspace), &scrolled, &[0], 1);
        let state = state.unwrap();
        assert_eq!(state.filter_text, "ab");
        assert_eq!(state.selected_index, 0);

        let (choice, state, _) = handle_key_event(key(KeyCode::Esc), &scrolled, &[0], 1);
        assert_eq!(choice, None);
        let state = state.unwrap();
        assert!(!state.is_filtering);
        assert!(state.filter_text.is_empty());
    }

    #[test]
    fn test_quit_keys() {
        let ui_state = UiState::new(80, 12);

        for event in [
            key(KeyCode::Char('q')),
            key(KeyCode::Esc),
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
        ] {
            let (choice, _, _) = handle_key_event(event, &ui_state, &[0], 1);
            assert_eq!(choice, Some(CommandChoice::Quit));
        }

        // Typing `q` into the filter does not quit
        let (choice, _, _) = handle_key_event(key(KeyCode::Char('q')), &filtering(""), &[0], 1);
        assert_eq!(choice, None);
    }

    #[test]
    fn test_navigation_keys() {
        let ui_state = UiState::new(80, 12);

        for (code, expected) in [
            (KeyCode::Up, Up),
            (KeyCode::Char('k'), Up),
            (KeyCode::Down, Down),
            (KeyCode::Char('j'), Down),
        ] {
            let (_, _, direction) = handle_key_event(key(code), &ui_state, &[0, 1], 2);
            assert_eq!(direction, Some(expected));
        }
    }

    #[test]
    fn test_move_selected_index_wraps_and_scrolls() {
        // Three visible rows out of five
        let ui_state = UiState::new(80, 5);

        let up = move_selected_index(&ui_state, 5, Some(&Up));
        assert_eq!(up.selected_index, 4);
        assert_eq!(up.viewport.offset, 2);

        let mut state = ui_state.clone();
        for _ in 0..3 {
            state = move_selected_index(&state, 5, Some(&Down));
        }
        assert_eq!(state.selected_index, 3);
        assert_eq!(state.viewport.offset, 1);

        let wrapped = move_selected_index(&up, 5, Some(&Down));
        assert_eq!(wrapped.selected_index, 0);
        assert_eq!(wrapped.viewport.offset, 0);

        assert_eq!(move_selected_index(&ui_state, 0, Some(&Down)), ui_state);
    }

    #[test]
    fn test_handle_resize_keeps_selection_visible() {
        let mut ui_state = UiState::new(80, 12);
        ui_state.selected_index = 8;

        let resized = handle_resize(100, 6, &ui_state, &(0..10).collect::<Vec<_>>());
        assert_eq!(resized.viewport.width, 100);
        assert_eq!(resized.viewport.height, 4);
        assert_eq!(resized.viewport.offset, 5);

        let grown = handle_resize(100, 12, &resized, &(0..10).collect::<Vec<_>>());
        assert_eq!(grown.viewport.offset, 0);
    }

    #[test]
    fn test_clicked_command() {
        let mut ui_state = UiState::new(80, 12);
        ui_state.viewport.offset = 1;

        assert_eq!(clicked_command(0, &ui_state, &[0, 2, 4]), None);
        assert_eq!(clicked_command(1, &ui_state, &[0, 2, 4]), Some(2));
        assert_eq!(clicked_command(3, &ui_state, &[0, 2, 4]), None);
    }

    #[test]
    fn test_pad_to_width_of() {
        assert_eq!(pad_to_width_of(3, 120), "  3");
        assert_eq!(pad_to_width_of(10, 9), "10");
    }
}
