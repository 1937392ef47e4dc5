//! Type definitions for command selection and UI state.
//!
//! This module defines the core types used throughout the command selection
//! interface, including user choices and UI state management.

/// Represents the user's command selection choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandChoice {
    /// 0-based index into the candidate list.
    Index(usize),
    Quit,
}

/// Represents the user's choice when confirming a command run.
///
/// After a command is customized, the user is prompted to confirm
/// execution with these options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunChoice {
    Yes,
    No,
    ChangeParams,
}

/// Direction to cycle through commands in the selection UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleDirection {
    Up,
    Down,
}

/// State for the UI viewport.
///
/// Tracks the visible portion of the command list when there are more
/// commands than can fit on screen.
#[derive(Clone, PartialEq, Debug)]
pub struct ViewportState {
    pub offset: usize,
    pub height: u16,
    pub width: u16,
}

/// Complete UI state for the command selection interface.
#[derive(Clone, PartialEq, Debug)]
pub struct UiState {
    /// Position of the selection within the displayed (filtered) rows
    pub selected_index: usize,
    /// Viewport state for scrolling
    pub viewport: ViewportState,
    /// Whether the user is currently filtering/searching
    pub is_filtering: bool,
    /// Current filter/search text
    pub filter_text: String,
}

impl UiState {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            selected_index: 0,
            viewport: ViewportState {
                offset: 0,
                height: height.saturating_sub(2), // Subtract 2 for header and filter line
                width,
            },
            is_filtering: false,
            filter_text: String::new(),
        }
    }
}
