//! UI-agnostic view model types.
//!
//! These types represent presentation data without any dependency on a specific
//! rendering framework. The TUI maps them to ratatui styles.

use crate::table::SelectionState;

/// Row-level style classification.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RowStyleClass {
    #[default]
    Normal,
    /// Warning level (TUI: yellow). E.g. "pending" badge.
    Warning,
    /// Critical level (TUI: red).
    Critical,
    /// Positive/active (TUI: green). E.g. "active" badge.
    Active,
    /// Dimmed (TUI: dark gray). E.g. "inactive" badge.
    Dimmed,
    /// Accent (TUI: cyan). Selected rows.
    Accent,
}

/// A single table cell with optional per-cell style override.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewCell {
    pub text: String,
    /// `None` = inherit row style.
    pub style: Option<RowStyleClass>,
}

impl ViewCell {
    pub fn plain(text: String) -> Self {
        Self { text, style: None }
    }

    pub fn styled(text: String, style: RowStyleClass) -> Self {
        Self {
            text,
            style: Some(style),
        }
    }
}

/// One table row, parameterized by entity ID type.
#[derive(Debug, Clone)]
pub struct ViewRow<Id> {
    pub id: Id,
    pub cells: Vec<ViewCell>,
    pub style: RowStyleClass,
}

/// Complete table ready to be rendered by any frontend.
#[derive(Debug, Clone)]
pub struct TableViewModel<Id> {
    pub title: String,
    pub headers: Vec<String>,
    pub widths: Vec<u16>,
    pub rows: Vec<ViewRow<Id>>,
    /// Header index of the sort column, `None` when it is hidden.
    pub sort_column: Option<usize>,
    pub sort_ascending: bool,
    /// Shown instead of rows when there are none.
    pub empty_message: &'static str,
}

/// Checkbox text for a row or the "select all" header.
pub fn checkbox(state: SelectionState) -> &'static str {
    match state {
        SelectionState::None => "[ ]",
        SelectionState::Partial => "[-]",
        SelectionState::All => "[x]",
    }
}
