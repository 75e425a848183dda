//! Color scheme and styles.

use ratatui::style::{Color, Modifier, Style};

use crate::alert::AlertKind;
use crate::notify::NoticeLevel;
use crate::view::common::RowStyleClass;

/// Color palette.
pub struct Theme;

impl Theme {
    // Background colors
    pub const BG: Color = Color::Reset;
    pub const HEADER_BG: Color = Color::Blue;
    pub const SELECTED_BG: Color = Color::DarkGray;

    // Foreground colors
    pub const FG: Color = Color::White;
    pub const FG_DIM: Color = Color::DarkGray;
    pub const HEADER_FG: Color = Color::White;

    // Highlight colors
    pub const SUCCESS: Color = Color::Green;
    pub const WARNING: Color = Color::Yellow;
    pub const CRITICAL: Color = Color::Red;
    pub const ACCENT: Color = Color::Cyan;

    // Tab colors
    pub const TAB_ACTIVE: Color = Color::Cyan;
    pub const TAB_INACTIVE: Color = Color::DarkGray;
}

/// Pre-defined styles.
pub struct Styles;

impl Styles {
    /// Default text style.
    pub fn default() -> Style {
        Style::default().fg(Theme::FG).bg(Theme::BG)
    }

    /// Header bar style.
    pub fn header() -> Style {
        Style::default()
            .fg(Theme::HEADER_FG)
            .bg(Theme::HEADER_BG)
            .add_modifier(Modifier::BOLD)
    }

    /// Cursor row style.
    pub fn selected() -> Style {
        Style::default()
            .bg(Theme::SELECTED_BG)
            .add_modifier(Modifier::BOLD)
    }

    /// Table header style.
    pub fn table_header() -> Style {
        Style::default()
            .fg(Theme::HEADER_FG)
            .bg(Theme::HEADER_BG)
            .add_modifier(Modifier::BOLD)
    }

    pub fn tab_active() -> Style {
        Style::default()
            .fg(Theme::TAB_ACTIVE)
            .add_modifier(Modifier::BOLD)
    }

    pub fn tab_inactive() -> Style {
        Style::default().fg(Theme::TAB_INACTIVE)
    }

    /// Dimmed text style.
    pub fn dim() -> Style {
        Style::default().fg(Theme::FG_DIM)
    }

    /// Search input style.
    pub fn search_input() -> Style {
        Style::default()
            .fg(Theme::FG)
            .add_modifier(Modifier::UNDERLINED)
    }

    /// Section header style for popups.
    pub fn section_header() -> Style {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    }

    /// Help text style.
    pub fn help() -> Style {
        Style::default().fg(Theme::FG_DIM)
    }

    /// Help key style (highlighted keys in help line).
    pub fn help_key() -> Style {
        Style::default().fg(Color::Yellow)
    }

    /// Popup border style.
    pub fn popup_border() -> Style {
        Style::default().fg(Theme::ACCENT)
    }

    /// Validation error text.
    pub fn error_text() -> Style {
        Style::default().fg(Theme::CRITICAL)
    }

    /// Maps a UI-agnostic [`RowStyleClass`] to a ratatui [`Style`].
    pub fn from_class(class: RowStyleClass) -> Style {
        match class {
            RowStyleClass::Normal => Self::default(),
            RowStyleClass::Warning => Style::default().fg(Theme::WARNING),
            RowStyleClass::Critical => Style::default()
                .fg(Theme::CRITICAL)
                .add_modifier(Modifier::BOLD),
            RowStyleClass::Active => Style::default().fg(Theme::SUCCESS),
            RowStyleClass::Dimmed => Style::default().fg(Theme::FG_DIM),
            RowStyleClass::Accent => Style::default().fg(Theme::ACCENT),
        }
    }

    /// Toast colors by level.
    pub fn notice(level: NoticeLevel) -> Style {
        let bg = match level {
            NoticeLevel::Info => Theme::ACCENT,
            NoticeLevel::Success => Theme::SUCCESS,
            NoticeLevel::Warning => Theme::WARNING,
            NoticeLevel::Error => Theme::CRITICAL,
        };
        Style::default()
            .fg(Color::Black)
            .bg(bg)
            .add_modifier(Modifier::BOLD)
    }

    /// Alert banner colors by kind. Fading banners are dimmed.
    pub fn alert(kind: AlertKind, fading: bool) -> Style {
        if fading {
            return Self::dim();
        }
        let fg = match kind {
            AlertKind::Info => Theme::ACCENT,
            AlertKind::Success => Theme::SUCCESS,
            AlertKind::Warning => Theme::WARNING,
            AlertKind::Error => Theme::CRITICAL,
        };
        Style::default().fg(fg)
    }
}
