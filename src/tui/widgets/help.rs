//! Help popup widget.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use crate::tui::state::Tab;
use crate::tui::style::Styles;

use super::popup_rect;

const GLOBAL_KEYS: &[(&str, &str)] = &[
    ("Tab, 1, 2", "Switch between Customers and Debug"),
    ("X", "Close the first dismissible alert"),
    ("?", "Toggle this help"),
    ("q", "Quit"),
];

const TABLE_KEYS: &[(&str, &str)] = &[
    ("Up/Down, j/k", "Move the cursor"),
    ("Left/Right, h/l", "Previous/next page"),
    ("Home/End", "First/last page"),
    ("+ / -", "Change page size"),
    ("/", "Search all columns"),
    ("s", "Sort by next column"),
    ("r", "Reverse sort direction"),
    ("f", "Filter by status or country"),
    ("c", "Show/hide columns"),
    ("Space", "Select row"),
    ("a", "Select/deselect page"),
    ("Esc", "Clear selection"),
    ("Enter, v", "View record"),
    ("n", "Add record"),
    ("e", "Edit record"),
    ("d", "Delete record"),
    ("D", "Delete selected records"),
    ("S", "Set status of selected records"),
    ("x", "Export CSV"),
];

const DEBUG_KEYS: &[(&str, &str)] = &[
    ("t / m", "Table / markdown view"),
    ("Left/Right", "Toggle view"),
    ("Up/Down", "Scroll"),
    ("y", "Copy markdown report"),
    ("C", "Clear issues on the server"),
];

fn section(title: &str, keys: &[(&str, &str)]) -> Vec<Line<'static>> {
    let mut lines = vec![Line::from(Span::styled(
        title.to_string(),
        Styles::section_header(),
    ))];
    lines.extend(keys.iter().map(|(k, v)| {
        Line::from(vec![
            Span::styled(format!("  {:<18}", k), Styles::help_key()),
            Span::raw(v.to_string()),
        ])
    }));
    lines.push(Line::from(""));
    lines
}

/// Renders the help popup centered on screen with scroll support.
pub fn render_help(frame: &mut Frame, area: Rect, tab: Tab, scroll: &mut usize) {
    let popup_width = (area.width * 60 / 100).clamp(40, 80);
    let popup_height = (area.height * 80 / 100).clamp(10, 30);
    let popup_area = popup_rect(area, popup_width, popup_height);

    frame.render_widget(Clear, popup_area);

    let mut content = match tab {
        Tab::Customers => section("Customers", TABLE_KEYS),
        Tab::Debug => section("Debug", DEBUG_KEYS),
    };
    content.extend(section("General", GLOBAL_KEYS));
    let content_lines = content.len();

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let chunks = Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).split(inner);

    // Clamp scroll to valid range
    let visible_height = chunks[0].height as usize;
    let max_scroll = content_lines.saturating_sub(visible_height);
    if *scroll > max_scroll {
        *scroll = max_scroll;
    }

    let paragraph = Paragraph::new(content)
        .wrap(Wrap { trim: false })
        .scroll((*scroll as u16, 0))
        .style(Style::default().fg(Color::White));
    frame.render_widget(paragraph, chunks[0]);

    let scroll_info = if max_scroll > 0 {
        format!(" [{}/{}]", *scroll + 1, max_scroll + 1)
    } else {
        String::new()
    };
    let footer = Line::from(vec![
        Span::styled("Esc", Styles::help_key()),
        Span::styled(" close", Styles::help()),
        Span::styled(scroll_info, Styles::dim()),
    ]);
    frame.render_widget(Paragraph::new(footer), chunks[1]);
}
