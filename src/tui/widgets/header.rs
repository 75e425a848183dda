//! Header widget showing tabs, search box and selection.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::state::{AppState, InputMode, Tab};
use crate::tui::style::Styles;

/// Renders the header bar.
pub fn render_header(frame: &mut Frame, area: Rect, state: &AppState) {
    let chunks = Layout::horizontal([
        Constraint::Length(12), // Title
        Constraint::Length(26), // Tabs
        Constraint::Min(20),    // Search / selection
    ])
    .split(area);

    frame.render_widget(Paragraph::new(" gridview ").style(Styles::header()), chunks[0]);

    // Tabs
    let tabs: Vec<Span> = Tab::all()
        .iter()
        .enumerate()
        .flat_map(|(i, tab)| {
            let style = if *tab == state.current_tab {
                Styles::tab_active()
            } else {
                Styles::tab_inactive()
            };
            let num = format!(" {}:", i + 1);
            let name = format!("{} ", tab.name());
            vec![Span::styled(num, Styles::dim()), Span::styled(name, style)]
        })
        .collect();
    frame.render_widget(
        Paragraph::new(Line::from(tabs)).style(Styles::header()),
        chunks[1],
    );

    // Search box, or selection count when not searching
    let info = match (state.current_tab, state.input_mode) {
        (Tab::Customers, InputMode::Search) => Line::from(vec![
            Span::raw(" Search: "),
            Span::styled(format!("{}_", state.search_input), Styles::search_input()),
        ]),
        (Tab::Customers, InputMode::Normal) => {
            let mut spans = Vec::new();
            let search = &state.table.view_state().search;
            if !search.is_empty() {
                spans.push(Span::raw(format!(" Search: {} ", search)));
            }
            let selected = state.table.selected().len();
            if selected > 0 {
                spans.push(Span::raw(format!(
                    " {} selected  D:delete S:status Esc:clear ",
                    selected
                )));
            }
            Line::from(spans)
        }
        (Tab::Debug, _) => Line::from(Span::raw(format!(
            " {} issues ",
            state.debug.report().len()
        ))),
    };
    frame.render_widget(Paragraph::new(info).style(Styles::header()), chunks[2]);
}
