//! Customer table widget.
//! Thin TUI wrapper over [`crate::view::customers::build_customers_view`].

use ratatui::Frame;
use ratatui::layout::{Constraint, Rect};
use ratatui::text::Span;
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Row, Table, TableState};

use crate::tui::state::AppState;
use crate::tui::style::Styles;
use crate::view::customers::build_customers_view;

pub fn render_customers(frame: &mut Frame, area: Rect, state: &mut AppState) {
    let vm = build_customers_view(&state.table);
    state.clamp_cursor();

    let block = Block::default()
        .title(vm.title.clone())
        .borders(Borders::ALL)
        .style(Styles::default());

    if vm.rows.is_empty() {
        frame.render_widget(Clear, area);
        frame.render_widget(Paragraph::new(vm.empty_message).block(block), area);
        return;
    }

    // Header with sort indicator
    let headers: Vec<Span> = vm
        .headers
        .iter()
        .enumerate()
        .map(|(i, h)| {
            let indicator = if Some(i) == vm.sort_column {
                if vm.sort_ascending { "▲" } else { "▼" }
            } else {
                ""
            };
            Span::styled(format!("{}{}", h, indicator), Styles::table_header())
        })
        .collect();
    let header = Row::new(headers).style(Styles::table_header()).height(1);

    let rows: Vec<Row> = vm
        .rows
        .iter()
        .map(|vr| {
            let cells = vr.cells.iter().map(|c| match c.style {
                Some(s) => Span::styled(c.text.clone(), Styles::from_class(s)),
                None => Span::raw(c.text.clone()),
            });
            Row::new(cells).style(Styles::from_class(vr.style)).height(1)
        })
        .collect();

    let mut constraints: Vec<Constraint> =
        vm.widths.iter().map(|&w| Constraint::Length(w)).collect();
    constraints.push(Constraint::Fill(1));

    let table = Table::new(rows, constraints)
        .header(header)
        .block(block)
        .column_spacing(1)
        .row_highlight_style(Styles::selected());

    let mut table_state = TableState::default().with_selected(Some(state.cursor));
    frame.render_widget(Clear, area);
    frame.render_stateful_widget(table, area, &mut table_state);
}
