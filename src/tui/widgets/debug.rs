//! Debug viewer widget: concern table or markdown report.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Row, Table, Wrap};

use crate::debug::DebugTab;
use crate::tui::state::AppState;
use crate::tui::style::Styles;
use crate::view::concerns::build_concerns_view;

pub fn render_debug(frame: &mut Frame, area: Rect, state: &mut AppState) {
    frame.render_widget(Clear, area);
    let chunks = Layout::vertical([Constraint::Length(1), Constraint::Min(1)]).split(area);

    // Tab strip
    let tabs: Vec<Span> = [DebugTab::Table, DebugTab::Markdown]
        .iter()
        .map(|tab| {
            let style = if *tab == state.debug.tab() {
                Styles::tab_active()
            } else {
                Styles::tab_inactive()
            };
            Span::styled(format!(" [{}] ", tab.name()), style)
        })
        .collect();
    frame.render_widget(Paragraph::new(Line::from(tabs)), chunks[0]);

    match state.debug.tab() {
        DebugTab::Table => render_table(frame, chunks[1], state),
        DebugTab::Markdown => render_markdown(frame, chunks[1], state),
    }
}

fn render_table(frame: &mut Frame, area: Rect, state: &mut AppState) {
    let vm = build_concerns_view(state.debug.report());
    let block = Block::default()
        .title(vm.title.clone())
        .borders(Borders::ALL)
        .style(Styles::default());

    if vm.rows.is_empty() {
        frame.render_widget(Paragraph::new(vm.empty_message).block(block), area);
        return;
    }

    let visible = area.height.saturating_sub(3) as usize;
    let max_scroll = vm.rows.len().saturating_sub(visible);
    state.debug.scroll = state.debug.scroll.min(max_scroll);

    let header = Row::new(vm.headers.clone()).style(Styles::table_header());
    let rows: Vec<Row> = vm
        .rows
        .iter()
        .skip(state.debug.scroll)
        .map(|vr| {
            Row::new(vr.cells.iter().map(|c| c.text.clone())).style(Styles::from_class(vr.style))
        })
        .collect();

    let mut constraints: Vec<Constraint> =
        vm.widths.iter().map(|&w| Constraint::Length(w)).collect();
    constraints.push(Constraint::Fill(1));

    let table = Table::new(rows, constraints)
        .header(header)
        .block(block)
        .column_spacing(1);
    frame.render_widget(table, area);
}

fn render_markdown(frame: &mut Frame, area: Rect, state: &mut AppState) {
    let markdown = state.debug.report().to_markdown();
    let lines: Vec<Line> = markdown
        .lines()
        .map(|l| {
            if l.starts_with("##") {
                Line::from(Span::styled(l.to_string(), Styles::section_header()))
            } else {
                Line::from(l.to_string())
            }
        })
        .collect();

    let visible = area.height.saturating_sub(2) as usize;
    let max_scroll = lines.len().saturating_sub(visible);
    state.debug.scroll = state.debug.scroll.min(max_scroll);

    let block = Block::default()
        .title(" Markdown (y: copy) ")
        .borders(Borders::ALL)
        .style(Styles::default());
    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false })
        .scroll((state.debug.scroll as u16, 0));
    frame.render_widget(paragraph, area);
}
