//! Footer widget: "showing" summary, page buttons and key hints.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::state::{AppState, Tab};
use crate::tui::style::Styles;
use crate::view::customers::build_pager;

pub fn render_footer(frame: &mut Frame, area: Rect, state: &AppState) {
    let chunks = Layout::vertical([Constraint::Length(1), Constraint::Length(1)]).split(area);

    if state.current_tab == Tab::Customers {
        let pager = build_pager(&state.table);
        let arrow = |enabled: bool, text: &'static str| {
            Span::styled(text, if enabled { Styles::help_key() } else { Styles::dim() })
        };

        let mut spans = vec![
            Span::raw(format!(" {}  ", pager.summary)),
            arrow(pager.has_prev, "←"),
        ];
        for page in &pager.pages {
            let style = if *page == pager.current {
                Styles::tab_active()
            } else {
                Styles::help()
            };
            spans.push(Span::styled(format!(" {} ", page), style));
        }
        spans.push(arrow(pager.has_next, "→"));
        spans.push(Span::styled(
            format!("   {} per page", pager.page_size),
            Styles::dim(),
        ));
        frame.render_widget(Paragraph::new(Line::from(spans)), chunks[0]);
    }

    let hints: &[(&str, &str)] = match state.current_tab {
        Tab::Customers => &[
            ("/", "search"),
            ("s/r", "sort"),
            ("f", "filter"),
            ("c", "columns"),
            ("n", "add"),
            ("e", "edit"),
            ("d", "delete"),
            ("space", "select"),
            ("x", "export"),
            ("?", "help"),
            ("q", "quit"),
        ],
        Tab::Debug => &[
            ("t/m", "tab"),
            ("y", "copy markdown"),
            ("C", "clear issues"),
            ("?", "help"),
            ("q", "quit"),
        ],
    };
    let spans: Vec<Span> = hints
        .iter()
        .flat_map(|(k, v)| {
            vec![
                Span::styled(format!(" {}", k), Styles::help_key()),
                Span::styled(format!(":{}", v), Styles::help()),
            ]
        })
        .collect();
    frame.render_widget(Paragraph::new(Line::from(spans)), chunks[1]);
}
