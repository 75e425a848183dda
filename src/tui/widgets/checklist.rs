//! Checklist popups: column visibility, value filters, bulk status.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::models::{CustomerField, Status};
use crate::table::capitalize;
use crate::tui::state::{AppState, FILTER_FIELDS};
use crate::tui::style::Styles;

use super::popup_rect;

struct Item {
    label: String,
    checked: Option<bool>,
}

fn render_list(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    items: &[Item],
    cursor: usize,
    hint: Line<'static>,
) {
    let height = items.len() as u16 + 4;
    let popup_area = popup_rect(area, 40, height);
    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .title(format!(" {} ", title))
        .borders(Borders::ALL)
        .border_style(Styles::popup_border());
    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let mut lines: Vec<Line> = items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let mark = match item.checked {
                Some(true) => "[x] ",
                Some(false) => "[ ] ",
                None => "",
            };
            let style = if i == cursor {
                Styles::selected()
            } else {
                Styles::default()
            };
            Line::from(Span::styled(format!(" {}{}", mark, item.label), style))
        })
        .collect();
    lines.push(Line::from(""));
    lines.push(hint);

    frame.render_widget(Paragraph::new(lines), inner);
}

fn hint(keys: &[(&'static str, &'static str)]) -> Line<'static> {
    Line::from(
        keys.iter()
            .flat_map(|(k, v)| {
                vec![
                    Span::styled(format!(" {}", k), Styles::help_key()),
                    Span::styled(format!(" {}", v), Styles::help()),
                ]
            })
            .collect::<Vec<_>>(),
    )
}

pub fn render_columns(frame: &mut Frame, area: Rect, state: &AppState, cursor: usize) {
    let items: Vec<Item> = CustomerField::ALL
        .iter()
        .map(|f| Item {
            label: capitalize(f.name()),
            checked: Some(state.table.view_state().is_visible(f)),
        })
        .collect();
    render_list(
        frame,
        area,
        "Columns",
        &items,
        cursor,
        hint(&[("Space", "toggle"), ("Esc", "close")]),
    );
}

pub fn render_filter(
    frame: &mut Frame,
    area: Rect,
    state: &AppState,
    field: CustomerField,
    cursor: usize,
) {
    let items: Vec<Item> = state
        .filter_values(field)
        .into_iter()
        .map(|v| Item {
            checked: Some(state.is_filter_value_checked(field, &v)),
            label: v,
        })
        .collect();
    let tabs: Vec<String> = FILTER_FIELDS
        .iter()
        .map(|f| {
            if *f == field {
                format!("[{}]", capitalize(f.name()))
            } else {
                capitalize(f.name())
            }
        })
        .collect();
    render_list(
        frame,
        area,
        &format!("Filter {}", tabs.join(" ")),
        &items,
        cursor,
        hint(&[("Space", "toggle"), ("Tab", "column"), ("0", "clear"), ("Esc", "close")]),
    );
}

pub fn render_bulk_status(frame: &mut Frame, area: Rect, state: &AppState, cursor: usize) {
    let items: Vec<Item> = Status::all()
        .iter()
        .map(|s| Item {
            label: s.label().to_string(),
            checked: None,
        })
        .collect();
    render_list(
        frame,
        area,
        &format!("Set status of {} items", state.table.selected().len()),
        &items,
        cursor,
        hint(&[("Enter", "apply"), ("Esc", "cancel")]),
    );
}
