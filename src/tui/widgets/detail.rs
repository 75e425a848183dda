//! Record detail popup.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::models::{Customer, CustomerField};
use crate::table::{TableRow, capitalize};
use crate::tui::style::Styles;
use crate::view::customers::status_style;

use super::popup_rect;

pub fn render_detail(frame: &mut Frame, area: Rect, customer: &Customer) {
    let popup_area = popup_rect(area, 56, 11);
    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .title(format!(" Customer #{} ", customer.id))
        .borders(Borders::ALL)
        .border_style(Styles::popup_border());
    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let mut lines: Vec<Line> = CustomerField::ALL
        .iter()
        .map(|&field| {
            let value = match field {
                CustomerField::Status => Span::styled(
                    customer.status.label(),
                    Styles::from_class(status_style(customer.status)),
                ),
                _ => Span::raw(customer.cell(field)),
            };
            Line::from(vec![
                Span::styled(format!(" {:<9}", capitalize(field.name())), Styles::help()),
                value,
            ])
        })
        .collect();
    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled(" e", Styles::help_key()),
        Span::styled(" edit  ", Styles::help()),
        Span::styled("Esc", Styles::help_key()),
        Span::styled(" close", Styles::help()),
    ]));

    frame.render_widget(Paragraph::new(lines), inner);
}
