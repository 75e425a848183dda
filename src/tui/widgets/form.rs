//! Add/edit record popup.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::tui::state::{FormField, FormState};
use crate::tui::style::Styles;

use super::popup_rect;

pub fn render_form(frame: &mut Frame, area: Rect, form: &FormState) {
    let popup_area = popup_rect(area, 60, 15);
    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .title(format!(" {} ", form.title()))
        .borders(Borders::ALL)
        .border_style(Styles::popup_border());
    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let mut lines = Vec::new();
    for field in FormField::ALL {
        let focused = field == form.focus;
        let label_style = if focused {
            Styles::tab_active()
        } else {
            Styles::help()
        };
        let value = match field {
            FormField::Status => format!("< {} >", form.value(field)),
            _ if focused => format!("{}_", form.value(field)),
            _ => form.value(field).to_string(),
        };
        lines.push(Line::from(vec![
            Span::styled(format!(" {:<8} ", field.label()), label_style),
            Span::styled(value, Styles::search_input()),
        ]));
        match form.error(field) {
            Some(msg) => lines.push(Line::from(Span::styled(
                format!("          {}", msg),
                Styles::error_text(),
            ))),
            None => lines.push(Line::from("")),
        }
    }
    lines.push(Line::from(vec![
        Span::styled(" Enter", Styles::help_key()),
        Span::styled(" save  ", Styles::help()),
        Span::styled("Tab", Styles::help_key()),
        Span::styled(" next field  ", Styles::help()),
        Span::styled("Esc", Styles::help_key()),
        Span::styled(" cancel", Styles::help()),
    ]));

    frame.render_widget(Paragraph::new(lines), inner);
}
