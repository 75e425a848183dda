//! Transient notification in the bottom-right corner.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::widgets::{Clear, Paragraph};

use crate::notify::Notifier;
use crate::tui::style::Styles;

pub fn render_toast(frame: &mut Frame, area: Rect, notifier: &Notifier) {
    let Some(notice) = notifier.current() else {
        return;
    };
    let text = format!(" {} ", notice.message);
    let width = (text.chars().count() as u16).min(area.width);
    if width == 0 || area.height < 3 {
        return;
    }
    let toast_area = Rect::new(
        area.x + area.width - width,
        area.y + area.height - 3,
        width,
        1,
    );
    frame.render_widget(Clear, toast_area);
    frame.render_widget(
        Paragraph::new(text).style(Styles::notice(notice.level)),
        toast_area,
    );
}
