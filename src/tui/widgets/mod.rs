//! TUI widgets.

mod alerts;
mod checklist;
mod confirm;
mod customers;
mod debug;
mod detail;
mod footer;
mod form;
mod header;
mod help;
mod toast;

pub use alerts::{alerts_height, render_alerts};
pub use checklist::{render_bulk_status, render_columns, render_filter};
pub use confirm::render_confirm;
pub use customers::render_customers;
pub use debug::render_debug;
pub use detail::render_detail;
pub use footer::render_footer;
pub use form::render_form;
pub use header::render_header;
pub use help::render_help;
pub use toast::render_toast;

use ratatui::layout::Rect;

/// Centered popup of `width` x `height`, shrunk to fit inside `area`.
pub(crate) fn popup_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}
