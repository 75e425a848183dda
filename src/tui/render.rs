//! Main rendering logic for TUI.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout};

use super::state::{AppState, PopupState, Tab};
use super::widgets::{
    alerts_height, render_alerts, render_bulk_status, render_columns, render_confirm,
    render_customers, render_debug, render_detail, render_filter, render_footer, render_form,
    render_header, render_help, render_toast,
};

/// Main render function.
pub fn render(frame: &mut Frame, state: &mut AppState) {
    let area = frame.area();

    // Main layout: header, alerts, content, footer
    let chunks = Layout::vertical([
        Constraint::Length(1),                           // Header
        Constraint::Length(alerts_height(&state.alerts)), // Alert banners
        Constraint::Min(5),                              // Content area
        Constraint::Length(2),                           // Pager + key hints
    ])
    .split(area);

    render_header(frame, chunks[0], state);
    render_alerts(frame, chunks[1], &state.alerts);

    match state.current_tab {
        Tab::Customers => render_customers(frame, chunks[2], state),
        Tab::Debug => render_debug(frame, chunks[2], state),
    }

    render_footer(frame, chunks[3], state);

    // Popups (rendered last to overlay everything)
    match &mut state.popup {
        PopupState::None => {}
        PopupState::Help { scroll } => render_help(frame, area, state.current_tab, scroll),
        PopupState::Detail { id } => {
            if let Some(customer) = state.table.get(*id) {
                render_detail(frame, area, customer);
            }
        }
        PopupState::Form(form) => render_form(frame, area, form),
        PopupState::Confirm(action) => {
            let action = *action;
            let message = state.confirm_message(action);
            render_confirm(frame, area, "Confirm Delete", &message);
        }
        PopupState::Columns { cursor } => {
            let cursor = *cursor;
            render_columns(frame, area, state, cursor);
        }
        PopupState::Filter { field, cursor } => {
            let (field, cursor) = (*field, *cursor);
            render_filter(frame, area, state, field, cursor);
        }
        PopupState::BulkStatus { cursor } => {
            let cursor = *cursor;
            render_bulk_status(frame, area, state, cursor);
        }
        PopupState::QuitConfirm => render_confirm(
            frame,
            area,
            "Exit gridview",
            "Are you sure you want to quit?",
        ),
    }

    render_toast(frame, area, &state.notifier);
}
