//! Input handling and keybindings.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::models::{CustomerField, Status};

use super::state::{AppState, FILTER_FIELDS, FormField, FormState, InputMode, PopupState, Tab};

/// Result of handling a key event.
///
/// Actions that need resources owned by the app (clipboard, HTTP client)
/// are returned instead of performed here.
#[derive(Debug, PartialEq, Eq)]
pub enum KeyAction {
    /// No action, continue.
    None,
    /// Quit the application.
    Quit,
    /// Copy the markdown concern report.
    CopyMarkdown,
    /// Ask the server to clear its issues.
    ClearIssues,
}

/// Handles key input and updates state.
pub fn handle_key(state: &mut AppState, key: KeyEvent) -> KeyAction {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return KeyAction::Quit;
    }
    if state.any_popup_open() {
        return handle_popup(state, key);
    }
    match state.input_mode {
        InputMode::Search => handle_search_mode(state, key),
        InputMode::Normal => match state.current_tab {
            Tab::Customers => handle_table_keys(state, key),
            Tab::Debug => handle_debug_keys(state, key),
        },
    }
}

/// Keys shared by both tabs. Returns `None` if the key was not handled.
fn handle_global(state: &mut AppState, key: KeyEvent) -> Option<KeyAction> {
    match key.code {
        KeyCode::Char('q') | KeyCode::Char('Q') => {
            state.popup = PopupState::QuitConfirm;
        }
        KeyCode::Tab | KeyCode::BackTab => state.current_tab = state.current_tab.next(),
        KeyCode::Char('1') => state.current_tab = Tab::Customers,
        KeyCode::Char('2') => state.current_tab = Tab::Debug,
        KeyCode::Char('?') | KeyCode::F(1) => state.popup = PopupState::Help { scroll: 0 },
        // Close the first dismissible alert banner
        KeyCode::Char('X') => {
            state.alerts.dismiss_first(std::time::Instant::now());
        }
        _ => return None,
    }
    Some(KeyAction::None)
}

fn handle_table_keys(state: &mut AppState, key: KeyEvent) -> KeyAction {
    if let Some(action) = handle_global(state, key) {
        return action;
    }
    match key.code {
        // Row navigation
        KeyCode::Up | KeyCode::Char('k') => state.cursor_up(),
        KeyCode::Down | KeyCode::Char('j') => state.cursor_down(),

        // Pagination
        KeyCode::Left | KeyCode::Char('h') | KeyCode::PageUp => state.prev_page(),
        KeyCode::Right | KeyCode::Char('l') | KeyCode::PageDown => state.next_page(),
        KeyCode::Home => state.goto_page(1),
        KeyCode::End => {
            let last = state.table.page_count();
            state.goto_page(last);
        }
        KeyCode::Char('+') | KeyCode::Char('=') => state.cycle_page_size(true),
        KeyCode::Char('-') => state.cycle_page_size(false),

        // Search
        KeyCode::Char('/') => {
            state.input_mode = InputMode::Search;
            state.search_input = state.table.view_state().search.clone();
        }

        // Sorting
        KeyCode::Char('s') => state.next_sort_column(),
        KeyCode::Char('r') => state.toggle_sort_direction(),

        // Selection
        KeyCode::Char(' ') => state.toggle_cursor_selection(),
        KeyCode::Char('a') => state.toggle_select_page(),
        KeyCode::Esc => state.table.clear_selection(),

        // Records
        KeyCode::Enter | KeyCode::Char('v') => state.open_detail(),
        KeyCode::Char('n') => state.open_add_form(),
        KeyCode::Char('e') => state.open_edit_form(),
        KeyCode::Char('d') | KeyCode::Delete => state.request_delete(),
        KeyCode::Char('D') => state.request_bulk_delete(),
        KeyCode::Char('S') => state.request_bulk_status(),

        // Columns, filters, export
        KeyCode::Char('c') => state.popup = PopupState::Columns { cursor: 0 },
        KeyCode::Char('f') => {
            state.popup = PopupState::Filter {
                field: FILTER_FIELDS[0],
                cursor: 0,
            }
        }
        KeyCode::Char('x') => state.export(),
        _ => {}
    }
    KeyAction::None
}

fn handle_debug_keys(state: &mut AppState, key: KeyEvent) -> KeyAction {
    if let Some(action) = handle_global(state, key) {
        return action;
    }
    match key.code {
        KeyCode::Char('t') => {
            state.debug.switch_tab("table");
        }
        KeyCode::Char('m') => {
            state.debug.switch_tab("markdown");
        }
        KeyCode::Left | KeyCode::Right | KeyCode::Char('h') | KeyCode::Char('l') => {
            state.debug.toggle_tab()
        }
        KeyCode::Up | KeyCode::Char('k') => {
            state.debug.scroll = state.debug.scroll.saturating_sub(1)
        }
        KeyCode::Down | KeyCode::Char('j') => {
            state.debug.scroll = state.debug.scroll.saturating_add(1)
        }
        KeyCode::Home => state.debug.scroll = 0,
        KeyCode::Char('y') => return KeyAction::CopyMarkdown,
        KeyCode::Char('C') => return KeyAction::ClearIssues,
        _ => {}
    }
    KeyAction::None
}

fn handle_search_mode(state: &mut AppState, key: KeyEvent) -> KeyAction {
    match key.code {
        KeyCode::Esc => {
            // Cancel search
            state.input_mode = InputMode::Normal;
            state.search_input.clear();
            state.apply_search();
        }
        KeyCode::Enter => {
            // Search is already applied in real-time, just switch mode
            state.input_mode = InputMode::Normal;
        }
        KeyCode::Backspace => {
            state.search_input.pop();
            state.apply_search();
        }
        KeyCode::Char(c) => {
            state.search_input.push(c);
            state.apply_search();
        }
        _ => {}
    }
    KeyAction::None
}

fn handle_popup(state: &mut AppState, key: KeyEvent) -> KeyAction {
    if matches!(state.popup, PopupState::Form(_)) {
        handle_form(state, key);
        return KeyAction::None;
    }
    match &mut state.popup {
        PopupState::None | PopupState::Form(_) => {}
        PopupState::QuitConfirm => match key.code {
            KeyCode::Enter | KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Char('y') => {
                state.popup = PopupState::None;
                return KeyAction::Quit;
            }
            KeyCode::Esc | KeyCode::Char('n') | KeyCode::Char('N') => {
                state.popup = PopupState::None;
            }
            _ => {}
        },
        PopupState::Help { scroll } => match key.code {
            KeyCode::Up | KeyCode::Char('k') => *scroll = scroll.saturating_sub(1),
            KeyCode::Down | KeyCode::Char('j') => *scroll = scroll.saturating_add(1),
            KeyCode::Home => *scroll = 0,
            KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q') | KeyCode::Enter => {
                state.popup = PopupState::None
            }
            _ => {}
        },
        PopupState::Detail { id } => match key.code {
            KeyCode::Char('e') => {
                let id = *id;
                if let Some(customer) = state.table.get(id) {
                    state.popup = PopupState::Form(FormState::edit(customer));
                }
            }
            KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') => state.popup = PopupState::None,
            _ => {}
        },
        PopupState::Confirm(_) => match key.code {
            KeyCode::Enter | KeyCode::Char('y') | KeyCode::Char('Y') => state.confirm(),
            KeyCode::Esc | KeyCode::Char('n') | KeyCode::Char('N') => {
                state.popup = PopupState::None
            }
            _ => {}
        },
        PopupState::Columns { cursor } => match key.code {
            KeyCode::Up | KeyCode::Char('k') => *cursor = cursor.saturating_sub(1),
            KeyCode::Down | KeyCode::Char('j') => {
                if *cursor + 1 < CustomerField::ALL.len() {
                    *cursor += 1;
                }
            }
            KeyCode::Char(' ') | KeyCode::Enter => {
                let field = CustomerField::ALL[*cursor];
                state.table.toggle_column(field);
            }
            KeyCode::Esc | KeyCode::Char('c') => state.popup = PopupState::None,
            _ => {}
        },
        PopupState::Filter { field, cursor } => {
            let (field_now, cursor_now) = (*field, *cursor);
            match key.code {
                KeyCode::Left | KeyCode::Right | KeyCode::Tab => {
                    let idx = FILTER_FIELDS
                        .iter()
                        .position(|&f| f == field_now)
                        .unwrap_or(0);
                    *field = FILTER_FIELDS[(idx + 1) % FILTER_FIELDS.len()];
                    *cursor = 0;
                }
                KeyCode::Up | KeyCode::Char('k') => *cursor = cursor_now.saturating_sub(1),
                KeyCode::Down | KeyCode::Char('j') => {
                    if cursor_now + 1 < state.filter_values(field_now).len() {
                        if let PopupState::Filter { cursor, .. } = &mut state.popup {
                            *cursor += 1;
                        }
                    }
                }
                KeyCode::Char(' ') | KeyCode::Enter => {
                    if let Some(value) = state.filter_values(field_now).get(cursor_now) {
                        let value = value.clone();
                        state.toggle_filter_value(field_now, &value);
                    }
                }
                KeyCode::Char('0') | KeyCode::Backspace => {
                    state.table.clear_filter(field_now);
                    state.cursor = 0;
                }
                KeyCode::Esc | KeyCode::Char('f') => state.popup = PopupState::None,
                _ => {}
            }
        }
        PopupState::BulkStatus { cursor } => match key.code {
            KeyCode::Up | KeyCode::Char('k') => *cursor = cursor.saturating_sub(1),
            KeyCode::Down | KeyCode::Char('j') => {
                if *cursor + 1 < Status::all().len() {
                    *cursor += 1;
                }
            }
            KeyCode::Enter => {
                let status = Status::all()[*cursor];
                state.apply_bulk_status(status);
            }
            KeyCode::Esc => state.popup = PopupState::None,
            _ => {}
        },
    }
    KeyAction::None
}

fn handle_form(state: &mut AppState, key: KeyEvent) {
    let PopupState::Form(form) = &mut state.popup else {
        return;
    };
    match key.code {
        KeyCode::Esc => state.popup = PopupState::None,
        KeyCode::Enter => {
            state.submit_form();
        }
        KeyCode::Tab | KeyCode::Down => form.focus = form.focus.next(),
        KeyCode::BackTab | KeyCode::Up => form.focus = form.focus.prev(),
        KeyCode::Left | KeyCode::Right | KeyCode::Char(' ')
            if form.focus == FormField::Status =>
        {
            form.status = form.status.next();
        }
        KeyCode::Backspace => {
            if let Some(text) = form.focused_text() {
                text.pop();
            }
        }
        KeyCode::Char(c) => {
            if let Some(text) = form.focused_text() {
                text.push(c);
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    use crossterm::event::{KeyEventKind, KeyEventState};

    use crate::alert::AlertStack;
    use crate::config::Settings;
    use crate::debug::{ConcernReport, DebugTab, DebugViewer};
    use crate::models::sample_customers;
    use crate::table::TableController;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn typed(state: &mut AppState, text: &str) {
        for c in text.chars() {
            handle_key(state, key(KeyCode::Char(c)));
        }
    }

    fn state() -> AppState {
        AppState::new(
            TableController::new(sample_customers(), CustomerField::Id, 10),
            DebugViewer::new(ConcernReport::default()),
            AlertStack::default(),
            Settings::default(),
            PathBuf::from("unused.csv"),
        )
    }

    #[test]
    fn search_applies_while_typing() {
        let mut s = state();
        handle_key(&mut s, key(KeyCode::Char('/')));
        assert_eq!(s.input_mode, InputMode::Search);
        typed(&mut s, "germany");
        assert_eq!(s.table.total_matched(), 3);

        handle_key(&mut s, key(KeyCode::Enter));
        assert_eq!(s.input_mode, InputMode::Normal);
        assert_eq!(s.table.view_state().search, "germany");

        handle_key(&mut s, key(KeyCode::Char('/')));
        handle_key(&mut s, key(KeyCode::Esc));
        assert_eq!(s.table.total_matched(), 20);
    }

    #[test]
    fn add_form_round_trip() {
        let mut s = state();
        handle_key(&mut s, key(KeyCode::Char('n')));
        typed(&mut s, "Ada Lovelace");
        handle_key(&mut s, key(KeyCode::Tab));
        typed(&mut s, "ada@example.com");
        handle_key(&mut s, key(KeyCode::Tab));
        handle_key(&mut s, key(KeyCode::Char(' ')));
        handle_key(&mut s, key(KeyCode::Enter));

        assert!(!s.any_popup_open());
        let added = s.table.get(21).unwrap();
        assert_eq!(added.name, "Ada Lovelace");
        assert_eq!(added.status, Status::Inactive);
    }

    #[test]
    fn delete_needs_confirmation() {
        let mut s = state();
        handle_key(&mut s, key(KeyCode::Char('d')));
        handle_key(&mut s, key(KeyCode::Esc));
        assert_eq!(s.table.items().len(), 20);

        handle_key(&mut s, key(KeyCode::Char('d')));
        handle_key(&mut s, key(KeyCode::Char('y')));
        assert_eq!(s.table.items().len(), 19);
        assert!(s.table.get(1).is_none());
    }

    #[test]
    fn bulk_status_from_picker() {
        let mut s = state();
        handle_key(&mut s, key(KeyCode::Char(' ')));
        handle_key(&mut s, key(KeyCode::Down));
        handle_key(&mut s, key(KeyCode::Char(' ')));
        handle_key(&mut s, key(KeyCode::Char('S')));
        handle_key(&mut s, key(KeyCode::Down));
        handle_key(&mut s, key(KeyCode::Down));
        handle_key(&mut s, key(KeyCode::Enter));

        assert_eq!(s.table.get(1).unwrap().status, Status::Pending);
        assert_eq!(s.table.get(2).unwrap().status, Status::Pending);
        assert!(s.table.selected().is_empty());
        assert_eq!(
            s.notifier.current().unwrap().message,
            "Status updated for 2 items"
        );
    }

    #[test]
    fn column_toggle_popup() {
        let mut s = state();
        handle_key(&mut s, key(KeyCode::Char('c')));
        handle_key(&mut s, key(KeyCode::Down));
        handle_key(&mut s, key(KeyCode::Char(' ')));
        handle_key(&mut s, key(KeyCode::Esc));
        assert!(!s.table.visible_fields().contains(&CustomerField::Name));
    }

    #[test]
    fn debug_tab_keys() {
        let mut s = state();
        handle_key(&mut s, key(KeyCode::Char('2')));
        assert_eq!(s.current_tab, Tab::Debug);
        handle_key(&mut s, key(KeyCode::Char('m')));
        assert_eq!(s.debug.tab(), DebugTab::Markdown);
        assert_eq!(
            handle_key(&mut s, key(KeyCode::Char('y'))),
            KeyAction::CopyMarkdown
        );
        assert_eq!(
            handle_key(&mut s, key(KeyCode::Char('C'))),
            KeyAction::ClearIssues
        );
    }

    #[test]
    fn quit_asks_first() {
        let mut s = state();
        assert_eq!(handle_key(&mut s, key(KeyCode::Char('q'))), KeyAction::None);
        assert!(matches!(s.popup, PopupState::QuitConfirm));
        assert_eq!(handle_key(&mut s, key(KeyCode::Enter)), KeyAction::Quit);
    }
}
