//! Main application state.

use std::collections::BTreeSet;
use std::path::PathBuf;
use std::time::Instant;

use tracing::warn;

use crate::alert::AlertStack;
use crate::config::Settings;
use crate::debug::DebugViewer;
use crate::models::{Customer, CustomerField, Status};
use crate::notify::{NoticeLevel, Notifier};
use crate::table::{ExportError, SelectionState, TableController, TableError, TableRow};

use super::{ConfirmAction, FormMode, FormState, InputMode, PopupState, Tab};

/// Main application state.
#[derive(Debug)]
pub struct AppState {
    /// Current active tab.
    pub current_tab: Tab,
    /// Input mode.
    pub input_mode: InputMode,
    /// Search input buffer.
    pub search_input: String,
    /// Customer table.
    pub table: TableController<Customer>,
    /// Highlighted row, as an index into the current page.
    pub cursor: usize,
    /// Active popup state.
    pub popup: PopupState,
    /// Toast shown over the table.
    pub notifier: Notifier,
    pub alerts: AlertStack,
    pub debug: DebugViewer,
    pub settings: Settings,
    /// Destination of the CSV export key.
    pub export_path: PathBuf,
}

impl AppState {
    pub fn new(
        table: TableController<Customer>,
        debug: DebugViewer,
        alerts: AlertStack,
        settings: Settings,
        export_path: PathBuf,
    ) -> Self {
        Self {
            current_tab: Tab::Customers,
            input_mode: InputMode::Normal,
            search_input: String::new(),
            table,
            cursor: 0,
            popup: PopupState::None,
            notifier: Notifier::new(),
            alerts,
            debug,
            settings,
            export_path,
        }
    }

    pub fn any_popup_open(&self) -> bool {
        !matches!(self.popup, PopupState::None)
    }

    /// Advances timers: toast expiry and alert fades.
    pub fn tick(&mut self, now: Instant) {
        self.notifier.expire(now);
        self.alerts.tick(now);
    }

    fn toast(&mut self, message: impl Into<String>, level: NoticeLevel) {
        self.notifier
            .show_at(message, level, self.settings.toast_ttl, Instant::now());
    }

    // ===== Cursor =====

    fn page_len(&self) -> usize {
        self.table.view().rows.len()
    }

    /// Keeps the cursor on the current page after the page changed size.
    pub fn clamp_cursor(&mut self) {
        self.cursor = self.cursor.min(self.page_len().saturating_sub(1));
    }

    pub fn cursor_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn cursor_down(&mut self) {
        if self.cursor + 1 < self.page_len() {
            self.cursor += 1;
        }
    }

    /// Identifier of the highlighted row.
    pub fn cursor_id(&self) -> Option<u64> {
        self.table.view().rows.get(self.cursor).map(|r| r.id())
    }

    pub fn goto_page(&mut self, page: usize) {
        self.table.goto_page(page);
        self.cursor = 0;
    }

    pub fn next_page(&mut self) {
        self.table.next_page();
        self.clamp_cursor();
    }

    pub fn prev_page(&mut self) {
        self.table.prev_page();
        self.clamp_cursor();
    }

    // ===== View parameters =====

    pub fn apply_search(&mut self) {
        self.table.set_search_term(self.search_input.clone());
        self.cursor = 0;
    }

    /// Sorts by the next visible column after the current one.
    pub fn next_sort_column(&mut self) {
        let fields = self.table.visible_fields();
        if fields.is_empty() {
            return;
        }
        let current = self.table.view_state().sort_field;
        let next = match fields.iter().position(|&f| f == current) {
            Some(i) => fields[(i + 1) % fields.len()],
            None => fields[0],
        };
        self.table.set_sort(next);
        self.cursor = 0;
    }

    /// Flips the direction of the active sort.
    pub fn toggle_sort_direction(&mut self) {
        let current = self.table.view_state().sort_field;
        self.table.set_sort(current);
        self.cursor = 0;
    }

    pub fn cycle_page_size(&mut self, forward: bool) {
        let current = self.table.view_state().page_size;
        let size = if forward {
            self.settings.next_page_size(current)
        } else {
            self.settings.prev_page_size(current)
        };
        if let Err(e) = self.table.set_page_size(size) {
            warn!(error = %e, "page size rejected");
            return;
        }
        self.cursor = 0;
    }

    /// Distinct values of `field` across the whole collection, for the filter checklist.
    pub fn filter_values(&self, field: CustomerField) -> Vec<String> {
        self.table
            .items()
            .iter()
            .map(|c| c.cell(field))
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    pub fn is_filter_value_checked(&self, field: CustomerField, value: &str) -> bool {
        self.table
            .view_state()
            .filters
            .get(&field)
            .is_some_and(|set| set.contains(value))
    }

    /// Adds or removes `value` from the accepted set of `field`.
    pub fn toggle_filter_value(&mut self, field: CustomerField, value: &str) {
        let mut accepted = self
            .table
            .view_state()
            .filters
            .get(&field)
            .cloned()
            .unwrap_or_default();
        if !accepted.remove(value) {
            accepted.insert(value.to_string());
        }
        self.table.set_filter(field, accepted);
        self.cursor = 0;
    }

    // ===== Selection =====

    pub fn toggle_cursor_selection(&mut self) {
        if let Some(id) = self.cursor_id() {
            self.table.toggle_selected(id);
        }
    }

    /// Header checkbox: checks the whole page unless it is already fully checked.
    pub fn toggle_select_page(&mut self) {
        if self.table.selection_state() == SelectionState::All {
            self.table.deselect_all_visible();
        } else {
            self.table.select_all_visible();
        }
    }

    // ===== Records =====

    pub fn open_add_form(&mut self) {
        self.popup = PopupState::Form(FormState::add());
    }

    pub fn open_edit_form(&mut self) {
        if let Some(customer) = self.cursor_id().and_then(|id| self.table.get(id)) {
            self.popup = PopupState::Form(FormState::edit(customer));
        }
    }

    pub fn open_detail(&mut self) {
        if let Some(id) = self.cursor_id() {
            self.popup = PopupState::Detail { id };
        }
    }

    pub fn request_delete(&mut self) {
        if let Some(id) = self.cursor_id() {
            self.popup = PopupState::Confirm(ConfirmAction::Delete(id));
        }
    }

    pub fn request_bulk_delete(&mut self) {
        if !self.table.selected().is_empty() {
            self.popup = PopupState::Confirm(ConfirmAction::BulkDelete);
        }
    }

    pub fn request_bulk_status(&mut self) {
        if !self.table.selected().is_empty() {
            self.popup = PopupState::BulkStatus { cursor: 0 };
        }
    }

    /// Text of the confirmation dialog.
    pub fn confirm_message(&self, action: ConfirmAction) -> String {
        match action {
            ConfirmAction::Delete(id) => match self.table.get(id) {
                Some(c) => format!("Are you sure you want to delete \"{}\"?", c.name),
                None => "Are you sure you want to delete this item?".to_string(),
            },
            ConfirmAction::BulkDelete => format!(
                "Are you sure you want to delete {} selected items?",
                self.table.selected().len()
            ),
        }
    }

    /// Validates and commits the open form.
    ///
    /// On validation failure the form stays open with its field errors set.
    /// Returns true when the form was committed and closed.
    pub fn submit_form(&mut self) -> bool {
        let PopupState::Form(form) = &mut self.popup else {
            return false;
        };

        let result = match form.mode {
            FormMode::Add => self.table.add_record(form.to_draft()).map(|_| true),
            FormMode::Edit(id) => self
                .table
                .update_record(id, form.to_patch())
                .map(|updated| updated.is_some()),
        };

        match result {
            Ok(found) => {
                let message = match (form.mode, found) {
                    (FormMode::Add, _) => Some("Customer added successfully"),
                    (FormMode::Edit(_), true) => Some("Customer updated successfully"),
                    (FormMode::Edit(_), false) => None,
                };
                self.popup = PopupState::None;
                self.clamp_cursor();
                if let Some(message) = message {
                    self.toast(message, NoticeLevel::Success);
                }
                true
            }
            Err(TableError::Validation(errors)) => {
                form.errors = errors;
                false
            }
            Err(e) => {
                warn!(error = %e, "form submit failed");
                self.toast(format!("Save failed: {}", e), NoticeLevel::Error);
                false
            }
        }
    }

    /// Runs the pending confirmed action and closes the dialog.
    pub fn confirm(&mut self) {
        let PopupState::Confirm(action) = self.popup else {
            return;
        };
        self.popup = PopupState::None;
        match action {
            ConfirmAction::Delete(id) => {
                if self.table.delete_record(id) {
                    self.toast("Item deleted successfully", NoticeLevel::Success);
                }
            }
            ConfirmAction::BulkDelete => {
                let deleted = self.table.bulk_delete_selected();
                self.toast(
                    format!("{} items deleted successfully", deleted),
                    NoticeLevel::Success,
                );
            }
        }
        self.clamp_cursor();
    }

    pub fn apply_bulk_status(&mut self, status: Status) {
        self.popup = PopupState::None;
        let updated = self.table.bulk_set_status(status);
        self.toast(
            format!("Status updated for {} items", updated),
            NoticeLevel::Success,
        );
    }

    /// Writes the filtered rows to the export path.
    pub fn export(&mut self) {
        match self.table.write_csv(&self.export_path) {
            Ok(_) => self.toast("Export successful!", NoticeLevel::Success),
            Err(ExportError::Empty) => self.toast("No data to export", NoticeLevel::Warning),
            Err(e) => self.toast(format!("Export failed: {}", e), NoticeLevel::Error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::debug::ConcernReport;
    use crate::models::sample_customers;
    use crate::tui::state::FormField;

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
    fn test_cursor_stays_on_page() {
        let mut s = state();
        for _ in 0..20 {
            s.cursor_down();
        }
        assert_eq!(s.cursor, 9);
        s.next_page();
        assert_eq!(s.cursor_id(), Some(20));

        s.search_input = "germany".into();
        s.apply_search();
        assert_eq!(s.cursor, 0);
        s.cursor = 99;
        s.clamp_cursor();
        assert_eq!(s.cursor, 2);
    }

    #[test]
    fn test_add_form_validation_keeps_form_open() {
        let mut s = state();
        s.open_add_form();
        if let PopupState::Form(form) = &mut s.popup {
            form.email = "bad".into();
        }
        assert!(!s.submit_form());
        let PopupState::Form(form) = &s.popup else {
            panic!("form closed on invalid input");
        };
        assert_eq!(form.error(FormField::Name).as_deref(), Some("Name is required"));
        assert_eq!(
            form.error(FormField::Email).as_deref(),
            Some("Please enter a valid email address")
        );
        assert_eq!(s.table.items().len(), 20);
    }

    #[test]
    fn test_add_form_commits() {
        let mut s = state();
        s.open_add_form();
        if let PopupState::Form(form) = &mut s.popup {
            form.name = "Grace Hopper".into();
            form.email = "grace@example.com".into();
        }
        assert!(s.submit_form());
        assert!(!s.any_popup_open());
        assert_eq!(s.table.get(21).unwrap().name, "Grace Hopper");
        assert_eq!(
            s.notifier.current().unwrap().message,
            "Customer added successfully"
        );
    }

    #[test]
    fn test_add_form_reports_exhausted_ids() {
        let mut seed = sample_customers();
        seed[19].id = u64::MAX;
        let mut s = state();
        s.table = TableController::new(seed, CustomerField::Id, 10);
        s.open_add_form();
        if let PopupState::Form(form) = &mut s.popup {
            form.name = "Grace Hopper".into();
            form.email = "grace@example.com".into();
        }
        assert!(!s.submit_form());
        assert!(s.any_popup_open());
        assert_eq!(s.table.items().len(), 20);
        assert_eq!(s.notifier.current().unwrap().level, NoticeLevel::Error);
    }

    #[test]
    fn test_edit_form_updates_cursor_row() {
        let mut s = state();
        s.cursor = 4;
        s.open_edit_form();
        if let PopupState::Form(form) = &mut s.popup {
            form.status = Status::Inactive;
        }
        assert!(s.submit_form());
        let c = s.table.get(5).unwrap();
        assert_eq!(c.status, Status::Inactive);
        assert_eq!(c.name, sample_customers()[4].name);
    }

    #[test]
    fn test_bulk_delete_reports_count() {
        let mut s = state();
        s.toggle_select_page();
        s.request_bulk_delete();
        assert_eq!(
            s.confirm_message(ConfirmAction::BulkDelete),
            "Are you sure you want to delete 10 selected items?"
        );
        s.confirm();
        assert_eq!(s.table.items().len(), 10);
        assert_eq!(
            s.notifier.current().unwrap().message,
            "10 items deleted successfully"
        );
        assert!(s.table.selected().is_empty());
    }

    #[test]
    fn test_bulk_request_needs_selection() {
        let mut s = state();
        s.request_bulk_delete();
        s.request_bulk_status();
        assert!(!s.any_popup_open());
    }

    #[test]
    fn test_filter_checklist() {
        let mut s = state();
        assert_eq!(
            s.filter_values(CustomerField::Status),
            vec!["active", "inactive", "pending"]
        );
        s.toggle_filter_value(CustomerField::Status, "pending");
        assert!(s.is_filter_value_checked(CustomerField::Status, "pending"));
        assert!(
            s.table
                .matching()
                .iter()
                .all(|c| c.status == Status::Pending)
        );
        s.toggle_filter_value(CustomerField::Status, "pending");
        assert!(!s.table.view_state().has_active_filters());
        assert_eq!(s.table.total_matched(), 20);
    }

    #[test]
    fn test_export_empty_and_written() {
        let dir = tempfile::tempdir().unwrap();
        let mut s = state();
        s.export_path = dir.path().join("out.csv");

        s.search_input = "zzz-no-match".into();
        s.apply_search();
        s.export();
        assert_eq!(s.notifier.current().unwrap().message, "No data to export");
        assert!(!s.export_path.exists());

        s.search_input.clear();
        s.apply_search();
        s.export();
        assert_eq!(s.notifier.current().unwrap().message, "Export successful!");
        let csv = std::fs::read_to_string(&s.export_path).unwrap();
        assert_eq!(csv.lines().count(), 21);
    }

    #[test]
    fn test_sort_column_cycles_visible_fields() {
        let mut s = state();
        s.table.toggle_column(CustomerField::Name);
        s.next_sort_column();
        assert_eq!(s.table.view_state().sort_field, CustomerField::Email);
        s.toggle_sort_direction();
        assert_eq!(
            s.table.view_state().sort_direction,
            crate::table::SortDirection::Descending
        );
    }
}
