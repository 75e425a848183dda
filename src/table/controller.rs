//! Table controller: owns the collection and its view state.
//!
//! Every mutator leaves the controller consistent: the page is clamped to
//! the current result, and the selection only references existing records.

use std::collections::BTreeSet;
use std::fmt::Debug;

use tracing::{debug, info};

use super::pipeline::{TableRow, TableView, clamp_page, compute_view, matching_rows, page_count};
use super::validation::ValidationErrors;
use super::view_state::{SortDirection, ViewState};

/// Rows that can be created, edited and bulk-updated through the controller.
pub trait EditableRow: TableRow {
    /// Input for a new row (no identifier yet).
    type Draft;
    /// Partial update merged into an existing row.
    type Patch;
    /// Value applied by bulk status changes.
    type Status: Clone + Debug;

    fn from_draft(id: u64, draft: Self::Draft) -> Self;
    fn apply_patch(&mut self, patch: Self::Patch);
    fn set_status(&mut self, status: Self::Status);
    fn validate(&self) -> Result<(), ValidationErrors>;
}

/// Errors returned by controller mutators.
#[derive(Debug, Clone, PartialEq)]
pub enum TableError {
    /// Record failed validation; nothing was changed.
    Validation(ValidationErrors),
    /// Page size must be at least 1.
    InvalidPageSize(usize),
    /// The largest identifier is taken; no new record can be numbered.
    IdExhausted,
}

impl std::fmt::Display for TableError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TableError::Validation(errors) => write!(f, "{}", errors),
            TableError::InvalidPageSize(n) => write!(f, "invalid page size: {}", n),
            TableError::IdExhausted => write!(f, "no identifiers left for a new record"),
        }
    }
}

impl std::error::Error for TableError {}

impl From<ValidationErrors> for TableError {
    fn from(errors: ValidationErrors) -> Self {
        TableError::Validation(errors)
    }
}

/// State of the "select all" checkbox for the visible page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionState {
    None,
    Partial,
    All,
}

/// Owns a record collection and the view state used to display it.
#[derive(Debug, Clone)]
pub struct TableController<T: EditableRow> {
    items: Vec<T>,
    view: ViewState<T::Field>,
    total_matched: usize,
    page_count: usize,
}

impl<T: EditableRow> TableController<T> {
    /// Creates a controller seeded with `items`.
    pub fn new(items: Vec<T>, sort_field: T::Field, page_size: usize) -> Self {
        let mut controller = Self {
            items,
            view: ViewState::new(sort_field, page_size),
            total_matched: 0,
            page_count: 0,
        };
        controller.refresh();
        controller
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn view_state(&self) -> &ViewState<T::Field> {
        &self.view
    }

    pub fn get(&self, id: u64) -> Option<&T> {
        self.items.iter().find(|item| item.id() == id)
    }

    pub fn total_matched(&self) -> usize {
        self.total_matched
    }

    pub fn page_count(&self) -> usize {
        self.page_count
    }

    pub fn page(&self) -> usize {
        self.view.page
    }

    /// Computes the current page.
    pub fn view(&self) -> TableView<'_, T> {
        compute_view(&self.items, &self.view)
    }

    /// All rows matching the current search and filters, sorted (every page).
    pub fn matching(&self) -> Vec<&T> {
        matching_rows(&self.items, &self.view)
    }

    /// Visible columns in display order.
    pub fn visible_fields(&self) -> Vec<T::Field> {
        T::fields()
            .iter()
            .copied()
            .filter(|f| self.view.is_visible(f))
            .collect()
    }

    /// Recomputes pagination metadata and clamps the page.
    fn refresh(&mut self) {
        let total = matching_rows(&self.items, &self.view).len();
        self.total_matched = total;
        self.page_count = page_count(total, self.view.page_size);
        self.view.page = clamp_page(self.view.page, self.page_count);
        debug!(
            total,
            pages = self.page_count,
            page = self.view.page,
            "table view recomputed"
        );
    }

    fn reset_page(&mut self) {
        self.view.page = 1;
        self.refresh();
    }

    // ===== View parameters =====

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.view.search = term.into();
        self.reset_page();
    }

    /// Restricts `field` to `values`. An empty set removes the constraint.
    pub fn set_filter<I, S>(&mut self, field: T::Field, values: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let values: BTreeSet<String> = values.into_iter().map(Into::into).collect();
        if values.is_empty() {
            self.view.filters.remove(&field);
        } else {
            self.view.filters.insert(field, values);
        }
        self.reset_page();
    }

    pub fn clear_filter(&mut self, field: T::Field) {
        self.view.filters.remove(&field);
        self.reset_page();
    }

    /// Sorts by `field`; sorting by the active field again flips the direction.
    pub fn set_sort(&mut self, field: T::Field) {
        if self.view.sort_field == field {
            self.view.sort_direction = self.view.sort_direction.flipped();
        } else {
            self.view.sort_field = field;
            self.view.sort_direction = SortDirection::Ascending;
        }
        self.reset_page();
    }

    pub fn set_page_size(&mut self, page_size: usize) -> Result<(), TableError> {
        if page_size == 0 {
            return Err(TableError::InvalidPageSize(page_size));
        }
        self.view.page_size = page_size;
        self.reset_page();
        Ok(())
    }

    /// Moves to page `page`, clamped to the valid range. No-op without pages.
    pub fn goto_page(&mut self, page: usize) {
        if self.page_count == 0 {
            return;
        }
        self.view.page = clamp_page(page, self.page_count);
    }

    pub fn next_page(&mut self) {
        self.goto_page(self.view.page.saturating_add(1));
    }

    pub fn prev_page(&mut self) {
        self.goto_page(self.view.page.saturating_sub(1));
    }

    /// Shows or hides a column.
    pub fn toggle_column(&mut self, field: T::Field) {
        if !self.view.hidden.remove(&field) {
            self.view.hidden.insert(field);
        }
    }

    // ===== Collection =====

    /// Validates and appends a new record. Returns the assigned identifier.
    pub fn add_record(&mut self, draft: T::Draft) -> Result<u64, TableError> {
        let id = self.next_id().ok_or(TableError::IdExhausted)?;
        let record = T::from_draft(id, draft);
        record.validate()?;
        self.items.push(record);
        self.refresh();
        info!(id, "record added");
        Ok(id)
    }

    /// Merges `patch` into record `id`.
    ///
    /// Returns `Ok(None)` without touching anything if the record does not
    /// exist. The merged record is validated before it replaces the original.
    pub fn update_record(&mut self, id: u64, patch: T::Patch) -> Result<Option<&T>, TableError> {
        let Some(idx) = self.items.iter().position(|item| item.id() == id) else {
            debug!(id, "update ignored: no such record");
            return Ok(None);
        };
        let mut merged = self.items[idx].clone();
        merged.apply_patch(patch);
        merged.validate()?;
        self.items[idx] = merged;
        self.refresh();
        info!(id, "record updated");
        Ok(Some(&self.items[idx]))
    }

    /// Removes record `id` and drops it from the selection. Returns false if absent.
    pub fn delete_record(&mut self, id: u64) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.id() != id);
        let removed = self.items.len() != before;
        if removed {
            self.view.selected.remove(&id);
            self.refresh();
            info!(id, "record deleted");
        } else {
            debug!(id, "delete ignored: no such record");
        }
        removed
    }

    /// Deletes every selected record and clears the selection.
    /// Returns the number of records deleted.
    pub fn bulk_delete_selected(&mut self) -> usize {
        let selected = std::mem::take(&mut self.view.selected);
        let before = self.items.len();
        self.items.retain(|item| !selected.contains(&item.id()));
        let deleted = before - self.items.len();
        self.refresh();
        info!(deleted, "bulk delete");
        deleted
    }

    /// Sets `status` on every selected record and clears the selection.
    /// Returns the number of records updated.
    pub fn bulk_set_status(&mut self, status: T::Status) -> usize {
        let selected = std::mem::take(&mut self.view.selected);
        let mut updated = 0;
        for item in self.items.iter_mut().filter(|i| selected.contains(&i.id())) {
            item.set_status(status.clone());
            updated += 1;
        }
        self.refresh();
        info!(updated, ?status, "bulk status change");
        updated
    }

    /// `max(ids) + 1`, or `None` when the largest id is `u64::MAX`.
    fn next_id(&self) -> Option<u64> {
        self.items
            .iter()
            .map(|item| item.id())
            .max()
            .unwrap_or(0)
            .checked_add(1)
    }

    // ===== Selection =====

    pub fn selected(&self) -> &BTreeSet<u64> {
        &self.view.selected
    }

    pub fn is_selected(&self, id: u64) -> bool {
        self.view.selected.contains(&id)
    }

    /// Selects `id` if it references an existing record.
    pub fn select(&mut self, id: u64) {
        if self.get(id).is_some() {
            self.view.selected.insert(id);
        }
    }

    pub fn deselect(&mut self, id: u64) {
        self.view.selected.remove(&id);
    }

    pub fn toggle_selected(&mut self, id: u64) {
        if self.is_selected(id) {
            self.deselect(id);
        } else {
            self.select(id);
        }
    }

    /// Selects every row on the current page.
    pub fn select_all_visible(&mut self) {
        let ids: Vec<u64> = self.view().rows.iter().map(|r| r.id()).collect();
        self.view.selected.extend(ids);
    }

    /// Deselects every row on the current page.
    pub fn deselect_all_visible(&mut self) {
        let ids: Vec<u64> = self.view().rows.iter().map(|r| r.id()).collect();
        for id in ids {
            self.view.selected.remove(&id);
        }
    }

    pub fn clear_selection(&mut self) {
        self.view.selected.clear();
    }

    /// Tri-state of the "select all" checkbox for the current page.
    pub fn selection_state(&self) -> SelectionState {
        let view = self.view();
        let checked = view.rows.iter().filter(|r| self.is_selected(r.id())).count();
        if !view.rows.is_empty() && checked == view.rows.len() {
            SelectionState::All
        } else if checked > 0 {
            SelectionState::Partial
        } else {
            SelectionState::None
        }
    }
}
