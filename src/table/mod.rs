//! Generic table state: search, filters, sorting, pagination, selection.
//!
//! [`pipeline::compute_view`] is a pure function from a collection and a
//! [`ViewState`] to the visible page. [`TableController`] owns both and
//! exposes the mutators the UI calls.

mod controller;
mod export;
mod pagination;
mod pipeline;
mod validation;
mod view_state;

pub use controller::{EditableRow, SelectionState, TableController, TableError};
pub use export::{DEFAULT_EXPORT_FILE, ExportError, escape_field, to_csv};
pub use pagination::{WINDOW_SIZE, page_window};
pub use pipeline::{
    SortKey, TableRow, TableView, clamp_page, compute_view, matching_rows, page_count,
};
pub use validation::{
    FieldError, FieldErrorKind, ValidationErrors, capitalize, is_valid_email,
};
pub use view_state::{SortDirection, ViewState};
