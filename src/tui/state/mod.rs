//! TUI application state.

mod app_state;
mod form;

pub use app_state::AppState;
pub use form::{FormField, FormMode, FormState};

use crate::models::CustomerField;

/// Top-level tabs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Customers,
    Debug,
}

impl Tab {
    pub fn all() -> &'static [Tab] {
        &[Tab::Customers, Tab::Debug]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Tab::Customers => "Customers",
            Tab::Debug => "Debug",
        }
    }

    pub fn next(&self) -> Tab {
        match self {
            Tab::Customers => Tab::Debug,
            Tab::Debug => Tab::Customers,
        }
    }
}

/// Keyboard input mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Normal,
    /// Typing into the search box; applied on every keystroke.
    Search,
}

/// Destructive action awaiting confirmation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmAction {
    Delete(u64),
    BulkDelete,
}

/// Active popup. Only one popup can be open at a time.
#[derive(Debug, Clone, Default)]
pub enum PopupState {
    #[default]
    None,
    Help {
        scroll: usize,
    },
    Detail {
        id: u64,
    },
    Form(FormState),
    Confirm(ConfirmAction),
    /// Column visibility checklist.
    Columns {
        cursor: usize,
    },
    /// Value checklist for one filterable column.
    Filter {
        field: CustomerField,
        cursor: usize,
    },
    /// Status picker for the selected rows.
    BulkStatus {
        cursor: usize,
    },
    QuitConfirm,
}

/// Columns offering a value filter.
pub const FILTER_FIELDS: [CustomerField; 2] = [CustomerField::Status, CustomerField::Country];
