//! Transient view parameters for a table: search, filters, sort, page, selection.

use std::collections::{BTreeMap, BTreeSet};

/// Sort direction for the active column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    /// Returns the opposite direction.
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    /// Arrow shown next to the sorted column header.
    pub fn arrow(self) -> &'static str {
        match self {
            SortDirection::Ascending => "▲",
            SortDirection::Descending => "▼",
        }
    }
}

/// View state for a table over rows addressed by fields of type `F`.
///
/// Never persisted. All fields are public so that renderers can read them,
/// but mutation goes through [`super::TableController`] which keeps the
/// page and selection invariants.
#[derive(Debug, Clone)]
pub struct ViewState<F: Ord> {
    /// Search term (raw, as typed).
    pub search: String,
    /// Accepted values per field. An empty set imposes no constraint.
    pub filters: BTreeMap<F, BTreeSet<String>>,
    /// Active sort field.
    pub sort_field: F,
    /// Active sort direction.
    pub sort_direction: SortDirection,
    /// Current page, 1-based.
    pub page: usize,
    /// Rows per page, always >= 1.
    pub page_size: usize,
    /// Selected record identifiers.
    pub selected: BTreeSet<u64>,
    /// Columns hidden from rendering and export.
    pub hidden: BTreeSet<F>,
}

impl<F: Ord> ViewState<F> {
    pub fn new(sort_field: F, page_size: usize) -> Self {
        Self {
            search: String::new(),
            filters: BTreeMap::new(),
            sort_field,
            sort_direction: SortDirection::Ascending,
            page: 1,
            page_size: page_size.max(1),
            selected: BTreeSet::new(),
            hidden: BTreeSet::new(),
        }
    }

    /// Returns true if any filter constrains the result.
    pub fn has_active_filters(&self) -> bool {
        self.filters.values().any(|values| !values.is_empty())
    }

    /// Returns true if the column is currently shown.
    pub fn is_visible(&self, field: &F) -> bool {
        !self.hidden.contains(field)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_clamps_page_size() {
        let state: ViewState<u8> = ViewState::new(0, 0);
        assert_eq!(state.page_size, 1);
        assert_eq!(state.page, 1);
        assert_eq!(state.sort_direction, SortDirection::Ascending);
    }

    #[test]
    fn test_empty_filter_set_is_inactive() {
        let mut state: ViewState<u8> = ViewState::new(0, 10);
        assert!(!state.has_active_filters());
        state.filters.insert(1, BTreeSet::new());
        assert!(!state.has_active_filters());
        state.filters.insert(2, BTreeSet::from(["x".to_string()]));
        assert!(state.has_active_filters());
    }

    #[test]
    fn test_direction_flip() {
        assert_eq!(SortDirection::Ascending.flipped(), SortDirection::Descending);
        assert_eq!(SortDirection::Descending.flipped(), SortDirection::Ascending);
    }
}
