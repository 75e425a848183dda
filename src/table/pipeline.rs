//! Generic table pipeline: search, filter, sort, paginate.

use std::cmp::Ordering;
use std::fmt::Debug;

use super::view_state::{SortDirection, ViewState};

/// Sort key types for table columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SortKey {
    /// Wide enough for every `u64` identifier and `i64` value.
    Integer(i128),
    /// Case-folded text.
    Text(String),
}

impl SortKey {
    /// Builds a case-insensitive text key.
    pub fn text(value: &str) -> Self {
        SortKey::Text(value.to_lowercase())
    }

    /// Total order over keys. Integers sort before text when a column mixes both.
    pub fn compare(&self, other: &Self) -> Ordering {
        match (self, other) {
            (SortKey::Integer(a), SortKey::Integer(b)) => a.cmp(b),
            (SortKey::Text(a), SortKey::Text(b)) => a.cmp(b),
            (SortKey::Integer(_), SortKey::Text(_)) => Ordering::Less,
            (SortKey::Text(_), SortKey::Integer(_)) => Ordering::Greater,
        }
    }
}

/// Trait for table row items.
pub trait TableRow: Clone {
    /// Column identifier.
    type Field: Copy + Ord + Debug + 'static;

    /// Unique, stable identifier.
    fn id(&self) -> u64;

    /// All columns in display order.
    fn fields() -> &'static [Self::Field];

    /// Machine name of a column (`"email"`).
    fn field_name(field: Self::Field) -> &'static str;

    /// True for columns holding numbers; they are exported unquoted.
    fn is_numeric(field: Self::Field) -> bool;

    /// Cell value as a string.
    fn cell(&self, field: Self::Field) -> String;

    /// Sort key for the specified column.
    fn sort_key(&self, field: Self::Field) -> SortKey;

    /// Check if the row matches an already lower-cased search term.
    fn matches_search(&self, needle: &str) -> bool {
        Self::fields()
            .iter()
            .any(|&field| self.cell(field).to_lowercase().contains(needle))
    }
}

/// One computed page of a table.
#[derive(Debug, Clone)]
pub struct TableView<'a, T> {
    /// Rows on the current page, in display order.
    pub rows: Vec<&'a T>,
    /// Rows matching search and filters (all pages).
    pub total_matched: usize,
    /// Number of pages, 0 when nothing matched.
    pub page_count: usize,
    /// Effective page after clamping.
    pub page: usize,
    /// 1-based position of the first shown row, 0 when empty.
    pub start: usize,
    /// 1-based position of the last shown row, 0 when empty.
    pub end: usize,
}

impl<T> TableView<'_, T> {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Number of pages needed for `total` rows.
pub fn page_count(total: usize, page_size: usize) -> usize {
    total.div_ceil(page_size.max(1))
}

/// Clamps a 1-based page number to the valid range for `page_count` pages.
pub fn clamp_page(page: usize, page_count: usize) -> usize {
    page.clamp(1, page_count.max(1))
}

/// Returns rows matching the search term and filters, sorted.
///
/// Sorting is stable in both directions: rows with equal keys keep their
/// collection order.
pub fn matching_rows<'a, T: TableRow>(items: &'a [T], view: &ViewState<T::Field>) -> Vec<&'a T> {
    let needle = view.search.to_lowercase();

    let mut keyed: Vec<(SortKey, &T)> = items
        .iter()
        .filter(|item| needle.is_empty() || item.matches_search(&needle))
        .filter(|item| {
            view.filters.iter().all(|(&field, accepted)| {
                accepted.is_empty() || accepted.contains(&item.cell(field))
            })
        })
        .map(|item| (item.sort_key(view.sort_field), item))
        .collect();

    let descending = view.sort_direction == SortDirection::Descending;
    keyed.sort_by(|(a, _), (b, _)| {
        let cmp = a.compare(b);
        if descending { cmp.reverse() } else { cmp }
    });

    keyed.into_iter().map(|(_, item)| item).collect()
}

/// Computes the visible page for the given collection and view state.
pub fn compute_view<'a, T: TableRow>(items: &'a [T], view: &ViewState<T::Field>) -> TableView<'a, T> {
    let matched = matching_rows(items, view);
    let total_matched = matched.len();
    let page_size = view.page_size.max(1);
    let page_count = page_count(total_matched, page_size);
    let page = clamp_page(view.page, page_count);

    let start_idx = ((page - 1) * page_size).min(total_matched);
    let end_idx = (start_idx + page_size).min(total_matched);
    let rows = matched[start_idx..end_idx].to_vec();

    let (start, end) = if rows.is_empty() {
        (0, 0)
    } else {
        (start_idx + 1, end_idx)
    };

    TableView {
        rows,
        total_matched,
        page_count,
        page,
        start,
        end,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[derive(Debug, Clone, PartialEq)]
    struct Row {
        id: u64,
        name: &'static str,
        group: &'static str,
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
    enum Col {
        Id,
        Name,
        Group,
    }

    impl TableRow for Row {
        type Field = Col;

        fn id(&self) -> u64 {
            self.id
        }

        fn fields() -> &'static [Col] {
            &[Col::Id, Col::Name, Col::Group]
        }

        fn field_name(field: Col) -> &'static str {
            match field {
                Col::Id => "id",
                Col::Name => "name",
                Col::Group => "group",
            }
        }

        fn is_numeric(field: Col) -> bool {
            field == Col::Id
        }

        fn cell(&self, field: Col) -> String {
            match field {
                Col::Id => self.id.to_string(),
                Col::Name => self.name.to_string(),
                Col::Group => self.group.to_string(),
            }
        }

        fn sort_key(&self, field: Col) -> SortKey {
            match field {
                Col::Id => SortKey::Integer(i128::from(self.id)),
                Col::Name => SortKey::text(self.name),
                Col::Group => SortKey::text(self.group),
            }
        }
    }

    fn rows() -> Vec<Row> {
        vec![
            Row { id: 1, name: "delta", group: "b" },
            Row { id: 2, name: "Alpha", group: "a" },
            Row { id: 3, name: "charlie", group: "b" },
            Row { id: 4, name: "bravo", group: "a" },
            Row { id: 5, name: "echo", group: "b" },
        ]
    }

    fn ids<T: TableRow>(rows: &[&T]) -> Vec<u64> {
        rows.iter().map(|r| r.id()).collect()
    }

    #[test]
    fn test_empty_search_keeps_everything() {
        let items = rows();
        let view = ViewState::new(Col::Id, 10);
        assert_eq!(ids(&matching_rows(&items, &view)), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let items = rows();
        let mut view = ViewState::new(Col::Id, 10);
        view.search = "ALPHA".to_string();
        assert_eq!(ids(&matching_rows(&items, &view)), vec![2]);
    }

    #[test]
    fn test_search_keeps_surrounding_whitespace() {
        let items = rows();
        let mut view = ViewState::new(Col::Id, 10);
        view.search = "alpha ".to_string();
        assert!(matching_rows(&items, &view).is_empty());
        view.search = " ".to_string();
        assert!(matching_rows(&items, &view).is_empty());
        view.search = "lpha".to_string();
        assert_eq!(ids(&matching_rows(&items, &view)), vec![2]);
    }

    #[test]
    fn test_integer_keys_cover_full_id_range() {
        let items = vec![
            Row { id: u64::MAX, name: "max", group: "a" },
            Row { id: 1 << 63, name: "mid", group: "a" },
            Row { id: 7, name: "low", group: "a" },
        ];
        let view = ViewState::new(Col::Id, 10);
        assert_eq!(ids(&matching_rows(&items, &view)), vec![7, 1 << 63, u64::MAX]);
    }

    #[test]
    fn test_search_and_filter_combine() {
        let items = rows();
        let mut view = ViewState::new(Col::Id, 10);
        view.search = "e".to_string();
        view.filters.insert(Col::Group, BTreeSet::from(["b".to_string()]));
        // delta, charlie, echo contain "e" and are in group b
        assert_eq!(ids(&matching_rows(&items, &view)), vec![1, 3, 5]);
    }

    #[test]
    fn test_text_sort_ignores_case() {
        let items = rows();
        let mut view = ViewState::new(Col::Name, 10);
        assert_eq!(ids(&matching_rows(&items, &view)), vec![2, 4, 3, 1, 5]);
        view.sort_direction = SortDirection::Descending;
        assert_eq!(ids(&matching_rows(&items, &view)), vec![5, 1, 3, 4, 2]);
    }

    #[test]
    fn test_sort_is_stable_in_both_directions() {
        let items = rows();
        let mut view = ViewState::new(Col::Group, 10);
        assert_eq!(ids(&matching_rows(&items, &view)), vec![2, 4, 1, 3, 5]);
        view.sort_direction = SortDirection::Descending;
        assert_eq!(ids(&matching_rows(&items, &view)), vec![1, 3, 5, 2, 4]);
    }

    #[test]
    fn test_pages_cover_all_rows_without_overlap() {
        let items = rows();
        for size in 1..=6 {
            let mut view = ViewState::new(Col::Id, size);
            let pages = compute_view(&items, &view).page_count;
            let mut seen = Vec::new();
            for page in 1..=pages {
                view.page = page;
                seen.extend(ids(&compute_view(&items, &view).rows));
            }
            assert_eq!(seen, vec![1, 2, 3, 4, 5], "page size {}", size);
        }
    }

    #[test]
    fn test_compute_view_metadata() {
        let items = rows();
        let mut view = ViewState::new(Col::Id, 2);
        view.page = 3;
        let out = compute_view(&items, &view);
        assert_eq!(out.page_count, 3);
        assert_eq!(out.total_matched, 5);
        assert_eq!((out.start, out.end), (5, 5));
        assert_eq!(ids(&out.rows), vec![5]);
    }

    #[test]
    fn test_compute_view_clamps_page() {
        let items = rows();
        let mut view = ViewState::new(Col::Id, 2);
        view.page = 99;
        assert_eq!(compute_view(&items, &view).page, 3);

        view.search = "nothing matches".to_string();
        let out = compute_view(&items, &view);
        assert_eq!(out.page_count, 0);
        assert_eq!(out.page, 1);
        assert!(out.is_empty());
        assert_eq!((out.start, out.end), (0, 0));
    }

    #[test]
    fn test_compute_view_is_idempotent() {
        let items = rows();
        let mut view = ViewState::new(Col::Name, 2);
        view.search = "a".to_string();
        let first = ids(&compute_view(&items, &view).rows);
        let second = ids(&compute_view(&items, &view).rows);
        assert_eq!(first, second);
    }

    #[test]
    fn test_page_count() {
        assert_eq!(page_count(0, 10), 0);
        assert_eq!(page_count(10, 10), 1);
        assert_eq!(page_count(11, 10), 2);
        assert_eq!(page_count(3, 0), 3);
    }
}
