//! Customer table and pager view models.

use crate::models::{Customer, CustomerField, Status};
use crate::table::{
    SelectionState, SortDirection, TableController, TableRow, capitalize, page_window,
};
use crate::view::common::{RowStyleClass, TableViewModel, ViewCell, ViewRow, checkbox};

fn width(field: CustomerField) -> u16 {
    match field {
        CustomerField::Id => 4,
        CustomerField::Name => 20,
        CustomerField::Email => 28,
        CustomerField::Status => 9,
        CustomerField::Country => 14,
        CustomerField::Created => 10,
    }
}

/// Badge style of a status cell.
pub fn status_style(status: Status) -> RowStyleClass {
    match status {
        Status::Active => RowStyleClass::Active,
        Status::Inactive => RowStyleClass::Dimmed,
        Status::Pending => RowStyleClass::Warning,
    }
}

fn cell(customer: &Customer, field: CustomerField) -> ViewCell {
    match field {
        CustomerField::Status => ViewCell::styled(
            customer.status.label().to_string(),
            status_style(customer.status),
        ),
        _ => ViewCell::plain(customer.cell(field)),
    }
}

/// Builds the current page of the customer table.
///
/// The first column is the selection checkbox; the remaining columns are the
/// visible fields in declaration order.
pub fn build_customers_view(ctrl: &TableController<Customer>) -> TableViewModel<u64> {
    let state = ctrl.view_state();
    let fields = ctrl.visible_fields();
    let view = ctrl.view();

    let mut headers = vec![checkbox(ctrl.selection_state()).to_string()];
    headers.extend(fields.iter().map(|f| capitalize(f.name())));

    let mut widths = vec![3];
    widths.extend(fields.iter().map(|&f| width(f)));

    let rows = view
        .rows
        .iter()
        .map(|c| {
            let selected = ctrl.is_selected(c.id);
            let marker = if selected {
                SelectionState::All
            } else {
                SelectionState::None
            };
            let mut cells = vec![ViewCell::plain(checkbox(marker).to_string())];
            cells.extend(fields.iter().map(|&f| cell(c, f)));
            ViewRow {
                id: c.id,
                cells,
                style: if selected {
                    RowStyleClass::Accent
                } else {
                    RowStyleClass::Normal
                },
            }
        })
        .collect();

    let sort_column = fields
        .iter()
        .position(|&f| f == state.sort_field)
        .map(|i| i + 1);

    let mut title = format!(" Customers [{} rows]", view.total_matched);
    if !state.search.is_empty() {
        title.push_str(&format!(" (search: {})", state.search));
    }
    if state.has_active_filters() {
        let active: Vec<String> = state
            .filters
            .iter()
            .filter(|(_, v)| !v.is_empty())
            .map(|(f, v)| format!("{}={}", f.name(), v.iter().cloned().collect::<Vec<_>>().join("|")))
            .collect();
        title.push_str(&format!(" (filter: {})", active.join(", ")));
    }
    title.push(' ');

    TableViewModel {
        title,
        headers,
        widths,
        rows,
        sort_column,
        sort_ascending: state.sort_direction == SortDirection::Ascending,
        empty_message: "No data found",
    }
}

/// Footer data: "showing" summary and page buttons.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PagerViewModel {
    pub summary: String,
    /// Page buttons around the current page.
    pub pages: Vec<usize>,
    pub current: usize,
    pub has_prev: bool,
    pub has_next: bool,
    pub page_size: usize,
    pub selected: usize,
}

pub fn build_pager(ctrl: &TableController<Customer>) -> PagerViewModel {
    let view = ctrl.view();
    let pages: Vec<usize> = page_window(view.page, view.page_count)
        .map(|r| r.collect())
        .unwrap_or_default();
    PagerViewModel {
        summary: format!(
            "Showing {} to {} of {} entries",
            view.start, view.end, view.total_matched
        ),
        pages,
        current: view.page,
        has_prev: view.page > 1,
        has_next: view.page < view.page_count,
        page_size: ctrl.view_state().page_size,
        selected: ctrl.selected().len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::sample_customers;

    fn controller() -> TableController<Customer> {
        TableController::new(sample_customers(), CustomerField::Id, 10)
    }

    #[test]
    fn test_headers_follow_visible_columns() {
        let mut ctrl = controller();
        ctrl.toggle_column(CustomerField::Email);
        let vm = build_customers_view(&ctrl);
        assert_eq!(
            vm.headers,
            vec!["[ ]", "Id", "Name", "Status", "Country", "Created"]
        );
        assert_eq!(vm.widths.len(), vm.headers.len());
        assert_eq!(vm.rows[0].cells.len(), vm.headers.len());
        assert_eq!(vm.sort_column, Some(1));
        assert!(vm.sort_ascending);
    }

    #[test]
    fn test_hidden_sort_column() {
        let mut ctrl = controller();
        ctrl.set_sort(CustomerField::Country);
        ctrl.toggle_column(CustomerField::Country);
        assert_eq!(build_customers_view(&ctrl).sort_column, None);
    }

    #[test]
    fn test_status_badges_and_selection() {
        let mut ctrl = controller();
        ctrl.select(1);
        let vm = build_customers_view(&ctrl);
        assert_eq!(vm.headers[0], "[-]");
        let first = &vm.rows[0];
        assert_eq!(first.id, 1);
        assert_eq!(first.style, RowStyleClass::Accent);
        assert_eq!(first.cells[0].text, "[x]");
        let status = &first.cells[4];
        assert_eq!(
            status.style,
            Some(status_style(ctrl.get(1).unwrap().status))
        );
        assert_eq!(status.text, ctrl.get(1).unwrap().status.label());
    }

    #[test]
    fn test_pager() {
        let mut ctrl = controller();
        ctrl.set_page_size(5).unwrap();
        ctrl.goto_page(3);
        let pager = build_pager(&ctrl);
        assert_eq!(pager.summary, "Showing 11 to 15 of 20 entries");
        assert_eq!(pager.pages, vec![1, 2, 3, 4]);
        assert!(pager.has_prev && pager.has_next);

        ctrl.set_search_term("zzz-no-match");
        let pager = build_pager(&ctrl);
        assert_eq!(pager.summary, "Showing 0 to 0 of 0 entries");
        assert!(pager.pages.is_empty());
        assert!(!pager.has_prev && !pager.has_next);
    }
}
