//! Debug concern table view model.

use crate::debug::ConcernReport;
use crate::view::common::{RowStyleClass, TableViewModel, ViewCell, ViewRow};

const HEADERS: &[&str] = &["KEY", "DETAILS", "ISSUES"];
const WIDTHS: &[u16] = &[16, 48];

pub fn build_concerns_view(report: &ConcernReport) -> TableViewModel<String> {
    let rows = report
        .concerns()
        .iter()
        .map(|c| {
            let details = format!(
                "{} {} - {} ({})",
                c.element, c.element_id, c.function, c.location
            );
            let issues = if c.is_open_tag() {
                format!("{} tag not closed", c.element)
            } else {
                c.issues.join(", ")
            };
            ViewRow {
                id: c.key.clone(),
                cells: vec![
                    ViewCell::plain(c.key.clone()),
                    ViewCell::plain(details),
                    ViewCell::plain(issues),
                ],
                style: if c.is_open_tag() {
                    RowStyleClass::Critical
                } else {
                    RowStyleClass::Warning
                },
            }
        })
        .collect();

    TableViewModel {
        title: format!(" Element Concerns [{} issues] ", report.len()),
        headers: HEADERS.iter().map(|s| s.to_string()).collect(),
        widths: WIDTHS.to_vec(),
        rows,
        sort_column: None,
        sort_ascending: true,
        empty_message: "No issues recorded",
    }
}
