//! CSV export of the filtered, sorted table.

use std::fs;
use std::io;
use std::path::Path;

use tracing::{info, warn};

use super::controller::{EditableRow, TableController};
use super::pipeline::TableRow;
use super::validation::capitalize;

/// Default file name used by the export action.
pub const DEFAULT_EXPORT_FILE: &str = "customer_data_export.csv";

/// Error types that can occur during export.
#[derive(Debug)]
pub enum ExportError {
    /// Nothing matches the current search and filters.
    Empty,
    /// Writing the file failed.
    Io(io::Error),
}

impl std::fmt::Display for ExportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExportError::Empty => write!(f, "No data to export"),
            ExportError::Io(e) => write!(f, "I/O error: {}", e),
        }
    }
}

impl std::error::Error for ExportError {}

impl From<io::Error> for ExportError {
    fn from(e: io::Error) -> Self {
        ExportError::Io(e)
    }
}

/// Escapes one text value: quotes are doubled, values with commas are quoted.
pub fn escape_field(value: &str) -> String {
    let escaped = value.replace('"', "\"\"");
    if escaped.contains(',') {
        format!("\"{}\"", escaped)
    } else {
        escaped
    }
}

/// Renders rows as CSV over the given columns.
pub fn to_csv<T: TableRow>(rows: &[&T], fields: &[T::Field]) -> String {
    let mut out = String::new();

    let header: Vec<String> = fields
        .iter()
        .map(|&f| capitalize(T::field_name(f)))
        .collect();
    out.push_str(&header.join(","));
    out.push('\n');

    for row in rows {
        let line: Vec<String> = fields
            .iter()
            .map(|&f| {
                let value = row.cell(f);
                if T::is_numeric(f) {
                    value
                } else {
                    escape_field(&value)
                }
            })
            .collect();
        out.push_str(&line.join(","));
        out.push('\n');
    }

    out
}

impl<T: EditableRow> TableController<T> {
    /// Exports every matching row (all pages) over the visible columns.
    pub fn export_csv(&self) -> Result<String, ExportError> {
        let rows = self.matching();
        if rows.is_empty() {
            return Err(ExportError::Empty);
        }
        Ok(to_csv(&rows, &self.visible_fields()))
    }

    /// Exports to a file. Returns the number of data rows written.
    pub fn write_csv(&self, path: &Path) -> Result<usize, ExportError> {
        let csv = self.export_csv()?;
        let rows = csv.lines().count().saturating_sub(1);
        if let Err(e) = fs::write(path, csv) {
            warn!(path = %path.display(), error = %e, "CSV export failed");
            return Err(e.into());
        }
        info!(path = %path.display(), rows, "CSV exported");
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_plain() {
        assert_eq!(escape_field("John Doe"), "John Doe");
    }

    #[test]
    fn test_escape_comma_is_quoted() {
        assert_eq!(escape_field("Doe, John"), "\"Doe, John\"");
    }

    #[test]
    fn test_escape_quotes_doubled() {
        assert_eq!(escape_field("say \"hi\""), "say \"\"hi\"\"");
        assert_eq!(escape_field("a \"b\", c"), "\"a \"\"b\"\", c\"");
    }
}
