//! Debug viewer for element concerns reported by the rendering server.

mod issues;
mod report;
mod viewer;

pub use issues::{CLEAR_ISSUES_PATH, HttpIssueClient, IssueClient, IssueError, clear_issues_url};
pub use report::{Concern, ConcernReport, OPEN_TAG_PREFIX, ReportError};
pub use viewer::{ClearOutcome, DebugTab, DebugViewer};
