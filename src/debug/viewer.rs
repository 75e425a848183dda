//! Debug viewer state: active tab, copy and clear actions.

use std::str::FromStr;

use tracing::{info, warn};

use super::issues::{IssueClient, IssueError};
use super::report::ConcernReport;
use crate::clipboard::Clipboard;
use crate::notify::{NoticeLevel, Notifier};

/// Tabs of the debug viewer. Exactly one is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DebugTab {
    #[default]
    Table,
    Markdown,
}

impl DebugTab {
    pub fn name(&self) -> &'static str {
        match self {
            DebugTab::Table => "table",
            DebugTab::Markdown => "markdown",
        }
    }

    pub fn other(&self) -> Self {
        match self {
            DebugTab::Table => DebugTab::Markdown,
            DebugTab::Markdown => DebugTab::Table,
        }
    }
}

impl FromStr for DebugTab {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "table" => Ok(DebugTab::Table),
            "markdown" => Ok(DebugTab::Markdown),
            other => Err(format!("unknown tab '{}'", other)),
        }
    }
}

/// Outcome of a clear-issues request, for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClearOutcome {
    Cleared,
    Rejected(u16),
    Failed(String),
}

impl ClearOutcome {
    pub fn message(&self) -> &'static str {
        match self {
            ClearOutcome::Cleared => "Issues cleared successfully",
            ClearOutcome::Rejected(_) => "Failed to clear issues",
            ClearOutcome::Failed(_) => "Error clearing issues",
        }
    }
}

impl From<Result<(), IssueError>> for ClearOutcome {
    fn from(r: Result<(), IssueError>) -> Self {
        match r {
            Ok(()) => ClearOutcome::Cleared,
            Err(IssueError::Status(code)) => ClearOutcome::Rejected(code),
            Err(IssueError::Transport(msg)) => ClearOutcome::Failed(msg),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct DebugViewer {
    report: ConcernReport,
    tab: DebugTab,
    /// Vertical scroll of the active tab.
    pub scroll: usize,
}

impl DebugViewer {
    pub fn new(report: ConcernReport) -> Self {
        Self {
            report,
            tab: DebugTab::Table,
            scroll: 0,
        }
    }

    pub fn report(&self) -> &ConcernReport {
        &self.report
    }

    pub fn tab(&self) -> DebugTab {
        self.tab
    }

    /// Activates the tab called `name`. Unknown names leave the state unchanged.
    pub fn switch_tab(&mut self, name: &str) -> bool {
        match name.parse::<DebugTab>() {
            Ok(tab) => {
                if tab != self.tab {
                    self.tab = tab;
                    self.scroll = 0;
                }
                true
            }
            Err(_) => false,
        }
    }

    pub fn toggle_tab(&mut self) {
        self.tab = self.tab.other();
        self.scroll = 0;
    }

    /// Copies the markdown report and posts the result to `notifier`.
    /// The notice quotes the first line of what was copied.
    pub fn copy_markdown(&self, clipboard: &mut dyn Clipboard, notifier: &mut Notifier) -> bool {
        let markdown = self.report.to_markdown();
        match clipboard.copy(&markdown) {
            Ok(()) => {
                info!(clipboard = clipboard.name(), bytes = markdown.len(), "copied concern report");
                let head = markdown.lines().next().unwrap_or_default();
                notifier.notice(format!("Copied: {}", head), NoticeLevel::Success);
                true
            }
            Err(e) => {
                warn!(clipboard = clipboard.name(), error = %e, "copy failed");
                notifier.notice("Failed to copy to clipboard", NoticeLevel::Error);
                false
            }
        }
    }

    /// Sends one clear-issues request. The local report is emptied only on success.
    pub fn clear_issues(&mut self, client: &dyn IssueClient, notifier: &mut Notifier) -> ClearOutcome {
        let outcome = ClearOutcome::from(client.clear_issues());
        self.apply_clear_outcome(&outcome, notifier);
        outcome
    }

    /// Applies the result of a clear-issues request sent elsewhere.
    pub fn apply_clear_outcome(&mut self, outcome: &ClearOutcome, notifier: &mut Notifier) {
        let level = match outcome {
            ClearOutcome::Cleared => {
                self.report.clear();
                self.scroll = 0;
                NoticeLevel::Success
            }
            _ => NoticeLevel::Error,
        };
        notifier.notice(outcome.message(), level);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clipboard::ClipboardError;
    use crate::debug::report::Concern;

    struct FakeClipboard {
        fail: bool,
        copied: Vec<String>,
    }

    impl Clipboard for FakeClipboard {
        fn name(&self) -> &'static str {
            "fake"
        }

        fn copy(&mut self, text: &str) -> Result<(), ClipboardError> {
            if self.fail {
                return Err(ClipboardError::Command("denied".into()));
            }
            self.copied.push(text.to_string());
            Ok(())
        }
    }

    struct FakeClient(Result<(), IssueError>);

    impl IssueClient for FakeClient {
        fn clear_issues(&self) -> Result<(), IssueError> {
            self.0.clone()
        }
    }

    fn viewer() -> DebugViewer {
        DebugViewer::new(ConcernReport::new(vec![Concern {
            key: "open_tag-e1".into(),
            element: "div".into(),
            element_id: "e1".into(),
            function: "render".into(),
            location: "page.go:1".into(),
            issues: vec![],
        }]))
    }

    #[test]
    fn test_switch_tab_by_name() {
        let mut v = viewer();
        assert_eq!(v.tab(), DebugTab::Table);
        assert!(v.switch_tab("markdown"));
        assert_eq!(v.tab(), DebugTab::Markdown);
        assert!(!v.switch_tab("nonsense"));
        assert_eq!(v.tab(), DebugTab::Markdown);
        assert!(v.switch_tab("table"));
        assert_eq!(v.tab(), DebugTab::Table);
    }

    #[test]
    fn test_copy_markdown() {
        let v = viewer();
        let mut notifier = Notifier::new();
        let mut clip = FakeClipboard {
            fail: false,
            copied: vec![],
        };
        assert!(v.copy_markdown(&mut clip, &mut notifier));
        assert_eq!(clip.copied, vec![v.report().to_markdown()]);
        let notice = notifier.current().unwrap();
        assert_eq!(notice.level, NoticeLevel::Success);
        assert_eq!(notice.message, "Copied: ## Element Concerns");

        clip.fail = true;
        assert!(!v.copy_markdown(&mut clip, &mut notifier));
        assert_eq!(notifier.current().unwrap().level, NoticeLevel::Error);
    }

    #[test]
    fn test_clear_issues_messages() {
        let mut notifier = Notifier::new();

        let mut v = viewer();
        let outcome = v.clear_issues(&FakeClient(Err(IssueError::Status(503))), &mut notifier);
        assert_eq!(outcome, ClearOutcome::Rejected(503));
        assert_eq!(notifier.current().unwrap().message, "Failed to clear issues");
        assert_eq!(v.report().len(), 1);

        let outcome = v.clear_issues(
            &FakeClient(Err(IssueError::Transport("refused".into()))),
            &mut notifier,
        );
        assert!(matches!(outcome, ClearOutcome::Failed(_)));
        assert_eq!(notifier.current().unwrap().message, "Error clearing issues");
        assert_eq!(v.report().len(), 1);

        let outcome = v.clear_issues(&FakeClient(Ok(())), &mut notifier);
        assert_eq!(outcome, ClearOutcome::Cleared);
        assert_eq!(notifier.current().unwrap().message, "Issues cleared successfully");
        assert!(v.report().is_empty());
    }
}
