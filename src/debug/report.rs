//! Element concern report: loading, deduplication and markdown rendering.

use std::collections::HashSet;
use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Key prefix of concerns raised for tags that were opened but never closed.
pub const OPEN_TAG_PREFIX: &str = "open_tag";

/// One debug finding about a rendered element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Concern {
    /// Concern key (`open_tag-e12`, `other-e7`).
    pub key: String,
    /// Element tag name.
    pub element: String,
    #[serde(default)]
    pub element_id: String,
    /// Function that rendered the element.
    #[serde(default)]
    pub function: String,
    /// Source location (`file.go:42`).
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub issues: Vec<String>,
}

impl Concern {
    pub fn is_open_tag(&self) -> bool {
        self.key.starts_with(OPEN_TAG_PREFIX)
    }

    /// Key used to collapse repeated findings from the same place.
    pub fn dedup_key(&self) -> String {
        if self.is_open_tag() {
            format!("{}|{}|open_tag_not_closed", self.location, self.element)
        } else if !self.issues.is_empty() {
            format!("{}|{}|{}", self.location, self.element, self.issues.join(";"))
        } else {
            format!("{}|{}|unknown", self.location, self.element)
        }
    }

    /// `**div** tag e12 - render (page.go:42)`.
    pub fn details(&self) -> String {
        format!(
            "**{}** tag {} - {} ({})",
            self.element, self.element_id, self.function, self.location
        )
    }

    /// Issue text for display.
    pub fn issues_text(&self) -> String {
        if self.is_open_tag() {
            format!("**{}** tag not closed", self.element)
        } else {
            self.issues.join(", ")
        }
    }
}

/// Error types that can occur while loading a report.
#[derive(Debug)]
pub enum ReportError {
    Io(String),
    Parse(String),
}

impl std::fmt::Display for ReportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportError::Io(msg) => write!(f, "I/O error: {}", msg),
            ReportError::Parse(msg) => write!(f, "Parse error: {}", msg),
        }
    }
}

impl std::error::Error for ReportError {}

/// Deduplicated concerns, ordered by key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConcernReport {
    concerns: Vec<Concern>,
}

impl ConcernReport {
    /// Builds a report, keeping the first concern (by key) of each duplicate group.
    pub fn new(mut concerns: Vec<Concern>) -> Self {
        concerns.sort_by(|a, b| a.key.cmp(&b.key));
        let mut seen = HashSet::new();
        concerns.retain(|c| seen.insert(c.dedup_key()));
        Self { concerns }
    }

    pub fn load(path: &Path) -> Result<Self, ReportError> {
        let raw = fs::read_to_string(path).map_err(|e| ReportError::Io(e.to_string()))?;
        Self::parse(&raw)
    }

    pub fn parse(raw: &str) -> Result<Self, ReportError> {
        let concerns: Vec<Concern> =
            serde_json::from_str(raw).map_err(|e| ReportError::Parse(e.to_string()))?;
        Ok(Self::new(concerns))
    }

    pub fn concerns(&self) -> &[Concern] {
        &self.concerns
    }

    pub fn len(&self) -> usize {
        self.concerns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.concerns.is_empty()
    }

    pub fn clear(&mut self) {
        self.concerns.clear();
    }

    /// Renders the report as a markdown document.
    pub fn to_markdown(&self) -> String {
        let mut out = String::new();
        out.push_str("## Element Concerns\n\n");
        let _ = writeln!(out, "Total issues: {}\n", self.concerns.len());
        out.push_str("| Key | Details | Issues |\n");
        out.push_str("|-----|---------|--------|\n");
        for c in &self.concerns {
            let _ = writeln!(out, "| {} | {} | {} |", c.key, c.details(), c.issues_text());
        }
        out
    }
}
