//! Runtime settings shared by the library and the binary.

use std::time::Duration;

use crate::notify::TOAST_TTL;

/// Page sizes offered by the page-size selector.
pub const PAGE_SIZES: [usize; 4] = [5, 10, 25, 50];
pub const DEFAULT_PAGE_SIZE: usize = 10;
pub const DEFAULT_SERVER: &str = "http://localhost:8000";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub page_sizes: Vec<usize>,
    /// Base URL of the rendering server for clear-issues requests.
    pub server_url: String,
    /// How long table toasts stay on screen.
    pub toast_ttl: Duration,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            page_sizes: PAGE_SIZES.to_vec(),
            server_url: DEFAULT_SERVER.to_string(),
            toast_ttl: TOAST_TTL,
        }
    }
}

impl Settings {
    /// Page size offered after `current` in the selector, wrapping around.
    /// A size not in the list steps to the first one larger than it.
    pub fn next_page_size(&self, current: usize) -> usize {
        self.page_sizes
            .iter()
            .copied()
            .find(|&s| s > current)
            .or_else(|| self.page_sizes.first().copied())
            .unwrap_or(current)
    }

    pub fn prev_page_size(&self, current: usize) -> usize {
        self.page_sizes
            .iter()
            .rev()
            .copied()
            .find(|&s| s < current)
            .or_else(|| self.page_sizes.last().copied())
            .unwrap_or(current)
    }
}

/// Parses a page size argument. Zero is rejected.
pub fn parse_page_size(s: &str) -> Result<usize, String> {
    let n = s
        .trim()
        .parse::<usize>()
        .map_err(|e| format!("invalid page size '{}': {}", s, e))?;
    if n == 0 {
        return Err("page size must be at least 1".to_string());
    }
    Ok(n)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_page_size() {
        assert_eq!(parse_page_size("25"), Ok(25));
        assert_eq!(parse_page_size(" 7 "), Ok(7));
        assert!(parse_page_size("0").is_err());
        assert!(parse_page_size("ten").is_err());
    }

    #[test]
    fn test_page_size_cycle() {
        let s = Settings::default();
        assert_eq!(s.next_page_size(10), 25);
        assert_eq!(s.next_page_size(50), 5);
        assert_eq!(s.next_page_size(7), 10);
        assert_eq!(s.prev_page_size(10), 5);
        assert_eq!(s.prev_page_size(5), 50);
    }
}
