//! Page-button window shown under the table.

use std::ops::RangeInclusive;

/// Maximum number of page buttons shown at once.
pub const WINDOW_SIZE: usize = 5;

/// Returns the range of page numbers to show as buttons.
///
/// The window is centered on the current page when possible (two pages on
/// either side) and slides to stay inside `[1, page_count]`. Returns `None`
/// when there is nothing to paginate.
pub fn page_window(current: usize, page_count: usize) -> Option<RangeInclusive<usize>> {
    if page_count == 0 {
        return None;
    }
    let current = current.clamp(1, page_count);
    let span = WINDOW_SIZE - 1;

    let mut start = current.saturating_sub(2).max(1);
    let end = (start + span).min(page_count);
    if end - start < span {
        start = end.saturating_sub(span).max(1);
    }
    Some(start..=end)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_pages() {
        assert_eq!(page_window(1, 0), None);
    }

    #[test]
    fn test_small_page_count() {
        assert_eq!(page_window(1, 3), Some(1..=3));
        assert_eq!(page_window(3, 3), Some(1..=3));
    }

    #[test]
    fn test_window_centers_on_current() {
        assert_eq!(page_window(5, 10), Some(3..=7));
        assert_eq!(page_window(1, 10), Some(1..=5));
        assert_eq!(page_window(2, 10), Some(1..=5));
    }

    #[test]
    fn test_window_slides_at_end() {
        assert_eq!(page_window(10, 10), Some(6..=10));
        assert_eq!(page_window(9, 10), Some(6..=10));
    }

    #[test]
    fn test_window_always_contains_current() {
        for count in 1..=12 {
            for page in 1..=count {
                let window = page_window(page, count).unwrap();
                assert!(window.contains(&page));
                assert!(window.end() - window.start() < WINDOW_SIZE);
            }
        }
    }
}
