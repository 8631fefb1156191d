//! Scroll offset memoization and document scroll state.

use std::collections::HashMap;

use ayur_types::host::Location;

/// Last known vertical offset per visited URL.
///
/// Keys are `pathname + search` (fragment excluded). Entries live for the
/// whole tab session and are overwritten on revisit.
#[derive(Debug, Clone, Default)]
pub struct ScrollPositionTable {
    offsets: HashMap<String, u32>,
}

impl ScrollPositionTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `offset` for `key`, replacing any earlier value.
    pub fn record(&mut self, key: impl Into<String>, offset: u32) {
        self.offsets.insert(key.into(), offset);
    }

    /// Stored offset for `key`, or 0 if the URL was never left.
    pub fn lookup(&self, key: &str) -> u32 {
        self.offsets.get(key).copied().unwrap_or(0)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.offsets.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }
}

/// Normalized scroll key for a location.
pub fn normalize_key(pathname: &str, search: &str) -> String {
    format!("{pathname}{search}")
}

/// Normalized scroll key for a link href.
pub fn href_key(href: &str) -> String {
    Location::parse(href).scroll_key()
}

/// Vertical scroll state of a rendered document.
#[derive(Debug, Clone)]
pub struct DocumentScroll {
    /// Current vertical scroll offset in pixels.
    pub scroll_y: u32,
    /// Total content height of the mounted page.
    pub content_height: u32,
    /// Visible viewport height.
    pub viewport_height: u32,
}

impl DocumentScroll {
    pub fn new(viewport_height: u32, content_height: u32) -> Self {
        Self {
            scroll_y: 0,
            content_height,
            viewport_height,
        }
    }

    /// Scroll to an absolute position, clamped to the document.
    pub fn scroll_to(&mut self, y: u32) {
        self.scroll_y = y;
        self.clamp();
    }

    /// Update content height (after a new page is mounted).
    pub fn set_content_height(&mut self, height: u32) {
        self.content_height = height;
        self.clamp();
    }

    /// Update viewport height (after window resize).
    pub fn set_viewport_height(&mut self, height: u32) {
        self.viewport_height = height;
        self.clamp();
    }

    /// Get the maximum scroll offset.
    pub fn max_scroll(&self) -> u32 {
        self.content_height.saturating_sub(self.viewport_height)
    }

    fn clamp(&mut self) {
        self.scroll_y = self.scroll_y.min(self.max_scroll());
    }

    /// Scroll percentage (0.0 to 1.0).
    pub fn scroll_fraction(&self) -> f32 {
        let max = self.max_scroll();
        if max == 0 {
            0.0
        } else {
            self.scroll_y as f32 / max as f32
        }
    }

    pub fn at_top(&self) -> bool {
        self.scroll_y == 0
    }

    pub fn at_bottom(&self) -> bool {
        self.scroll_y >= self.max_scroll()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_then_lookup() {
        let mut t = ScrollPositionTable::new();
        t.record("/pizhichil", 120);
        assert_eq!(t.lookup("/pizhichil"), 120);
        assert!(t.contains("/pizhichil"));
    }

    #[test]
    fn unseen_key_is_zero() {
        let t = ScrollPositionTable::new();
        assert_eq!(t.lookup("/never"), 0);
        assert!(!t.contains("/never"));
        assert!(t.is_empty());
    }

    #[test]
    fn last_write_wins() {
        let mut t = ScrollPositionTable::new();
        t.record("/abhyanga", 10);
        t.record("/abhyanga", 900);
        assert_eq!(t.lookup("/abhyanga"), 900);
        assert_eq!(t.len(), 1);
    }

    #[test]
    fn query_is_part_of_the_key() {
        let mut t = ScrollPositionTable::new();
        t.record(normalize_key("/nasyam", "?a=1"), 50);
        assert_eq!(t.lookup("/nasyam?a=1"), 50);
        assert_eq!(t.lookup("/nasyam"), 0);
    }

    #[test]
    fn href_key_drops_fragment_keeps_query() {
        assert_eq!(href_key("/kativasti?x=2#contact"), "/kativasti?x=2");
        assert_eq!(href_key("/#treatments"), "/");
        assert_eq!(href_key("/shirovasti"), "/shirovasti");
    }

    #[test]
    fn document_scroll_clamps_to_content() {
        let mut s = DocumentScroll::new(800, 1000);
        // Max scroll = 1000 - 800 = 200
        s.scroll_to(500);
        assert_eq!(s.scroll_y, 200);
        assert!(s.at_bottom());
    }

    #[test]
    fn shrinking_content_pulls_offset_back() {
        let mut s = DocumentScroll::new(800, 4000);
        s.scroll_to(2000);
        s.set_content_height(1200);
        assert_eq!(s.scroll_y, 400);
    }

    #[test]
    fn short_document_cannot_scroll() {
        let mut s = DocumentScroll::new(800, 300);
        assert_eq!(s.max_scroll(), 0);
        s.scroll_to(100);
        assert!(s.at_top());
        assert_eq!(s.scroll_fraction(), 0.0);
    }

    #[test]
    fn scroll_fraction_calculation() {
        let mut s = DocumentScroll::new(200, 400);
        s.scroll_to(100);
        assert!((s.scroll_fraction() - 0.5).abs() < 0.001);
    }

    mod prop {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn lookup_returns_latest_write(
                key in "/[a-z]{1,10}",
                writes in proptest::collection::vec(0u32..100_000, 1..10),
            ) {
                let mut t = ScrollPositionTable::new();
                for w in &writes {
                    t.record(key.as_str(), *w);
                }
                prop_assert_eq!(t.lookup(&key), *writes.last().unwrap());
                prop_assert_eq!(t.len(), 1);
            }

            #[test]
            fn offset_never_exceeds_max(
                viewport in 1u32..2000,
                content in 0u32..20_000,
                target in 0u32..40_000,
            ) {
                let mut s = DocumentScroll::new(viewport, content);
                s.scroll_to(target);
                prop_assert!(s.scroll_y <= s.max_scroll());
            }
        }
    }
}
