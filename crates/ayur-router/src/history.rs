//! Session history stack for the headless tab.

/// A single entry in the session history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    pub url: String,
}

/// Back/forward stacks around the current entry, with the semantics of a
/// browser tab's joint session history.
#[derive(Debug, Clone)]
pub struct SessionHistory {
    back_stack: Vec<HistoryEntry>,
    forward_stack: Vec<HistoryEntry>,
    current: HistoryEntry,
}

impl SessionHistory {
    pub fn new(url: &str) -> Self {
        Self {
            back_stack: Vec::new(),
            forward_stack: Vec::new(),
            current: HistoryEntry {
                url: url.to_string(),
            },
        }
    }

    /// Add an entry. Pushes current to the back stack, clears the
    /// forward stack.
    pub fn push(&mut self, url: &str) {
        let previous = std::mem::replace(
            &mut self.current,
            HistoryEntry {
                url: url.to_string(),
            },
        );
        self.back_stack.push(previous);
        self.forward_stack.clear();
    }

    /// Rewrite the current entry without touching either stack.
    pub fn replace(&mut self, url: &str) {
        self.current.url = url.to_string();
    }

    /// Step back. Returns the new current entry, or None at the start.
    pub fn go_back(&mut self) -> Option<&HistoryEntry> {
        let prev = self.back_stack.pop()?;
        let current = std::mem::replace(&mut self.current, prev);
        self.forward_stack.push(current);
        Some(&self.current)
    }

    /// Step forward. Returns the new current entry, or None at the end.
    pub fn go_forward(&mut self) -> Option<&HistoryEntry> {
        let next = self.forward_stack.pop()?;
        let current = std::mem::replace(&mut self.current, next);
        self.back_stack.push(current);
        Some(&self.current)
    }

    pub fn current_url(&self) -> &str {
        &self.current.url
    }

    pub fn can_go_back(&self) -> bool {
        !self.back_stack.is_empty()
    }

    pub fn can_go_forward(&self) -> bool {
        !self.forward_stack.is_empty()
    }

    /// Total entries, including the current one.
    pub fn entry_count(&self) -> usize {
        self.back_stack.len() + 1 + self.forward_stack.len()
    }

    /// Position of the current entry, counted from the oldest.
    pub fn index(&self) -> usize {
        self.back_stack.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_moves_current_to_back_stack() {
        let mut h = SessionHistory::new("/");
        h.push("/pizhichil");
        h.push("/abhyanga");

        assert!(h.can_go_back());
        assert_eq!(h.current_url(), "/abhyanga");
        assert_eq!(h.entry_count(), 3);
        assert_eq!(h.index(), 2);
    }

    #[test]
    fn go_back_restores_previous_entry() {
        let mut h = SessionHistory::new("/");
        h.push("/pizhichil");

        let entry = h.go_back().unwrap();
        assert_eq!(entry.url, "/");
        assert!(h.can_go_forward());
        assert!(h.go_back().is_none());
    }

    #[test]
    fn go_forward_after_go_back() {
        let mut h = SessionHistory::new("/");
        h.push("/nasyam");
        h.go_back();

        let entry = h.go_forward().unwrap();
        assert_eq!(entry.url, "/nasyam");
        assert!(!h.can_go_forward());
    }

    #[test]
    fn push_clears_forward_stack() {
        let mut h = SessionHistory::new("/");
        h.push("/a");
        h.push("/b");
        h.go_back();
        assert!(h.can_go_forward());

        h.push("/c");
        assert!(!h.can_go_forward());
        assert_eq!(h.entry_count(), 3);
    }

    #[test]
    fn replace_keeps_length() {
        let mut h = SessionHistory::new("/#treatments");
        h.replace("/");
        assert_eq!(h.current_url(), "/");
        assert_eq!(h.entry_count(), 1);
    }

    mod prop {
        use super::*;
        use proptest::prelude::*;

        fn arb_path() -> impl Strategy<Value = String> {
            "[a-z]{3,10}".prop_map(|s| format!("/{s}"))
        }

        fn arb_paths(min: usize, max: usize) -> impl Strategy<Value = Vec<String>> {
            proptest::collection::vec(arb_path(), min..max)
        }

        proptest! {
            #[test]
            fn current_equals_last_pushed(paths in arb_paths(1, 20)) {
                let mut h = SessionHistory::new("/");
                for p in &paths {
                    h.push(p);
                }
                prop_assert_eq!(h.current_url(), paths.last().unwrap().as_str());
                prop_assert_eq!(h.entry_count(), paths.len() + 1);
            }

            #[test]
            fn back_then_forward_returns_to_same(paths in arb_paths(1, 10)) {
                let mut h = SessionHistory::new("/");
                for p in &paths {
                    h.push(p);
                }
                let before = h.current_url().to_string();
                h.go_back().unwrap();
                h.go_forward().unwrap();
                prop_assert_eq!(h.current_url(), before.as_str());
            }

            #[test]
            fn can_go_back_all_the_way(paths in arb_paths(1, 20)) {
                let mut h = SessionHistory::new("/");
                for p in &paths {
                    h.push(p);
                }
                let mut back_count = 0;
                while h.can_go_back() {
                    h.go_back();
                    back_count += 1;
                }
                prop_assert_eq!(back_count, paths.len());
                prop_assert_eq!(h.current_url(), "/");
                prop_assert_eq!(h.entry_count(), paths.len() + 1);
            }
        }
    }
}
