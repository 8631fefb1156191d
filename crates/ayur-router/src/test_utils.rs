//! Shared test utilities for the navigation core.
//!
//! Provides a [`FlakyHost`] that wraps a [`HeadlessTab`] and makes chosen
//! host calls fail, so error paths can be asserted.

use ayur_types::error::{Result, SiteError};
use ayur_types::host::{Anchor, Host, ListenerKind, Location, NodeId, Viewport};

use crate::headless::HeadlessTab;

/// A host wrapper that injects failures into selected calls.
pub struct FlakyHost {
    pub inner: HeadlessTab,
    pub fail_push: bool,
    pub fail_scroll_y: bool,
    pub fail_scroll_to: bool,
    pub fail_subscribe: bool,
    /// Number of successful `set_scroll_top` fallbacks.
    pub fallback_assignments: usize,
    pub unsubscribe_calls: usize,
}

impl FlakyHost {
    pub fn new(inner: HeadlessTab) -> Self {
        Self {
            inner,
            fail_push: false,
            fail_scroll_y: false,
            fail_scroll_to: false,
            fail_subscribe: false,
            fallback_assignments: 0,
            unsubscribe_calls: 0,
        }
    }
}

impl Host for FlakyHost {
    fn location(&self) -> Location {
        self.inner.location()
    }

    fn push_state(&mut self, url: &str) -> Result<()> {
        if self.fail_push {
            return Err(SiteError::History(format!("push of {url} rejected")));
        }
        self.inner.push_state(url)
    }

    fn replace_state(&mut self, url: &str) -> Result<()> {
        self.inner.replace_state(url)
    }

    fn scroll_y(&self) -> Result<u32> {
        if self.fail_scroll_y {
            return Err(SiteError::Scroll("scrollY unavailable".into()));
        }
        self.inner.scroll_y()
    }

    fn scroll_to(&mut self, y: u32) -> Result<()> {
        if self.fail_scroll_to {
            return Err(SiteError::Scroll(format!("scrollTo({y}) threw")));
        }
        self.inner.scroll_to(y)
    }

    fn set_scroll_top(&mut self, y: u32) -> Result<()> {
        self.inner.set_scroll_top(y)?;
        self.fallback_assignments += 1;
        Ok(())
    }

    fn viewport(&self) -> Viewport {
        self.inner.viewport()
    }

    fn now_ms(&self) -> u64 {
        self.inner.now_ms()
    }

    fn closest_anchor(&self, node: NodeId) -> Option<Anchor> {
        self.inner.closest_anchor(node)
    }

    fn subscribe(&mut self, kind: ListenerKind) -> Result<()> {
        if self.fail_subscribe {
            return Err(SiteError::Host(format!("cannot attach {kind:?} listener")));
        }
        self.inner.subscribe(kind)
    }

    fn unsubscribe(&mut self, kind: ListenerKind) -> Result<()> {
        self.unsubscribe_calls += 1;
        self.inner.unsubscribe(kind)
    }
}
