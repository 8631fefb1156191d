//! In-memory browser tab.
//!
//! [`HeadlessTab`] implements [`Host`] without a real browser: a session
//! history stack, a clamped document scroll offset, a small node arena
//! for anchor lookup, a virtual clock, and the listener set. The desktop
//! driver renders through it and the tests assert against it.

use ayur_types::error::{Result, SiteError};
use ayur_types::host::{
    Anchor, ClickEvent, Host, HostEvent, ListenerKind, Location, NodeId, Viewport,
};
use serde::Serialize;

use crate::history::SessionHistory;
use crate::nav::NavigationController;
use crate::scroll::DocumentScroll;

/// Interval between animation frames (~60 Hz).
pub const DEFAULT_FRAME_MS: u64 = 16;

/// Default visible height of the document viewport.
pub const DEFAULT_VIEWPORT_HEIGHT: u32 = 800;

/// Default page length; long enough for every treatment page.
pub const DEFAULT_CONTENT_HEIGHT: u32 = 4000;

/// Upper bound on scheduler steps in one [`HeadlessTab::settle`] call.
const MAX_SETTLE_STEPS: usize = 10_000;

#[derive(Debug, Clone)]
struct DomNode {
    parent: Option<NodeId>,
    anchor: Option<Anchor>,
}

/// What happened while driving the controller to idle.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SettleReport {
    /// Scheduler steps taken (timers plus frames).
    pub steps: usize,
    /// Animation frames delivered.
    pub frames: usize,
    /// Virtual time that passed.
    pub elapsed_ms: u64,
    /// Whether the overlay was visible after any step.
    pub overlay_seen: bool,
}

/// An in-memory browser tab.
pub struct HeadlessTab {
    history: SessionHistory,
    scroll: DocumentScroll,
    viewport: Viewport,
    now_ms: u64,
    frame_ms: u64,
    nodes: Vec<DomNode>,
    listeners: Vec<ListenerKind>,
}

impl HeadlessTab {
    /// Open a tab at `url` with a desktop viewport.
    pub fn new(url: &str) -> Self {
        Self {
            history: SessionHistory::new(&Location::parse(url).href()),
            scroll: DocumentScroll::new(DEFAULT_VIEWPORT_HEIGHT, DEFAULT_CONTENT_HEIGHT),
            viewport: Viewport::default(),
            now_ms: 0,
            frame_ms: DEFAULT_FRAME_MS,
            nodes: Vec::new(),
            listeners: Vec::new(),
        }
    }

    pub fn with_viewport(mut self, viewport: Viewport) -> Self {
        self.viewport = viewport;
        self
    }

    // -------------------------------------------------------------------
    // Environment knobs
    // -------------------------------------------------------------------

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    /// Change the viewport width (window resize / device rotation).
    pub fn resize(&mut self, inner_width: u32) {
        self.viewport.inner_width = inner_width;
    }

    pub fn set_user_agent(&mut self, user_agent: &str) {
        self.viewport.user_agent = user_agent.to_string();
    }

    /// Length of the currently mounted page.
    pub fn set_content_height(&mut self, height: u32) {
        self.scroll.set_content_height(height);
    }

    /// Scroll as a user would (wheel, touch), bypassing the controller.
    pub fn user_scroll(&mut self, y: u32) {
        self.scroll.scroll_to(y);
    }

    pub fn scroll_offset(&self) -> u32 {
        self.scroll.scroll_y
    }

    pub fn advance(&mut self, ms: u64) {
        self.now_ms += ms;
    }

    pub fn frame_ms(&self) -> u64 {
        self.frame_ms
    }

    pub fn set_frame_ms(&mut self, frame_ms: u64) {
        self.frame_ms = frame_ms.max(1);
    }

    // -------------------------------------------------------------------
    // Document
    // -------------------------------------------------------------------

    /// Append a plain element under `parent`.
    pub fn add_node(&mut self, parent: Option<NodeId>) -> NodeId {
        self.nodes.push(DomNode {
            parent,
            anchor: None,
        });
        NodeId(self.nodes.len() - 1)
    }

    /// Append an `<a>` element under `parent`.
    pub fn add_anchor(&mut self, parent: Option<NodeId>, anchor: Anchor) -> NodeId {
        self.nodes.push(DomNode {
            parent,
            anchor: Some(anchor),
        });
        NodeId(self.nodes.len() - 1)
    }

    /// Drop every node (a new page was mounted).
    pub fn clear_document(&mut self) {
        self.nodes.clear();
    }

    // -------------------------------------------------------------------
    // History
    // -------------------------------------------------------------------

    pub fn history_len(&self) -> usize {
        self.history.entry_count()
    }

    pub fn history_index(&self) -> usize {
        self.history.index()
    }

    pub fn can_go_back(&self) -> bool {
        self.history.can_go_back()
    }

    pub fn can_go_forward(&self) -> bool {
        self.history.can_go_forward()
    }

    /// Press the back button. Returns the event to deliver, if history moved.
    pub fn go_back(&mut self) -> Option<HostEvent> {
        self.history.go_back().map(|_| HostEvent::PopState)
    }

    /// Press the forward button.
    pub fn go_forward(&mut self) -> Option<HostEvent> {
        self.history.go_forward().map(|_| HostEvent::PopState)
    }

    /// Navigate to a fragment of the current document, the way following
    /// an in-page anchor does: a new entry with only the hash changed.
    pub fn set_hash(&mut self, hash: &str) -> HostEvent {
        let mut location = self.location();
        location.hash = if hash.is_empty() || hash.starts_with('#') {
            hash.to_string()
        } else {
            format!("#{hash}")
        };
        self.history.push(&location.href());
        HostEvent::HashChange
    }

    // -------------------------------------------------------------------
    // Listeners and dispatch
    // -------------------------------------------------------------------

    pub fn is_subscribed(&self, kind: ListenerKind) -> bool {
        self.listeners.contains(&kind)
    }

    pub fn subscription_count(&self) -> usize {
        self.listeners.len()
    }

    /// Deliver `event` if a listener for it is attached.
    pub fn dispatch(&mut self, nav: &mut NavigationController, event: HostEvent) -> bool {
        if !self.is_subscribed(ListenerKind::of(&event)) {
            log::debug!("No listener for {event:?}");
            return false;
        }
        nav.handle_event(self, event);
        true
    }

    /// Click on `node`. Runs the controller's capturing observer, then the
    /// tab's default action if the controller did not suppress it.
    /// Returns whether the default action was suppressed.
    pub fn click(&mut self, nav: &mut NavigationController, node: NodeId) -> bool {
        let mut event = ClickEvent::new(node);
        if self.is_subscribed(ListenerKind::Click) && nav.is_initialized() {
            nav.on_link_activated(self, &mut event);
        }
        if !event.default_prevented() {
            self.default_click_action(nav, node);
        }
        event.default_prevented()
    }

    fn default_click_action(&mut self, nav: &mut NavigationController, node: NodeId) {
        let Some(anchor) = self.closest_anchor(node) else {
            return;
        };
        let Some(href) = anchor.href.as_deref().filter(|h| !h.is_empty()) else {
            return;
        };
        if !anchor.targets_self() {
            log::info!("Opened {href} in another browsing context");
        } else if href.starts_with('#') {
            let event = self.set_hash(href);
            self.dispatch(nav, event);
        } else if href.starts_with('/') {
            // Full document load; the controller is not involved.
            self.history.push(&Location::parse(href).href());
            self.scroll.scroll_to(0);
            log::info!("Full page load of {href}");
        } else {
            log::info!("Left the tab for {href}");
        }
    }

    /// Drive timers and animation frames until the controller is idle.
    ///
    /// Timers fire at their exact deadline when it falls before the next
    /// frame; otherwise a frame is delivered.
    pub fn settle(&mut self, nav: &mut NavigationController) -> SettleReport {
        self.settle_with(nav, |_, _| {})
    }

    /// Like [`settle`](Self::settle), calling `after_step` once the
    /// controller has handled each timer or frame. Drivers use it to mount
    /// the new view before the layout frames run out.
    pub fn settle_with<F>(
        &mut self,
        nav: &mut NavigationController,
        mut after_step: F,
    ) -> SettleReport
    where
        F: FnMut(&mut HeadlessTab, &NavigationController),
    {
        let start = self.now_ms;
        let mut report = SettleReport {
            overlay_seen: nav.is_navigating(),
            ..SettleReport::default()
        };

        while !nav.phase().is_idle() && report.steps < MAX_SETTLE_STEPS {
            let frame_at = self.now_ms + self.frame_ms;
            match nav.next_deadline_ms() {
                Some(deadline) if deadline <= frame_at => {
                    self.now_ms = self.now_ms.max(deadline);
                    nav.on_timer(self);
                },
                _ => {
                    self.now_ms = frame_at;
                    nav.on_frame(self);
                    report.frames += 1;
                },
            }
            report.steps += 1;
            report.overlay_seen |= nav.is_navigating();
            after_step(self, nav);
        }

        if !nav.phase().is_idle() {
            log::warn!("Controller still {} after {MAX_SETTLE_STEPS} steps", nav.phase().name());
        }
        report.elapsed_ms = self.now_ms - start;
        report
    }
}

impl Host for HeadlessTab {
    fn location(&self) -> Location {
        Location::parse(self.history.current_url())
    }

    fn push_state(&mut self, url: &str) -> Result<()> {
        if Location::has_origin(url) {
            return Err(SiteError::History(format!(
                "cross-origin URL {url} cannot be pushed"
            )));
        }
        self.history.push(&Location::parse(url).href());
        Ok(())
    }

    fn replace_state(&mut self, url: &str) -> Result<()> {
        if Location::has_origin(url) {
            return Err(SiteError::History(format!(
                "cross-origin URL {url} cannot replace the current entry"
            )));
        }
        self.history.replace(&Location::parse(url).href());
        Ok(())
    }

    fn scroll_y(&self) -> Result<u32> {
        Ok(self.scroll.scroll_y)
    }

    fn scroll_to(&mut self, y: u32) -> Result<()> {
        self.scroll.scroll_to(y);
        Ok(())
    }

    fn set_scroll_top(&mut self, y: u32) -> Result<()> {
        self.scroll.scroll_to(y);
        Ok(())
    }

    fn viewport(&self) -> Viewport {
        self.viewport.clone()
    }

    fn now_ms(&self) -> u64 {
        self.now_ms
    }

    fn closest_anchor(&self, node: NodeId) -> Option<Anchor> {
        let mut cursor = Some(node);
        while let Some(id) = cursor {
            let n = self.nodes.get(id.0)?;
            if let Some(anchor) = &n.anchor {
                return Some(anchor.clone());
            }
            cursor = n.parent;
        }
        None
    }

    fn subscribe(&mut self, kind: ListenerKind) -> Result<()> {
        if !self.listeners.contains(&kind) {
            self.listeners.push(kind);
        }
        Ok(())
    }

    fn unsubscribe(&mut self, kind: ListenerKind) -> Result<()> {
        self.listeners.retain(|k| *k != kind);
        Ok(())
    }
}
