//! Navigation controller: link interception, history, scroll restoration,
//! and the loading overlay flag.

use ayur_types::config::NavConfig;
use ayur_types::error::Result;
use ayur_types::host::{ClickEvent, Host, HostEvent, ListenerKind, Location, Viewport};
use regex::Regex;
use serde::Serialize;

use crate::link::{self, LinkDisposition};
use crate::phase::NavPhase;
use crate::resolve::{PageTag, resolve};
use crate::scroll::{self, ScrollPositionTable};

/// How the current path was last changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NavAction {
    /// A new history entry was (or is about to be) added.
    Push,
    /// Back/forward or a hash-only change.
    Pop,
}

/// Observable navigation state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavigationState {
    /// Path used for view resolution (query and fragment stripped).
    pub current_path: String,
    /// Whether the full-screen loading overlay is shown.
    pub is_navigating: bool,
    /// Kind of the navigation whose scroll settlement is outstanding.
    pub last_action: Option<NavAction>,
}

/// Single-page navigation controller.
///
/// Owns the navigation state and the scroll table for one tab. The host
/// is passed into every call; the controller holds no reference to it.
pub struct NavigationController {
    config: NavConfig,
    mobile_ua: Regex,
    state: NavigationState,
    scroll_positions: ScrollPositionTable,
    phase: NavPhase,
    subscriptions: Vec<ListenerKind>,
    initialized: bool,
}

impl NavigationController {
    pub fn new(config: NavConfig) -> Result<Self> {
        config.validate()?;
        let mobile_ua = config.mobile_ua_regex()?;
        Ok(Self {
            config,
            mobile_ua,
            state: NavigationState {
                current_path: "/".to_string(),
                is_navigating: false,
                last_action: None,
            },
            scroll_positions: ScrollPositionTable::new(),
            phase: NavPhase::Idle,
            subscriptions: Vec::new(),
            initialized: false,
        })
    }

    // -------------------------------------------------------------------
    // Lifecycle
    // -------------------------------------------------------------------

    /// Attach to the host and settle the initial view.
    pub fn initialize(&mut self, host: &mut dyn Host) {
        if self.initialized {
            log::warn!("Navigation controller already initialized");
            return;
        }

        for kind in ListenerKind::ALL {
            match host.subscribe(kind) {
                Ok(()) => self.subscriptions.push(kind),
                Err(e) => log::warn!("Failed to subscribe to {kind:?}: {e}"),
            }
        }
        self.initialized = true;

        self.state.current_path = host.location().pathname;
        self.strip_home_hash(host);
        self.apply_pop(host);
        self.begin_settlement();
        log::debug!("Navigation initialized at {}", self.state.current_path);
    }

    /// Detach every listener attached by [`initialize`](Self::initialize)
    /// and drop any scheduled continuation.
    pub fn dispose(&mut self, host: &mut dyn Host) {
        for kind in self.subscriptions.drain(..) {
            if let Err(e) = host.unsubscribe(kind) {
                log::warn!("Failed to unsubscribe from {kind:?}: {e}");
            }
        }
        if !self.phase.is_idle() {
            log::debug!("Dropping {} phase on dispose", self.phase.name());
        }
        self.phase = NavPhase::Idle;
        self.state.is_navigating = false;
        self.initialized = false;
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    // -------------------------------------------------------------------
    // Events
    // -------------------------------------------------------------------

    /// Route a host event to its handler.
    pub fn handle_event(&mut self, host: &mut dyn Host, event: HostEvent) {
        if !self.initialized {
            log::debug!("Ignoring {event:?}: controller not initialized");
            return;
        }
        match event {
            HostEvent::Click(mut click) => {
                self.on_link_activated(host, &mut click);
            },
            HostEvent::PopState => self.on_pop_state(host),
            HostEvent::HashChange => self.on_hash_change(host),
        }
    }

    /// Inspect a click and start a push when it targets an in-app link.
    pub fn on_link_activated(
        &mut self,
        host: &mut dyn Host,
        event: &mut ClickEvent,
    ) -> LinkDisposition {
        let anchor = host.closest_anchor(event.target);
        let disposition = link::classify(anchor.as_ref());
        match &disposition {
            LinkDisposition::Intercepted { href } => {
                event.prevent_default();
                self.navigate(host, href);
            },
            LinkDisposition::Ignored(reason) => {
                log::debug!("Click on {:?} left to host: {reason:?}", event.target);
            },
        }
        disposition
    }

    /// Start a push navigation to `href`.
    ///
    /// This is the only way the path changes forward; nothing else calls
    /// [`Host::push_state`].
    pub fn navigate(&mut self, host: &mut dyn Host, href: &str) {
        let target_key = scroll::href_key(href);
        let fast_path =
            self.is_mobile(&host.viewport()) && self.scroll_positions.contains(&target_key);

        if !fast_path {
            self.state.is_navigating = true;
        }

        let current_key = host.location().scroll_key();
        match host.scroll_y() {
            Ok(y) => self.scroll_positions.record(current_key, y),
            Err(e) => log::warn!("Could not read scroll offset for {current_key}: {e}"),
        }
        self.state.last_action = Some(NavAction::Push);

        let delay_ms = if fast_path {
            self.config.fast_path_delay_ms
        } else {
            self.config.push_delay_ms
        };
        if let NavPhase::Pending { target, .. } = &self.phase {
            log::debug!("Push to {target} superseded by {href}");
        }
        self.phase = NavPhase::Pending {
            target: href.to_string(),
            delay_ms,
            commit_at_ms: host.now_ms().saturating_add(delay_ms),
        };
        log::debug!("Push to {href} scheduled in {delay_ms}ms (fast path: {fast_path})");
    }

    /// Back/forward navigation.
    pub fn on_pop_state(&mut self, host: &mut dyn Host) {
        let superseding = matches!(self.phase, NavPhase::Pending { .. });
        if superseding {
            log::debug!("Pop supersedes pending push");
        }
        let changed = self.apply_pop(host);
        if changed || superseding {
            self.begin_settlement();
        }
    }

    /// Fragment-only change. On the home path the fragment is removed
    /// from the address without adding a history entry.
    pub fn on_hash_change(&mut self, host: &mut dyn Host) {
        self.strip_home_hash(host);
        self.on_pop_state(host);
    }

    // -------------------------------------------------------------------
    // Scheduling
    // -------------------------------------------------------------------

    /// Next time-based deadline, for hosts that run real timers.
    pub fn next_deadline_ms(&self) -> Option<u64> {
        self.phase.deadline_ms()
    }

    /// Fire any time-based transition whose deadline has passed.
    pub fn on_timer(&mut self, host: &mut dyn Host) {
        let now = host.now_ms();
        match &self.phase {
            NavPhase::Pending {
                target,
                commit_at_ms,
                ..
            } if now >= *commit_at_ms => {
                let target = target.clone();
                self.commit_push(host, &target);
            },
            NavPhase::Grace { clear_at_ms } if now >= *clear_at_ms => {
                self.state.is_navigating = false;
                self.phase = NavPhase::Idle;
                log::debug!("Navigation settled at {}", self.state.current_path);
            },
            _ => {},
        }
    }

    /// One animation frame. Fires due timers, then counts down layout
    /// frames; a settlement begun during this call starts counting on
    /// the next frame.
    pub fn on_frame(&mut self, host: &mut dyn Host) {
        let was_settling = matches!(self.phase, NavPhase::Settling { .. });
        self.on_timer(host);
        if !was_settling {
            return;
        }
        let laid_out = match &mut self.phase {
            NavPhase::Settling { frames_left } => {
                *frames_left = frames_left.saturating_sub(1);
                *frames_left == 0
            },
            _ => false,
        };
        if laid_out {
            self.apply_settlement(host);
        }
    }

    // -------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------

    pub fn state(&self) -> &NavigationState {
        &self.state
    }

    pub fn current_path(&self) -> &str {
        &self.state.current_path
    }

    /// View to mount for the current path.
    pub fn current_view(&self) -> PageTag {
        resolve(&self.state.current_path)
    }

    pub fn is_navigating(&self) -> bool {
        self.state.is_navigating
    }

    pub fn last_action(&self) -> Option<NavAction> {
        self.state.last_action
    }

    pub fn phase(&self) -> &NavPhase {
        &self.phase
    }

    pub fn scroll_table(&self) -> &ScrollPositionTable {
        &self.scroll_positions
    }

    pub fn config(&self) -> &NavConfig {
        &self.config
    }

    /// Whether the viewport counts as a small/mobile device.
    pub fn is_mobile(&self, viewport: &Viewport) -> bool {
        viewport.inner_width <= self.config.mobile_breakpoint_px
            || self.mobile_ua.is_match(&viewport.user_agent)
    }

    // -------------------------------------------------------------------
    // Internals
    // -------------------------------------------------------------------

    fn commit_push(&mut self, host: &mut dyn Host, target: &str) {
        if let Err(e) = host.push_state(target) {
            log::warn!("push_state({target}) failed: {e}");
        }
        self.state.current_path = Location::parse(target).pathname;
        log::info!("Navigated to {target}");
        self.begin_settlement();
    }

    /// Pull the path from the host location. Returns whether it changed.
    fn apply_pop(&mut self, host: &dyn Host) -> bool {
        self.state.last_action = Some(NavAction::Pop);
        let pathname = host.location().pathname;
        let changed = pathname != self.state.current_path;
        if changed {
            log::info!("History moved to {pathname}");
        }
        self.state.current_path = pathname;
        changed
    }

    fn strip_home_hash(&mut self, host: &mut dyn Host) {
        let location = host.location();
        if location.is_home() && !location.hash.is_empty() {
            if let Err(e) = host.replace_state(&location.scroll_key()) {
                log::warn!("Could not strip {} from home URL: {e}", location.hash);
            }
        }
    }

    fn begin_settlement(&mut self) {
        self.phase = NavPhase::Settling {
            frames_left: self.config.settle_frames,
        };
    }

    fn apply_settlement(&mut self, host: &mut dyn Host) {
        let key = host.location().scroll_key();
        let (offset, grace_ms) = match self.state.last_action {
            Some(NavAction::Pop) => (self.scroll_positions.lookup(&key), self.config.pop_grace_ms),
            _ => (0, self.config.push_grace_ms),
        };
        self.state.last_action = None;

        match host.scroll_to(offset) {
            Ok(()) => {
                self.phase = NavPhase::Grace {
                    clear_at_ms: host.now_ms().saturating_add(grace_ms),
                };
            },
            Err(e) => {
                log::warn!("scroll_to({offset}) failed: {e}; assigning offset directly");
                if let Err(e) = host.set_scroll_top(offset) {
                    log::warn!("Direct scroll assignment failed: {e}");
                }
                self.state.is_navigating = false;
                self.phase = NavPhase::Idle;
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::headless::HeadlessTab;
    use crate::test_utils::FlakyHost;
    use ayur_types::host::Anchor;

    fn controller() -> NavigationController {
        NavigationController::new(NavConfig::default()).unwrap()
    }

    #[test]
    fn new_rejects_invalid_config() {
        let config = NavConfig {
            settle_frames: 0,
            ..NavConfig::default()
        };
        assert!(NavigationController::new(config).is_err());
    }

    #[test]
    fn initialize_subscribes_and_settles_at_top() {
        let mut tab = HeadlessTab::new("/shirodhara");
        let mut nav = controller();
        nav.initialize(&mut tab);

        assert!(nav.is_initialized());
        for kind in ListenerKind::ALL {
            assert!(tab.is_subscribed(kind));
        }
        assert_eq!(nav.current_path(), "/shirodhara");
        assert_eq!(nav.current_view(), PageTag::Shirodhara);
        assert_eq!(nav.last_action(), Some(NavAction::Pop));
        assert!(matches!(nav.phase(), NavPhase::Settling { frames_left: 2 }));

        tab.settle(&mut nav);
        assert!(nav.phase().is_idle());
        assert_eq!(nav.last_action(), None);
        assert_eq!(tab.scroll_offset(), 0);
    }

    #[test]
    fn initialize_twice_is_noop() {
        let mut tab = HeadlessTab::new("/");
        let mut nav = controller();
        nav.initialize(&mut tab);
        nav.initialize(&mut tab);
        assert_eq!(tab.subscription_count(), 3);
    }

    #[test]
    fn initial_home_hash_is_stripped() {
        let mut tab = HeadlessTab::new("/#treatments");
        let mut nav = controller();
        nav.initialize(&mut tab);
        assert_eq!(tab.location().href(), "/");
        assert_eq!(tab.history_len(), 1);
    }

    #[test]
    fn dispose_removes_every_subscription() {
        let mut tab = HeadlessTab::new("/");
        let mut nav = controller();
        nav.initialize(&mut tab);
        nav.dispose(&mut tab);

        assert_eq!(tab.subscription_count(), 0);
        assert!(!nav.is_initialized());
        assert!(nav.phase().is_idle());

        // Second dispose is harmless.
        nav.dispose(&mut tab);
        assert_eq!(tab.subscription_count(), 0);
    }

    #[test]
    fn dispose_mid_navigation_clears_overlay() {
        let mut tab = HeadlessTab::new("/");
        let mut nav = controller();
        nav.initialize(&mut tab);
        tab.settle(&mut nav);
        nav.navigate(&mut tab, "/nasyam");
        assert!(nav.is_navigating());

        nav.dispose(&mut tab);
        assert!(!nav.is_navigating());
        assert!(nav.next_deadline_ms().is_none());
    }

    #[test]
    fn events_before_initialize_are_ignored() {
        let mut tab = HeadlessTab::new("/");
        let link = tab.add_anchor(None, Anchor::with_href("/abhyanga"));
        let mut nav = controller();
        nav.handle_event(&mut tab, HostEvent::Click(ClickEvent::new(link)));
        assert!(nav.phase().is_idle());
        assert!(!nav.is_navigating());
    }

    #[test]
    fn click_on_nested_span_walks_up_to_anchor() {
        let mut tab = HeadlessTab::new("/");
        let mut nav = controller();
        nav.initialize(&mut tab);
        tab.settle(&mut nav);

        let link = tab.add_anchor(None, Anchor::with_href("/elakizhi"));
        let span = tab.add_node(Some(link));
        let mut click = ClickEvent::new(span);
        let d = nav.on_link_activated(&mut tab, &mut click);

        assert!(d.is_intercepted());
        assert!(click.default_prevented());
        assert!(matches!(nav.phase(), NavPhase::Pending { delay_ms: 50, .. }));
    }

    #[test]
    fn ignored_click_keeps_default_and_state() {
        let mut tab = HeadlessTab::new("/");
        let mut nav = controller();
        nav.initialize(&mut tab);
        tab.settle(&mut nav);

        let tel = tab.add_anchor(None, Anchor::with_href("tel:+1234567890"));
        let mut click = ClickEvent::new(tel);
        let d = nav.on_link_activated(&mut tab, &mut click);
        assert!(!d.is_intercepted());
        assert!(!click.default_prevented());
        assert!(nav.phase().is_idle());
        assert!(!nav.is_navigating());
    }

    #[test]
    fn push_records_offset_of_page_being_left() {
        let mut tab = HeadlessTab::new("/pizhichil?from=home");
        let mut nav = controller();
        nav.initialize(&mut tab);
        tab.settle(&mut nav);
        tab.user_scroll(640);

        nav.navigate(&mut tab, "/abhyanga");
        assert_eq!(nav.scroll_table().lookup("/pizhichil?from=home"), 640);
        assert_eq!(nav.last_action(), Some(NavAction::Push));
    }

    #[test]
    fn push_commit_strips_query_from_path() {
        let mut tab = HeadlessTab::new("/");
        let mut nav = controller();
        nav.initialize(&mut tab);
        tab.settle(&mut nav);

        nav.navigate(&mut tab, "/januvasti?session=2");
        tab.settle(&mut nav);
        assert_eq!(nav.current_path(), "/januvasti");
        assert_eq!(tab.location().search, "?session=2");
        assert_eq!(nav.current_view(), PageTag::Januvasti);
    }

    #[test]
    fn settlement_waits_two_frames_after_commit() {
        let mut tab = HeadlessTab::new("/");
        let mut nav = controller();
        nav.initialize(&mut tab);
        tab.settle(&mut nav);

        nav.navigate(&mut tab, "/kativasti");
        tab.advance(50);
        nav.on_frame(&mut tab);
        // Committed in this frame; layout frames start on the next one.
        assert_eq!(nav.current_path(), "/kativasti");
        assert!(matches!(nav.phase(), NavPhase::Settling { frames_left: 2 }));

        tab.advance(16);
        nav.on_frame(&mut tab);
        assert!(matches!(nav.phase(), NavPhase::Settling { frames_left: 1 }));

        tab.advance(16);
        nav.on_frame(&mut tab);
        assert!(matches!(nav.phase(), NavPhase::Grace { .. }));
        assert_eq!(nav.last_action(), None);
        assert!(nav.is_navigating());
    }

    #[test]
    fn push_grace_is_longer_than_pop_grace() {
        let mut tab = HeadlessTab::new("/");
        let mut nav = controller();
        nav.initialize(&mut tab);
        tab.settle(&mut nav);

        nav.navigate(&mut tab, "/nasyam");
        tab.advance(50);
        nav.on_timer(&mut tab);
        tab.advance(16);
        nav.on_frame(&mut tab);
        tab.advance(16);
        nav.on_frame(&mut tab);
        let push_deadline = nav.next_deadline_ms().unwrap() - tab.now_ms();
        assert_eq!(push_deadline, 150);

        tab.settle(&mut nav);
        let _ = tab.go_back();
        nav.on_pop_state(&mut tab);
        tab.advance(16);
        nav.on_frame(&mut tab);
        tab.advance(16);
        nav.on_frame(&mut tab);
        let pop_deadline = nav.next_deadline_ms().unwrap() - tab.now_ms();
        assert_eq!(pop_deadline, 100);
    }

    #[test]
    fn new_push_during_grace_keeps_overlay_until_its_own_settlement() {
        let mut tab = HeadlessTab::new("/");
        let mut nav = controller();
        nav.initialize(&mut tab);
        tab.settle(&mut nav);

        nav.navigate(&mut tab, "/pizhichil");
        tab.advance(50);
        nav.on_timer(&mut tab);
        tab.advance(16);
        nav.on_frame(&mut tab);
        tab.advance(16);
        nav.on_frame(&mut tab);
        assert!(matches!(nav.phase(), NavPhase::Grace { .. }));

        // Second click lands before the first grace period expires.
        nav.navigate(&mut tab, "/abhyanga");
        tab.advance(150);
        nav.on_timer(&mut tab);
        // The old grace deadline is gone; the overlay belongs to the new push.
        assert!(nav.is_navigating());
        assert!(matches!(nav.phase(), NavPhase::Settling { .. }));
        assert_eq!(nav.current_path(), "/abhyanga");

        tab.settle(&mut nav);
        assert!(!nav.is_navigating());
    }

    #[test]
    fn huge_delays_saturate_instead_of_overflowing() {
        let config = NavConfig {
            push_delay_ms: u64::MAX,
            ..NavConfig::default()
        };
        let mut tab = HeadlessTab::new("/");
        let mut nav = NavigationController::new(config).unwrap();
        nav.initialize(&mut tab);
        tab.settle(&mut nav);

        tab.advance(5);
        nav.navigate(&mut tab, "/abhyanga");
        assert_eq!(nav.next_deadline_ms(), Some(u64::MAX));
        tab.advance(1_000);
        nav.on_timer(&mut tab);
        assert_eq!(nav.current_path(), "/");
        assert!(matches!(nav.phase(), NavPhase::Pending { .. }));
    }

    #[test]
    fn huge_grace_saturates_instead_of_overflowing() {
        let config = NavConfig {
            push_grace_ms: u64::MAX,
            ..NavConfig::default()
        };
        let mut tab = HeadlessTab::new("/");
        let mut nav = NavigationController::new(config).unwrap();
        nav.initialize(&mut tab);
        tab.settle(&mut nav);

        nav.navigate(&mut tab, "/kativasti");
        tab.advance(50);
        nav.on_timer(&mut tab);
        tab.advance(16);
        nav.on_frame(&mut tab);
        tab.advance(16);
        nav.on_frame(&mut tab);
        assert_eq!(nav.phase(), &NavPhase::Grace { clear_at_ms: u64::MAX });
        assert!(nav.is_navigating());
    }

    #[test]
    fn pop_supersedes_pending_push() {
        let mut tab = HeadlessTab::new("/");
        let mut nav = controller();
        nav.initialize(&mut tab);
        tab.settle(&mut nav);
        nav.navigate(&mut tab, "/pizhichil");
        tab.settle(&mut nav);

        nav.navigate(&mut tab, "/abhyanga");
        let _ = tab.go_back();
        nav.on_pop_state(&mut tab);
        tab.settle(&mut nav);

        assert_eq!(nav.current_path(), "/");
        assert_eq!(tab.location().pathname, "/");
        assert!(!nav.is_navigating());
        assert_eq!(tab.history_len(), 2);
    }

    #[test]
    fn pop_without_path_change_does_not_settle() {
        let mut tab = HeadlessTab::new("/nasyam");
        let mut nav = controller();
        nav.initialize(&mut tab);
        tab.settle(&mut nav);

        let _ = tab.set_hash("#benefits");
        nav.on_hash_change(&mut tab);
        assert!(nav.phase().is_idle());
        assert_eq!(nav.last_action(), Some(NavAction::Pop));
        // Hash kept off the home path.
        assert_eq!(tab.location().hash, "#benefits");
    }

    #[test]
    fn mobile_detection_by_width_or_user_agent() {
        let nav = controller();
        let narrow = Viewport {
            inner_width: 768,
            ..Viewport::default()
        };
        let wide_phone = Viewport {
            inner_width: 1024,
            user_agent: "Mozilla/5.0 (Linux; Android 14; Pixel 8)".into(),
        };
        let desktop = Viewport {
            inner_width: 769,
            ..Viewport::default()
        };
        assert!(nav.is_mobile(&narrow));
        assert!(nav.is_mobile(&wide_phone));
        assert!(!nav.is_mobile(&desktop));
    }

    #[test]
    fn failed_scroll_falls_back_and_clears_overlay() {
        let mut host = FlakyHost::new(HeadlessTab::new("/"));
        let mut nav = controller();
        nav.initialize(&mut host);
        host.inner.settle(&mut nav);

        host.inner.user_scroll(300);
        host.fail_scroll_to = true;
        nav.navigate(&mut host, "/shirovasti");
        // Drive by hand so the flaky wrapper stays in the loop.
        host.inner.advance(50);
        nav.on_timer(&mut host);
        nav.on_frame(&mut host);
        nav.on_frame(&mut host);
        assert!(nav.phase().is_idle());

        assert!(!nav.is_navigating());
        assert_eq!(host.inner.scroll_offset(), 0);
        assert_eq!(host.fallback_assignments, 1);
    }

    #[test]
    fn failed_push_state_still_advances_path() {
        let mut host = FlakyHost::new(HeadlessTab::new("/"));
        let mut nav = controller();
        nav.initialize(&mut host);
        host.fail_push = true;

        nav.navigate(&mut host, "/netratarpana");
        host.inner.advance(50);
        nav.on_timer(&mut host);
        assert_eq!(nav.current_path(), "/netratarpana");
        assert_eq!(host.inner.location().pathname, "/");
    }

    #[test]
    fn failed_scroll_read_skips_record_but_navigates() {
        let mut host = FlakyHost::new(HeadlessTab::new("/"));
        let mut nav = controller();
        nav.initialize(&mut host);
        host.fail_scroll_y = true;

        nav.navigate(&mut host, "/abhyanga");
        assert!(nav.scroll_table().is_empty());
        assert!(nav.is_navigating());
        assert!(matches!(nav.phase(), NavPhase::Pending { .. }));
    }

    #[test]
    fn failed_subscribe_is_not_unsubscribed_later() {
        let mut host = FlakyHost::new(HeadlessTab::new("/"));
        host.fail_subscribe = true;
        let mut nav = controller();
        nav.initialize(&mut host);
        assert!(nav.is_initialized());
        assert_eq!(host.inner.subscription_count(), 0);

        nav.dispose(&mut host);
        assert_eq!(host.unsubscribe_calls, 0);
    }

    #[test]
    fn state_serializes_to_json() {
        let nav = controller();
        let json = serde_json::to_string(nav.state()).unwrap();
        assert_eq!(
            json,
            r#"{"current_path":"/","is_navigating":false,"last_action":null}"#
        );
    }
}
