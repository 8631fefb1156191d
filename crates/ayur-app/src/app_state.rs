use ayur_router::headless::DEFAULT_VIEWPORT_HEIGHT;
use ayur_router::{HeadlessTab, NavigationController, PageTag, SettleReport};
use ayur_site::Shell;
use ayur_types::config::AyurConfig;
use ayur_types::error::{Result, SiteError};
use ayur_types::host::{Host, HostEvent, NodeId};
use serde::Serialize;

use crate::scenario::Step;

/// What is currently mounted in the tab's document.
struct MountedPage {
    view: PageTag,
    overlay: bool,
    title: String,
    /// Anchor nodes by `href`, in document order.
    links: Vec<(String, NodeId)>,
}

impl MountedPage {
    fn node_for(&self, href: &str) -> Option<NodeId> {
        self.links
            .iter()
            .find(|(h, _)| h == href)
            .map(|(_, node)| *node)
    }
}

/// Outcome of one scenario step, printed as a JSON line.
#[derive(Debug, Clone, Serialize)]
pub struct StepSummary {
    pub step: usize,
    pub action: &'static str,
    pub location: String,
    pub view: PageTag,
    pub title: String,
    pub scroll_y: u32,
    pub overlay_seen: bool,
    pub frames: usize,
    pub elapsed_ms: u64,
    pub history_len: usize,
    pub saved_offsets: usize,
    pub menu_open: bool,
}

/// The tab, the controller, and the page shell for one visitor session.
pub struct AppState {
    pub tab: HeadlessTab,
    pub nav: NavigationController,
    pub shell: Shell,
    page: MountedPage,
}

/// Render the view for the controller's current path and load it into
/// the tab's document.
fn mount(tab: &mut HeadlessTab, shell: &Shell, nav: &NavigationController) -> MountedPage {
    let rendered = shell.render_page(nav.current_view(), nav.is_navigating());
    tab.clear_document();
    tab.set_content_height(rendered.content_height);

    let root = tab.add_node(None);
    let mut links = Vec::with_capacity(rendered.anchors.len());
    for anchor in rendered.anchors {
        let Some(href) = anchor.href.clone() else {
            continue;
        };
        let node = tab.add_anchor(Some(root), anchor);
        links.push((href, node));
    }

    MountedPage {
        view: rendered.view,
        overlay: nav.is_navigating(),
        title: rendered.title,
        links,
    }
}

impl AppState {
    pub fn new(config: AyurConfig, start: &str) -> Result<Self> {
        let mut tab = HeadlessTab::new(start);
        let mut nav = NavigationController::new(config.nav)?;
        let shell = Shell::new(config.site);

        nav.initialize(&mut tab);
        let page = mount(&mut tab, &shell, &nav);
        let mut app = Self {
            tab,
            nav,
            shell,
            page,
        };
        app.settle();
        log::info!("Opened {} ({})", app.tab.location().href(), app.page.title);
        Ok(app)
    }

    pub fn view(&self) -> PageTag {
        self.page.view
    }

    /// Apply one step and let the controller settle.
    pub fn run_step(&mut self, index: usize, step: &Step) -> Result<StepSummary> {
        log::debug!("Step {index}: {step:?}");
        let started_at = self.tab.now_ms();

        match step {
            Step::Click { href } => {
                let node = self.page.node_for(href).ok_or_else(|| {
                    SiteError::Scenario(format!(
                        "step {index}: no link to {href} on {}",
                        self.page.view.slug()
                    ))
                })?;
                self.tab.click(&mut self.nav, node);
            },
            Step::Back => {
                let event = self.tab.go_back();
                self.deliver_history(event, "back");
            },
            Step::Forward => {
                let event = self.tab.go_forward();
                self.deliver_history(event, "forward");
            },
            Step::Hash { fragment } => {
                let event = self.tab.set_hash(fragment);
                self.tab.dispatch(&mut self.nav, event);
            },
            Step::Scroll { offset } => {
                self.tab.user_scroll(*offset);
                self.notify_scroll();
            },
            Step::Wait { ms } => self.run_frames(*ms)?,
            Step::Resize { width } => self.tab.resize(*width),
            Step::UserAgent { value } => self.tab.set_user_agent(value),
            Step::Menu => self.shell.header_mut().toggle_menu(),
            Step::BackToTop => self.back_to_top()?,
        }

        let report = self.settle();
        self.remount_if_stale();

        Ok(StepSummary {
            step: index,
            action: step.name(),
            location: self.tab.location().href(),
            view: self.page.view,
            title: self.page.title.clone(),
            scroll_y: self.tab.scroll_offset(),
            overlay_seen: report.overlay_seen,
            frames: report.frames,
            elapsed_ms: self.tab.now_ms() - started_at,
            history_len: self.tab.history_len(),
            saved_offsets: self.nav.scroll_table().len(),
            menu_open: self.shell.header().menu_open(),
        })
    }

    /// Detach the controller from the tab.
    pub fn shutdown(&mut self) {
        self.nav.dispose(&mut self.tab);
    }

    // -------------------------------------------------------------------
    // Internals
    // -------------------------------------------------------------------

    fn settle(&mut self) -> SettleReport {
        let Self {
            tab,
            nav,
            shell,
            page,
        } = self;
        tab.settle_with(nav, |tab, nav| {
            if nav.current_view() != page.view || nav.is_navigating() != page.overlay {
                *page = mount(tab, shell, nav);
            }
        })
    }

    fn remount_if_stale(&mut self) {
        if self.nav.current_view() != self.page.view {
            self.page = mount(&mut self.tab, &self.shell, &self.nav);
        }
    }

    fn deliver_history(&mut self, event: Option<HostEvent>, direction: &str) {
        match event {
            Some(event) => {
                self.tab.dispatch(&mut self.nav, event);
            },
            None => log::warn!("Nothing to go {direction} to"),
        }
    }

    fn notify_scroll(&mut self) {
        if self.page.view == PageTag::Home {
            self.shell
                .home_mut()
                .on_scroll(self.tab.scroll_offset(), DEFAULT_VIEWPORT_HEIGHT);
        }
    }

    /// Deliver animation frames for `ms` of wall time, running the home
    /// page animations alongside the controller.
    fn run_frames(&mut self, ms: u64) -> Result<()> {
        let frame_ms = self.tab.frame_ms();
        for _ in 0..ms.div_ceil(frame_ms) {
            self.tab.advance(frame_ms);
            self.nav.on_frame(&mut self.tab);
            if self.page.view == PageTag::Home {
                let dt = u32::try_from(frame_ms).unwrap_or(u32::MAX);
                if let Some(y) = self.shell.home_mut().tick(dt) {
                    self.tab.scroll_to(y)?;
                }
            }
        }
        self.notify_scroll();
        Ok(())
    }

    fn back_to_top(&mut self) -> Result<()> {
        let home = self.shell.home_mut();
        if self.page.view != PageTag::Home || !home.back_to_top.is_visible() {
            log::warn!("Back-to-top button is not shown on {}", self.page.view.slug());
            return Ok(());
        }
        home.back_to_top.start(self.tab.scroll_offset());
        let duration = u64::from(self.shell.config().back_to_top_duration_ms);
        self.run_frames(duration)
    }
}
