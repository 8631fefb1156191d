//! Home page view.

use ayur_types::config::SiteConfig;

use crate::catalog::TREATMENTS;
use crate::component::Component;
use crate::markup::Markup;
use crate::motion::{BackToTop, StatCounter, home_stats};

/// Offset of the stats row from the top of the home page.
pub const STATS_TOP_PX: u32 = 1200;

/// The home page, with its animated stats row and back-to-top button.
#[derive(Debug, Clone)]
pub struct Home {
    pub stats: [StatCounter; 3],
    pub back_to_top: BackToTop,
}

impl Home {
    pub fn new(config: &SiteConfig) -> Self {
        Self {
            stats: home_stats(config),
            back_to_top: BackToTop::from_config(config),
        }
    }

    /// Scroll listener: back-to-top visibility, and the counters start the
    /// first time the stats row comes into view.
    pub fn on_scroll(&mut self, scroll_y: u32, viewport_height: u32) {
        self.back_to_top.on_scroll(scroll_y);
        if scroll_y + viewport_height >= STATS_TOP_PX && !self.stats[0].is_started() {
            self.start_counters();
        }
    }

    /// The stats row entered the viewport.
    pub fn start_counters(&mut self) {
        for s in &mut self.stats {
            s.start();
        }
    }

    /// Advance the home page animations by one frame. Returns the scroll
    /// offset the back-to-top animation wants applied, if it is running.
    pub fn tick(&mut self, dt_ms: u32) -> Option<u32> {
        for s in &mut self.stats {
            s.tick(dt_ms);
        }
        self.back_to_top.tick(dt_ms)
    }

    fn render_hero(out: &mut Markup) {
        out.open("section", &[("class", "hero")]);
        out.element("h1", &[], "Ancient Wisdom for Modern Wellness");
        out.link("#services", "Explore Our Services", &[("class", "cta")]);
        out.close("section");
    }

    fn render_stats(&self, out: &mut Markup) {
        out.open("section", &[("id", "who-we-are"), ("class", "stats")]);
        out.element("h2", &[], "Who We Are");
        out.link("#who-we-are", "More About Us", &[]);
        for s in &self.stats {
            out.open("div", &[("class", "stat")]);
            out.element("strong", &[], &s.display());
            out.element("span", &[], s.label);
            out.close("div");
        }
        out.close("section");
    }

    fn render_treatments(out: &mut Markup) {
        out.open("section", &[("id", "treatments"), ("class", "treatments")]);
        out.element("h2", &[], "Our Treatments");
        for t in &TREATMENTS {
            let image = format!("/images/{}", t.image);
            let aria = format!("Read more about {}", t.name);
            out.open("article", &[("class", "treatment-card")]);
            out.void("img", &[("src", &image), ("alt", t.name)]);
            out.element("h3", &[], &format!("{} \u{2014} {}", t.name, t.subtitle));
            out.link(t.href(), "Read more", &[("aria-label", &aria)]);
            out.close("article");
        }
        out.close("section");
    }

    fn render_call_to_action(out: &mut Markup) {
        out.open("section", &[("id", "services"), ("class", "cta-band")]);
        out.link("#treatments", "View Treatments", &[("class", "cta")]);
        out.link("#consultation", "Book Consultation", &[("class", "cta-secondary")]);
        out.close("section");
    }
}

impl Component for Home {
    fn render(&self, out: &mut Markup) {
        out.open("main", &[("class", "home")]);
        Self::render_hero(out);
        self.render_stats(out);
        Self::render_treatments(out);
        Self::render_call_to_action(out);
        if self.back_to_top.is_visible() {
            out.element(
                "button",
                &[("class", "back-to-top"), ("title", "Back to top")],
                "Top",
            );
        }
        out.close("main");
    }
}
