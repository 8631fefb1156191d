//! Full-screen loading overlay shown while a navigation is in flight.

use crate::component::Component;
use crate::markup::Markup;

/// The loading overlay. Renders nothing unless `visible`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Overlay {
    pub visible: bool,
}

impl Component for Overlay {
    fn render(&self, out: &mut Markup) {
        if !self.visible {
            return;
        }
        out.open(
            "div",
            &[
                ("class", "loading-overlay"),
                ("role", "status"),
                ("aria-label", "Loading"),
            ],
        );
        out.element("div", &[("class", "spinner")], "");
        out.close("div");
    }
}
