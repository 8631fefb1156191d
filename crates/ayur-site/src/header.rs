//! Site header with the collapsible mobile menu.

use ayur_types::config::SiteConfig;

use crate::component::Component;
use crate::markup::Markup;

/// In-page sections linked from the header navigation.
const NAV_LINKS: [(&str, &str); 3] = [("#", "Home"), ("#about", "About us"), ("#services", "Services")];

#[derive(Debug, Clone)]
pub struct Header {
    clinic_name: String,
    phone: String,
    menu_open: bool,
}

impl Header {
    pub fn new(config: &SiteConfig) -> Self {
        Self {
            clinic_name: config.clinic_name.clone(),
            phone: config.contact_phone.clone(),
            menu_open: false,
        }
    }

    /// Menu button handler on small screens.
    pub fn toggle_menu(&mut self) {
        self.menu_open = !self.menu_open;
        log::debug!("Mobile menu {}", if self.menu_open { "opened" } else { "closed" });
    }

    pub fn menu_open(&self) -> bool {
        self.menu_open
    }

    pub fn close_menu(&mut self) {
        self.menu_open = false;
    }

    fn nav_links(out: &mut Markup, class: &str) {
        for (href, label) in NAV_LINKS {
            out.link(href, label, &[("class", class)]);
        }
    }
}

impl Component for Header {
    fn render(&self, out: &mut Markup) {
        let tel = format!("tel:{}", self.phone);
        out.open("header", &[("class", "site-header")]);
        out.link("/", &self.clinic_name, &[("class", "brand")]);

        out.open("nav", &[("class", "desktop-nav")]);
        Self::nav_links(out, "nav-link");
        out.close("nav");
        out.link(&tel, "Call us now", &[("class", "cta")]);

        let expanded = if self.menu_open { "true" } else { "false" };
        out.element(
            "button",
            &[("aria-expanded", expanded), ("aria-label", "Toggle menu")],
            if self.menu_open { "Close" } else { "Menu" },
        );
        if self.menu_open {
            out.open("div", &[("class", "mobile-panel")]);
            Self::nav_links(out, "mobile-link");
            out.close("div");
        }
        out.close("header");
    }
}
