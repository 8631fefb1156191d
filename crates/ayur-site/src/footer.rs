//! Site footer: quick links, opening hours, contact details, legal links.

use ayur_types::config::SiteConfig;

use crate::component::Component;
use crate::markup::Markup;

const QUICK_LINKS: [(&str, &str); 4] = [
    ("#", "Home"),
    ("#treatments", "Treatments"),
    ("#how-it-works", "How It Works"),
    ("#contact", "Contact"),
];

const OPENING_HOURS: [(&str, &str); 3] = [
    ("Mon - Fri", "9:00 AM - 6:00 PM"),
    ("Saturday", "10:00 AM - 4:00 PM"),
    ("Sunday", "Closed"),
];

const LEGAL_LINKS: [(&str, &str); 3] = [
    ("/terms", "Terms of Use"),
    ("/privacy", "Privacy Policy"),
    ("/cookies", "Cookie Policy"),
];

#[derive(Debug, Clone)]
pub struct Footer {
    clinic_name: String,
    phone: String,
    email: String,
}

impl Footer {
    pub fn new(config: &SiteConfig) -> Self {
        Self {
            clinic_name: config.clinic_name.clone(),
            phone: config.contact_phone.clone(),
            email: config.contact_email.clone(),
        }
    }
}

impl Component for Footer {
    fn render(&self, out: &mut Markup) {
        out.open("footer", &[("id", "contact"), ("class", "site-footer")]);

        out.open("section", &[("class", "about")]);
        out.element("h4", &[], &self.clinic_name);
        out.element(
            "p",
            &[],
            "Traditional healing and natural therapies to restore balance and vitality.",
        );
        for network in ["Facebook", "Twitter", "Instagram"] {
            out.link("#", network, &[("aria-label", network)]);
        }
        out.close("section");

        out.open("section", &[("class", "quick-links")]);
        out.element("h4", &[], "Quick Links");
        for (href, label) in QUICK_LINKS {
            out.link(href, label, &[]);
        }
        out.close("section");

        out.open("section", &[("class", "hours")]);
        out.element("h4", &[], "Opening Hours");
        for (days, hours) in OPENING_HOURS {
            out.element("div", &[("class", "hours-row")], &format!("{days}: {hours}"));
        }
        out.link("#book", "Book Appointment", &[("class", "cta")]);
        out.close("section");

        out.open("section", &[("class", "touch")]);
        out.element("h4", &[], "Get in touch");
        out.link(&format!("tel:{}", self.phone), &self.phone, &[]);
        out.link(&format!("mailto:{}", self.email), &self.email, &[]);
        out.close("section");

        out.open("div", &[("class", "legal")]);
        out.element("span", &[], &format!("\u{a9} {}. All rights reserved.", self.clinic_name));
        for (href, label) in LEGAL_LINKS {
            out.link(href, label, &[]);
        }
        out.close("div");

        out.close("footer");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn footer_carries_every_link_kind() {
        let mut m = Markup::new();
        Footer::new(&SiteConfig::default()).render(&mut m);
        let hrefs: Vec<_> = m.anchors().iter().filter_map(|a| a.href.as_deref()).collect();

        assert!(hrefs.contains(&"#contact"));
        assert!(hrefs.contains(&"tel:+1234567890"));
        assert!(hrefs.contains(&"mailto:info@ayurveda.example"));
        assert!(hrefs.contains(&"/privacy"));
        assert_eq!(hrefs.len(), 3 + 4 + 1 + 2 + 3);
    }

    #[test]
    fn footer_is_the_contact_target() {
        let html = Footer::new(&SiteConfig::default()).to_html();
        assert!(html.starts_with(r#"<footer id="contact""#));
        assert!(html.contains("Sunday: Closed"));
    }
}
