//! Treatment detail page view.

use ayur_types::config::SiteConfig;

use crate::catalog::Treatment;
use crate::component::Component;
use crate::markup::Markup;

/// Detail page for one catalog entry.
#[derive(Debug, Clone)]
pub struct TreatmentPage {
    pub treatment: &'static Treatment,
    phone: String,
}

impl TreatmentPage {
    pub fn new(treatment: &'static Treatment, config: &SiteConfig) -> Self {
        Self {
            treatment,
            phone: config.contact_phone.clone(),
        }
    }
}

impl Component for TreatmentPage {
    fn render(&self, out: &mut Markup) {
        let t = self.treatment;
        out.open("main", &[("class", "treatment"), ("data-slug", t.tag.slug())]);

        out.open("nav", &[("aria-label", "Breadcrumb")]);
        out.link("/", "Home", &[]);
        out.link("/#treatments", "Treatments", &[]);
        out.element("span", &[("aria-current", "page")], t.name);
        out.close("nav");

        out.open("h1", &[]);
        out.element("span", &[("class", "name")], t.name);
        out.element("span", &[("class", "subtitle")], &format!(" \u{2014} {}", t.subtitle));
        out.close("h1");
        out.element(
            "div",
            &[("class", "duration")],
            &format!("Duration: {} mins", t.duration_mins),
        );

        out.open("section", &[("class", "book")]);
        out.link(&format!("tel:{}", self.phone), "Book a Session", &[("class", "cta")]);
        out.link("#contact", "Have questions? Contact us", &[]);
        out.close("section");

        out.close("main");
    }
}
