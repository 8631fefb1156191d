//! Page shell: header, current view, footer, overlay.

use ayur_router::PageTag;
use ayur_types::config::SiteConfig;
use ayur_types::host::Anchor;
use serde::Serialize;

use crate::catalog;
use crate::component::Component;
use crate::footer::Footer;
use crate::header::Header;
use crate::home::Home;
use crate::markup::Markup;
use crate::overlay::Overlay;
use crate::treatment::TreatmentPage;

/// Laid-out height of the home page, in pixels.
pub const HOME_HEIGHT_PX: u32 = 6400;

/// Laid-out height of a treatment page, in pixels.
pub const TREATMENT_HEIGHT_PX: u32 = 2400;

/// Output of one shell render.
#[derive(Debug, Clone, Serialize)]
pub struct RenderedPage {
    pub view: PageTag,
    pub title: String,
    pub html: String,
    /// Document height the host should scroll within.
    pub content_height: u32,
    #[serde(skip)]
    pub anchors: Vec<Anchor>,
}

/// Owns the shared collaborators and composes pages from them.
pub struct Shell {
    config: SiteConfig,
    header: Header,
    footer: Footer,
    home: Home,
}

impl Shell {
    pub fn new(config: SiteConfig) -> Self {
        Self {
            header: Header::new(&config),
            footer: Footer::new(&config),
            home: Home::new(&config),
            config,
        }
    }

    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    pub fn header(&self) -> &Header {
        &self.header
    }

    pub fn header_mut(&mut self) -> &mut Header {
        &mut self.header
    }

    pub fn home(&self) -> &Home {
        &self.home
    }

    pub fn home_mut(&mut self) -> &mut Home {
        &mut self.home
    }

    /// Document title for a view.
    pub fn title(&self, tag: PageTag) -> String {
        match catalog::treatment(tag) {
            Some(t) => format!("{} \u{2014} {} | {}", t.name, t.subtitle, self.config.clinic_name),
            None => self.config.clinic_name.clone(),
        }
    }

    /// Compose the full page for `tag`.
    pub fn render(&self, tag: PageTag, is_navigating: bool) -> String {
        self.render_page(tag, is_navigating).html
    }

    /// Compose the full page and collect its anchors.
    pub fn render_page(&self, tag: PageTag, is_navigating: bool) -> RenderedPage {
        let mut out = Markup::new();
        Overlay {
            visible: is_navigating,
        }
        .render(&mut out);
        self.header.render(&mut out);

        let content_height = match catalog::treatment(tag) {
            Some(t) => {
                TreatmentPage::new(t, &self.config).render(&mut out);
                TREATMENT_HEIGHT_PX
            },
            None => {
                self.home.render(&mut out);
                HOME_HEIGHT_PX
            },
        };

        self.footer.render(&mut out);
        log::debug!("Rendered {} ({} anchors)", tag.slug(), out.anchors().len());

        let (html, anchors) = out.into_parts();
        RenderedPage {
            view: tag,
            title: self.title(tag),
            html,
            content_height,
            anchors,
        }
    }
}
