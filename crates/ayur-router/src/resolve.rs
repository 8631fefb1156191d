//! Path to page-view resolution.

use serde::{Deserialize, Serialize};

/// One of the fixed set of page views the shell can mount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageTag {
    Home,
    Pizhichil,
    Abhyanga,
    Shirodhara,
    Elakizhi,
    Njavarakizhi,
    Netratarpana,
    Nasyam,
    Kativasti,
    Shirovasti,
    Januvasti,
}

/// Treatment prefixes in match order. First match wins.
pub const TREATMENT_ROUTES: [(&str, PageTag); 10] = [
    ("/pizhichil", PageTag::Pizhichil),
    ("/abhyanga", PageTag::Abhyanga),
    ("/shirodhara", PageTag::Shirodhara),
    ("/elakizhi", PageTag::Elakizhi),
    ("/njavarakizhi", PageTag::Njavarakizhi),
    ("/netratarpana", PageTag::Netratarpana),
    ("/nasyam", PageTag::Nasyam),
    ("/kativasti", PageTag::Kativasti),
    ("/shirovasti", PageTag::Shirovasti),
    ("/januvasti", PageTag::Januvasti),
];

impl PageTag {
    pub const ALL: [PageTag; 11] = [
        PageTag::Home,
        PageTag::Pizhichil,
        PageTag::Abhyanga,
        PageTag::Shirodhara,
        PageTag::Elakizhi,
        PageTag::Njavarakizhi,
        PageTag::Netratarpana,
        PageTag::Nasyam,
        PageTag::Kativasti,
        PageTag::Shirovasti,
        PageTag::Januvasti,
    ];

    /// Canonical route for this view.
    pub fn route(self) -> &'static str {
        TREATMENT_ROUTES
            .iter()
            .find(|(_, tag)| *tag == self)
            .map_or("/", |(prefix, _)| *prefix)
    }

    /// Stable lowercase identifier.
    pub fn slug(self) -> &'static str {
        match self {
            PageTag::Home => "home",
            other => &other.route()[1..],
        }
    }

    pub fn is_treatment(self) -> bool {
        self != PageTag::Home
    }
}

/// Map a path (query already stripped) to the view to mount.
///
/// Total: anything unrecognised renders Home.
pub fn resolve(path: &str) -> PageTag {
    if path == "/" || path == "/index.html" {
        return PageTag::Home;
    }
    TREATMENT_ROUTES
        .iter()
        .find(|(prefix, _)| path.starts_with(prefix))
        .map_or(PageTag::Home, |(_, tag)| *tag)
}
