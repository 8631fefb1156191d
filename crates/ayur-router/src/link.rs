//! Classification of link activations.

use ayur_types::host::Anchor;

/// Why a click was left to the host's default behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    /// The click did not land inside an anchor.
    NoAnchor,
    /// The anchor opens another browsing context (e.g. `_blank`).
    ForeignTarget,
    /// The anchor has no usable `href`.
    MissingHref,
    /// `#fragment` link within the current page.
    InPageAnchor,
    /// `tel:` or `mailto:` link.
    ContactScheme,
    /// Absolute or otherwise non-rooted URL.
    External,
}

/// Outcome of inspecting a click.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkDisposition {
    Ignored(IgnoreReason),
    /// In-app link; default navigation suppressed and a push started.
    Intercepted { href: String },
}

impl LinkDisposition {
    pub fn is_intercepted(&self) -> bool {
        matches!(self, LinkDisposition::Intercepted { .. })
    }
}

/// Decide whether an anchor is an in-app navigation. First rule that
/// matches wins.
pub fn classify(anchor: Option<&Anchor>) -> LinkDisposition {
    let Some(anchor) = anchor else {
        return LinkDisposition::Ignored(IgnoreReason::NoAnchor);
    };
    if !anchor.targets_self() {
        return LinkDisposition::Ignored(IgnoreReason::ForeignTarget);
    }
    let href = match anchor.href.as_deref() {
        Some(href) if !href.is_empty() => href,
        _ => return LinkDisposition::Ignored(IgnoreReason::MissingHref),
    };
    if href.starts_with('#') {
        return LinkDisposition::Ignored(IgnoreReason::InPageAnchor);
    }
    if href.starts_with("tel:") || href.starts_with("mailto:") {
        return LinkDisposition::Ignored(IgnoreReason::ContactScheme);
    }
    if href.starts_with('/') {
        return LinkDisposition::Intercepted {
            href: href.to_string(),
        };
    }
    LinkDisposition::Ignored(IgnoreReason::External)
}
