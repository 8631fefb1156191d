//! Host environment abstraction.
//!
//! The navigation core never touches a real window, document, or history
//! object. Every environment maps its native APIs onto the [`Host`] trait
//! and delivers [`HostEvent`]s to the controller.

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// The parts of an address-bar URL the navigation core cares about.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    /// Path component, always starting with `/`.
    pub pathname: String,
    /// Query string including the leading `?`, or empty.
    pub search: String,
    /// Fragment including the leading `#`, or empty.
    pub hash: String,
}

impl Location {
    /// Parse an href into its path, query and fragment.
    ///
    /// Absolute URLs have their scheme and authority dropped. An empty
    /// path becomes `/`.
    pub fn parse(href: &str) -> Self {
        let rest = match origin_end(href) {
            Some(start) => {
                let after = &href[start..];
                after.find(['/', '?', '#']).map_or("", |idx| &after[idx..])
            },
            None => href,
        };

        let (before_hash, hash) = match rest.find('#') {
            Some(idx) => (&rest[..idx], &rest[idx..]),
            None => (rest, ""),
        };
        let (path, search) = match before_hash.find('?') {
            Some(idx) => (&before_hash[..idx], &before_hash[idx..]),
            None => (before_hash, ""),
        };

        let pathname = if path.is_empty() {
            "/".to_string()
        } else if path.starts_with('/') {
            path.to_string()
        } else {
            format!("/{path}")
        };

        Self {
            pathname,
            search: search.to_string(),
            hash: hash.to_string(),
        }
    }

    /// Whether `href` starts with a `scheme://` origin. A `://` inside
    /// the path, query or fragment of a relative href does not count.
    pub fn has_origin(href: &str) -> bool {
        origin_end(href).is_some()
    }

    /// Scroll-table key: path plus query, fragment excluded.
    pub fn scroll_key(&self) -> String {
        format!("{}{}", self.pathname, self.search)
    }

    /// Reassemble the full relative href.
    pub fn href(&self) -> String {
        format!("{}{}{}", self.pathname, self.search, self.hash)
    }

    /// Whether the path is one of the two home aliases.
    pub fn is_home(&self) -> bool {
        self.pathname == "/" || self.pathname == "/index.html"
    }
}

/// Byte offset just past the `scheme://` prefix, if `href` has one.
fn origin_end(href: &str) -> Option<usize> {
    let idx = href.find("://")?;
    let mut scheme = href[..idx].chars();
    let valid = scheme.next().is_some_and(|c| c.is_ascii_alphabetic())
        && scheme.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'));
    valid.then_some(idx + 3)
}

/// Viewport facts used for the mobile heuristic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    /// Inner width in logical pixels.
    pub inner_width: u32,
    /// Navigator user-agent string.
    pub user_agent: String,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            inner_width: 1280,
            user_agent: "Mozilla/5.0 (X11; Linux x86_64)".to_string(),
        }
    }
}

/// Opaque handle to a node in the host document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeId(pub usize);

/// Attributes of the nearest `<a>` element around a click target.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Anchor {
    /// Raw `href` attribute, if present.
    pub href: Option<String>,
    /// Raw `target` attribute, if present.
    pub target: Option<String>,
}

impl Anchor {
    pub fn with_href(href: &str) -> Self {
        Self {
            href: Some(href.to_string()),
            target: None,
        }
    }

    /// Whether the anchor opens in the current browsing context.
    pub fn targets_self(&self) -> bool {
        match self.target.as_deref() {
            None | Some("") | Some("_self") => true,
            Some(_) => false,
        }
    }
}

/// A UI activation (click or tap) on some node of the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClickEvent {
    /// Node the pointer landed on.
    pub target: NodeId,
    default_prevented: bool,
}

impl ClickEvent {
    pub fn new(target: NodeId) -> Self {
        Self {
            target,
            default_prevented: false,
        }
    }

    /// Suppress the host's default navigation for this click.
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }
}

/// Events a host delivers to the navigation controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostEvent {
    /// Capturing click observed at the document root.
    Click(ClickEvent),
    /// History moved back or forward.
    PopState,
    /// Only the fragment of the location changed.
    HashChange,
}

/// Notification kinds the controller subscribes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ListenerKind {
    /// Click observer on the document root, capture phase.
    Click,
    PopState,
    HashChange,
}

impl ListenerKind {
    pub const ALL: [ListenerKind; 3] = [Self::PopState, Self::HashChange, Self::Click];

    /// Which listener a given event is delivered through.
    pub fn of(event: &HostEvent) -> Self {
        match event {
            HostEvent::Click(_) => Self::Click,
            HostEvent::PopState => Self::PopState,
            HostEvent::HashChange => Self::HashChange,
        }
    }
}

/// Browser-like environment the navigation controller runs against.
///
/// Fallible methods mirror DOM calls that can throw; callers in the
/// navigation core treat every error as recoverable.
pub trait Host {
    /// Current address-bar location.
    fn location(&self) -> Location;

    /// Append a history entry and make it current.
    fn push_state(&mut self, url: &str) -> Result<()>;

    /// Rewrite the current history entry in place.
    fn replace_state(&mut self, url: &str) -> Result<()>;

    /// Current vertical scroll offset of the document.
    fn scroll_y(&self) -> Result<u32>;

    /// Jump the viewport to an absolute vertical offset.
    fn scroll_to(&mut self, y: u32) -> Result<()>;

    /// Assign the document scroll offset directly (fallback path).
    fn set_scroll_top(&mut self, y: u32) -> Result<()>;

    /// Viewport dimensions and user agent.
    fn viewport(&self) -> Viewport;

    /// Monotonic clock in milliseconds.
    fn now_ms(&self) -> u64;

    /// Nearest anchor element at or above `node`, if any.
    fn closest_anchor(&self, node: NodeId) -> Option<Anchor>;

    /// Start delivering events of `kind` to the controller.
    fn subscribe(&mut self, kind: ListenerKind) -> Result<()>;

    /// Stop delivering events of `kind`.
    fn unsubscribe(&mut self, kind: ListenerKind) -> Result<()>;
}
