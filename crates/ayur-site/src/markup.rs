//! HTML fragment buffer.
//!
//! Components write elements through [`Markup`]; every `<a>` written with
//! [`Markup::link`] is also recorded as an [`Anchor`], so the rendered page
//! can be mounted into a host document for click routing.

use ayur_types::host::Anchor;

/// Escape text for use in element content or a quoted attribute value.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Accumulates an HTML fragment and the anchors written into it.
#[derive(Debug, Clone, Default)]
pub struct Markup {
    html: String,
    anchors: Vec<Anchor>,
    depth: usize,
}

impl Markup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Write an opening tag.
    pub fn open(&mut self, tag: &str, attrs: &[(&str, &str)]) -> &mut Self {
        self.start_tag(tag, attrs);
        self.depth += 1;
        self
    }

    /// Write a closing tag.
    pub fn close(&mut self, tag: &str) -> &mut Self {
        self.depth = self.depth.saturating_sub(1);
        self.html.push_str("</");
        self.html.push_str(tag);
        self.html.push('>');
        self
    }

    /// Write escaped text content.
    pub fn text(&mut self, text: &str) -> &mut Self {
        self.html.push_str(&escape(text));
        self
    }

    /// Write `<tag attrs>text</tag>`.
    pub fn element(&mut self, tag: &str, attrs: &[(&str, &str)], text: &str) -> &mut Self {
        self.start_tag(tag, attrs);
        self.text(text);
        self.close_inline(tag);
        self
    }

    /// Write a self-closing void element such as `<img>`.
    pub fn void(&mut self, tag: &str, attrs: &[(&str, &str)]) -> &mut Self {
        self.start_tag(tag, attrs);
        self
    }

    /// Write an `<a>` and record it.
    pub fn link(&mut self, href: &str, label: &str, attrs: &[(&str, &str)]) -> &mut Self {
        self.anchor(Anchor::with_href(href), label, attrs)
    }

    /// Write an `<a>` with an explicit `target` and record it.
    pub fn link_to_target(&mut self, href: &str, target: &str, label: &str) -> &mut Self {
        let anchor = Anchor {
            href: Some(href.to_string()),
            target: Some(target.to_string()),
        };
        self.anchor(anchor, label, &[("rel", "noopener")])
    }

    fn anchor(&mut self, anchor: Anchor, label: &str, attrs: &[(&str, &str)]) -> &mut Self {
        let mut all: Vec<(&str, &str)> = Vec::with_capacity(attrs.len() + 2);
        if let Some(href) = anchor.href.as_deref() {
            all.push(("href", href));
        }
        if let Some(target) = anchor.target.as_deref() {
            all.push(("target", target));
        }
        all.extend_from_slice(attrs);
        self.start_tag("a", &all);
        self.text(label);
        self.close_inline("a");
        self.anchors.push(anchor);
        self
    }

    fn start_tag(&mut self, tag: &str, attrs: &[(&str, &str)]) {
        self.html.push('<');
        self.html.push_str(tag);
        for (name, value) in attrs {
            self.html.push(' ');
            self.html.push_str(name);
            self.html.push_str("=\"");
            self.html.push_str(&escape(value));
            self.html.push('"');
        }
        self.html.push('>');
    }

    fn close_inline(&mut self, tag: &str) {
        self.html.push_str("</");
        self.html.push_str(tag);
        self.html.push('>');
    }

    pub fn html(&self) -> &str {
        &self.html
    }

    /// Anchors in document order.
    pub fn anchors(&self) -> &[Anchor] {
        &self.anchors
    }

    /// Number of elements opened with [`open`](Self::open) and not yet closed.
    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn into_parts(self) -> (String, Vec<Anchor>) {
        (self.html, self.anchors)
    }
}
