//! ayur-site: the page collaborators the navigation core mounts.
//!
//! Every component writes into a [`Markup`] buffer, which collects the
//! HTML fragment and the anchors it contains. The [`Shell`] composes the
//! header, the view for the current [`PageTag`](ayur_router::PageTag), the
//! footer, and the loading overlay.

pub mod catalog;
pub mod component;
pub mod footer;
pub mod header;
pub mod home;
pub mod markup;
pub mod motion;
pub mod overlay;
pub mod shell;
pub mod treatment;

pub use catalog::{TREATMENTS, Treatment};
pub use component::Component;
pub use markup::Markup;
pub use motion::{BackToTop, StatCounter, Tween};
pub use shell::{RenderedPage, Shell};
