//! Navigation core: turns a multi-page site into a single-page app.
//!
//! The [`NavigationController`] intercepts in-app link activation, commits
//! history entries, memoizes scroll offsets per URL and restores them on
//! back/forward, and drives the loading overlay flag. The [`resolve`]
//! function maps the current path to the [`PageTag`] the shell renders.
//! [`HeadlessTab`] is an in-memory [`Host`](ayur_types::host::Host) used by
//! the desktop driver and the tests.

pub mod headless;
pub mod history;
pub mod link;
pub mod nav;
pub mod phase;
pub mod resolve;
pub mod scroll;

#[cfg(test)]
pub(crate) mod test_utils;

// -----------------------------------------------------------------------
// Public re-exports
// -----------------------------------------------------------------------

pub use headless::{HeadlessTab, SettleReport};
pub use history::{HistoryEntry, SessionHistory};
pub use link::{IgnoreReason, LinkDisposition};
pub use nav::{NavAction, NavigationController, NavigationState};
pub use phase::NavPhase;
pub use resolve::{PageTag, resolve};
pub use scroll::ScrollPositionTable;
