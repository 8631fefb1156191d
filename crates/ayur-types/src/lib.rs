//! Foundation types for the clinic site.
//!
//! This crate contains the platform-agnostic pieces shared by every other
//! crate in the workspace: the [`host::Host`] trait that stands in for the
//! browser globals, host event types, configuration, and the error type.

pub mod config;
pub mod error;
pub mod host;
