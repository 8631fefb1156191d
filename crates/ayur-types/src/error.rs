//! Error types for the clinic site.

use std::io;

/// Errors produced by the site crates.
#[derive(Debug, thiserror::Error)]
pub enum SiteError {
    #[error("host error: {0}")]
    Host(String),

    #[error("history error: {0}")]
    History(String),

    #[error("scroll error: {0}")]
    Scroll(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("scenario error: {0}")]
    Scenario(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("pattern error: {0}")]
    Pattern(#[from] regex::Error),
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, SiteError>;
