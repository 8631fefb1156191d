//! Site configuration loaded from TOML.
//!
//! Every field has a default matching the production site, so an empty
//! file (or no file at all) yields a working configuration.

use std::path::Path;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SiteError};

/// Timing and heuristics for the navigation controller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavConfig {
    /// Viewports at most this wide (logical px) count as mobile.
    pub mobile_breakpoint_px: u32,
    /// User-agent pattern that marks a device as mobile.
    pub mobile_ua_pattern: String,
    /// Delay before a regular push is committed, so click feedback can render.
    pub push_delay_ms: u64,
    /// Delay before a fast-path back push is committed.
    pub fast_path_delay_ms: u64,
    /// Animation frames to wait before touching the scroll offset.
    pub settle_frames: u8,
    /// Overlay grace period after a pop restore.
    pub pop_grace_ms: u64,
    /// Overlay grace period after a push (scroll to top).
    pub push_grace_ms: u64,
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            mobile_breakpoint_px: 768,
            mobile_ua_pattern: "(?i)Mobi|Android".to_string(),
            push_delay_ms: 50,
            fast_path_delay_ms: 0,
            settle_frames: 2,
            pop_grace_ms: 100,
            push_grace_ms: 150,
        }
    }
}

impl NavConfig {
    /// Compile the mobile user-agent pattern.
    pub fn mobile_ua_regex(&self) -> Result<Regex> {
        Ok(Regex::new(&self.mobile_ua_pattern)?)
    }

    /// Reject configurations the controller cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.mobile_breakpoint_px == 0 {
            return Err(SiteError::Config(
                "mobile_breakpoint_px must be positive".into(),
            ));
        }
        if self.settle_frames == 0 {
            return Err(SiteError::Config(
                "settle_frames must be at least 1".into(),
            ));
        }
        self.mobile_ua_regex()?;
        Ok(())
    }
}

/// Presentation settings for the page collaborators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Clinic name shown in the header and footer.
    pub clinic_name: String,
    /// Phone number used for `tel:` booking links.
    pub contact_phone: String,
    /// Address used for `mailto:` links.
    pub contact_email: String,
    /// Scroll offset past which the back-to-top button appears.
    pub back_to_top_threshold_px: u32,
    /// Duration of the animated scroll back to the top.
    pub back_to_top_duration_ms: u32,
    /// Duration of the home page stat counter animation.
    pub counter_duration_ms: u32,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            clinic_name: "Ayurveda Wellness".to_string(),
            contact_phone: "+1234567890".to_string(),
            contact_email: "info@ayurveda.example".to_string(),
            back_to_top_threshold_px: 320,
            back_to_top_duration_ms: 500,
            counter_duration_ms: 1500,
        }
    }
}

/// Top-level configuration file (`ayur.toml`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AyurConfig {
    pub nav: NavConfig,
    pub site: SiteConfig,
}

impl AyurConfig {
    /// Parse and validate a configuration from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)?;
        config.nav.validate()?;
        Ok(config)
    }

    /// Load and validate a configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&text)?;
        log::debug!("Loaded config from {}", path.display());
        Ok(config)
    }
}
