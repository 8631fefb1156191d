//! Visitor scenarios: a start URL and a list of steps, loaded from TOML.
//!
//! ```toml
//! start = "/"
//!
//! [[steps]]
//! action = "click"
//! href = "/pizhichil"
//!
//! [[steps]]
//! action = "back"
//! ```

use std::path::Path;

use ayur_types::error::{Result, SiteError};
use serde::{Deserialize, Serialize};

/// One visitor action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Step {
    /// Click the first link on the current page with this `href`.
    Click { href: String },
    Back,
    Forward,
    /// Follow an in-page anchor (`#section`).
    Hash { fragment: String },
    /// Scroll the document to an absolute offset.
    Scroll { offset: u32 },
    /// Let time pass.
    Wait { ms: u64 },
    /// Change the viewport width.
    Resize { width: u32 },
    UserAgent { value: String },
    /// Press the mobile menu button.
    Menu,
    /// Press the back-to-top button.
    BackToTop,
}

impl Step {
    /// Short name for logs and summaries.
    pub fn name(&self) -> &'static str {
        match self {
            Step::Click { .. } => "click",
            Step::Back => "back",
            Step::Forward => "forward",
            Step::Hash { .. } => "hash",
            Step::Scroll { .. } => "scroll",
            Step::Wait { .. } => "wait",
            Step::Resize { .. } => "resize",
            Step::UserAgent { .. } => "user_agent",
            Step::Menu => "menu",
            Step::BackToTop => "back_to_top",
        }
    }
}

fn default_start() -> String {
    "/".to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    /// URL the tab opens at.
    #[serde(default = "default_start")]
    pub start: String,
    #[serde(default)]
    pub steps: Vec<Step>,
}

impl Scenario {
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let scenario: Self = toml::from_str(text)?;
        scenario.validate()?;
        Ok(scenario)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let scenario = Self::from_toml_str(&text)?;
        log::info!(
            "Loaded scenario {} ({} steps)",
            path.display(),
            scenario.steps.len()
        );
        Ok(scenario)
    }

    fn validate(&self) -> Result<()> {
        if !self.start.starts_with('/') {
            return Err(SiteError::Scenario(format!(
                "start URL {:?} must be a site path",
                self.start
            )));
        }
        for (i, step) in self.steps.iter().enumerate() {
            match step {
                Step::Click { href } if href.is_empty() => {
                    return Err(SiteError::Scenario(format!("step {i}: click needs an href")));
                },
                Step::Resize { width: 0 } => {
                    return Err(SiteError::Scenario(format!("step {i}: width must be > 0")));
                },
                _ => {},
            }
        }
        Ok(())
    }

    /// Built-in walk through the site: home, two treatments, back and
    /// forward, a fragment on home, then a revisit on a phone-sized window.
    pub fn tour() -> Self {
        let click = |href: &str| Step::Click {
            href: href.to_string(),
        };
        Self {
            start: default_start(),
            steps: vec![
                Step::Scroll { offset: 1800 },
                Step::BackToTop,
                Step::Scroll { offset: 1800 },
                click("/pizhichil"),
                Step::Scroll { offset: 400 },
                click("/#treatments"),
                click("/abhyanga"),
                Step::Back,
                Step::Back,
                Step::Forward,
                Step::Hash {
                    fragment: "#contact".to_string(),
                },
                Step::Resize { width: 390 },
                click("/nasyam"),
                click("/"),
                Step::Menu,
                Step::Wait { ms: 500 },
            ],
        }
    }
}
