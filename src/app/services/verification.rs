//! # Human Verification Widget
//!
//! Seam for the third-party challenge rendered on the credential step.
//! When a widget is installed, a token must be present before credentials
//! are accepted.

use crate::app::events::Theme;
use anyhow::Result;

/// CSS selector of the container the widget renders into
pub const VERIFICATION_CONTAINER: &str = ".cf-turnstile";

pub trait HumanVerification: Send {
    /// (Re-)render the widget into `container` with the given theme
    fn render(&mut self, container: &str, site_key: &str, theme: Theme) -> Result<()>;

    /// Token of a solved challenge, if any
    fn response(&self) -> Option<String>;
}

/// Widget with a preset answer; used by the terminal front end and tests
#[derive(Debug, Default, Clone)]
pub struct StaticVerification {
    token: Option<String>,
    renders: Vec<Theme>,
}

impl StaticVerification {
    pub fn solved(token: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
            renders: Vec::new(),
        }
    }

    pub fn unsolved() -> Self {
        Self::default()
    }

    pub fn set_token(&mut self, token: Option<String>) {
        self.token = token;
    }

    /// Themes passed to each render, oldest first
    pub fn renders(&self) -> &[Theme] {
        &self.renders
    }
}

impl HumanVerification for StaticVerification {
    fn render(&mut self, container: &str, _site_key: &str, theme: Theme) -> Result<()> {
        tracing::debug!("verification widget rendered into {} ({})", container, theme);
        self.renders.push(theme);
        Ok(())
    }

    fn response(&self) -> Option<String> {
        self.token.clone().filter(|t| !t.is_empty())
    }
}
