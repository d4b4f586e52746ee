//! # Theme Manager
//!
//! Light/dark theme selection. The choice is persisted under a single
//! storage key; without one the local hour decides.

use super::storage::KeyValueStore;
use crate::app::events::Theme;
use anyhow::Result;
use chrono::Timelike;

/// The only key the app ever persists
pub const THEME_KEY: &str = "theme";

pub struct ThemeManager {
    store: Box<dyn KeyValueStore>,
    current: Theme,
}

impl ThemeManager {
    /// Load the saved theme, falling back to the time-of-day heuristic
    pub fn init(store: Box<dyn KeyValueStore>, local_hour: u32) -> Result<Self> {
        let saved = match store.get(THEME_KEY)? {
            Some(raw) => match raw.parse::<Theme>() {
                Ok(theme) => Some(theme),
                Err(e) => {
                    tracing::warn!("Ignoring stored theme: {}", e);
                    None
                }
            },
            None => None,
        };
        let current = saved.unwrap_or_else(|| Theme::from_hour(local_hour));
        tracing::debug!(
            "Theme initialised to {} (saved: {})",
            current,
            saved.is_some()
        );
        Ok(Self { store, current })
    }

    pub fn current(&self) -> Theme {
        self.current
    }

    /// Use `theme` for this session without touching storage
    pub fn override_session(&mut self, theme: Theme) {
        tracing::debug!("Theme overridden to {} for this session", theme);
        self.current = theme;
    }

    /// Flip and persist the theme
    pub fn toggle(&mut self) -> Result<Theme> {
        let next = self.current.toggled();
        self.store.set(THEME_KEY, next.as_str())?;
        self.current = next;
        tracing::info!("Theme switched to {}", next);
        Ok(next)
    }

    /// Class of the header toggle icon: a moon offers dark, a sun offers light
    pub fn icon_class(&self) -> &'static str {
        icon_class_for(self.current)
    }
}

pub fn icon_class_for(theme: Theme) -> &'static str {
    match theme {
        Theme::Light => "ri-moon-line text-xl",
        Theme::Dark => "ri-sun-line text-xl",
    }
}

pub fn local_hour() -> u32 {
    chrono::Local::now().hour()
}
