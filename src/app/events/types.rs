//! # Core Event Types
//!
//! Common types used throughout the event system including route names,
//! transition kinds, themes, auth steps and notification kinds.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Named view selected by the router
///
/// Route names are not validated on push. Anything outside the known set
/// becomes [`RouteName::Unknown`], which renders as an empty view.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RouteName {
    Home,
    Category,
    Galgame,
    Profile,
    Detail,
    Unknown(String),
}

impl RouteName {
    pub fn as_str(&self) -> &str {
        match self {
            RouteName::Home => "home",
            RouteName::Category => "category",
            RouteName::Galgame => "galgame",
            RouteName::Profile => "profile",
            RouteName::Detail => "detail",
            RouteName::Unknown(name) => name,
        }
    }

    /// Position in the navigation bar. Only the four bar routes are ordered.
    pub fn page_order(&self) -> Option<u8> {
        match self {
            RouteName::Home => Some(0),
            RouteName::Category => Some(1),
            RouteName::Galgame => Some(2),
            RouteName::Profile => Some(3),
            RouteName::Detail | RouteName::Unknown(_) => None,
        }
    }
}

impl From<&str> for RouteName {
    fn from(name: &str) -> Self {
        match name {
            "home" => RouteName::Home,
            "category" => RouteName::Category,
            "galgame" => RouteName::Galgame,
            "profile" => RouteName::Profile,
            "detail" => RouteName::Detail,
            other => RouteName::Unknown(other.to_string()),
        }
    }
}

impl From<String> for RouteName {
    fn from(name: String) -> Self {
        RouteName::from(name.as_str())
    }
}

impl fmt::Display for RouteName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Direction of a slide between two navigation-bar pages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlideDirection {
    /// Moving right along the bar; incoming enters from the trailing edge
    Forward,
    /// Moving left along the bar
    Backward,
}

/// How the main container swaps to a new view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionKind {
    Fade,
    Slide(SlideDirection),
}

impl TransitionKind {
    /// Animation class attached to the incoming view
    pub fn entrance_class(&self) -> &'static str {
        match self {
            TransitionKind::Fade => "animate-fade-in",
            TransitionKind::Slide(SlideDirection::Forward) => "animate-slide-in-right",
            TransitionKind::Slide(SlideDirection::Backward) => "animate-slide-in-left",
        }
    }

    /// Animation class attached to the outgoing pane, if it animates at all
    pub fn exit_class(&self) -> Option<&'static str> {
        match self {
            TransitionKind::Fade => None,
            TransitionKind::Slide(SlideDirection::Forward) => Some("animate-slide-out-left"),
            TransitionKind::Slide(SlideDirection::Backward) => Some("animate-slide-out-right"),
        }
    }

    pub fn is_slide(&self) -> bool {
        matches!(self, TransitionKind::Slide(_))
    }
}

/// Colour theme of the site
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    /// Daytime is [6, 18) local time
    pub fn from_hour(hour: u32) -> Self {
        if (6..18).contains(&hour) {
            Theme::Light
        } else {
            Theme::Dark
        }
    }
}

impl FromStr for Theme {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(anyhow::anyhow!("unknown theme '{other}'")),
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Step of the two-stage sign-in flow
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthStep {
    /// Step 1: the user types an email address
    EmailEntry,
    /// Step 2: login or registration, depending on whether the email is known
    CredentialEntry,
}

impl AuthStep {
    pub fn number(&self) -> u8 {
        match self {
            AuthStep::EmailEntry => 1,
            AuthStep::CredentialEntry => 2,
        }
    }
}

/// Visual category of a transient notification banner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Success,
    Error,
    Info,
    Warning,
}

impl NotificationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationKind::Success => "success",
            NotificationKind::Error => "error",
            NotificationKind::Info => "info",
            NotificationKind::Warning => "warning",
        }
    }
}
