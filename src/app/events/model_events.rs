//! # Model Events
//!
//! Events emitted when application state changes.
//! These events notify the system of data changes for reactive updates.

use super::types::{AuthStep, RouteName, Theme, TransitionKind};

/// Events emitted when models change
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelEvent {
    /// Router moved to a new route
    RouteChanged {
        previous: RouteName,
        current: RouteName,
    },

    /// A render started swapping the main container
    TransitionStarted {
        route: RouteName,
        kind: TransitionKind,
    },

    /// A pending slide was invalidated by a newer render
    TransitionCancelled { token: u64 },

    /// The main container holds the final static markup of the route
    TransitionSettled { route: RouteName },

    /// Sign-in flow moved between steps
    AuthStepChanged { old_step: AuthStep, new_step: AuthStep },

    /// A new account was appended to the catalogue
    UserRegistered { email: String },

    /// A user logged in or registered
    SessionStarted { email: String },

    /// The user logged out
    SessionEnded,

    /// The announcement was dismissed for the rest of the session
    AnnouncementDismissed,

    /// Colour theme switched
    ThemeChanged { theme: Theme },

    /// A free-text search was submitted
    SearchPerformed { query: String },
}
