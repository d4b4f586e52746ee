//! # View Events
//!
//! Events that tell the presentation layer which parts of the document changed
//! so the renderer can redraw selectively.

/// Events that trigger view updates
#[derive(Debug, Clone, PartialEq)]
pub enum ViewEvent {
    /// Everything must be redrawn
    FullRedrawRequired,

    /// The main container markup was replaced
    ContentReplaced,

    /// Nav bar active state, icons or labels changed
    NavBarUpdateRequired,

    /// The auth form's live state (errors, checks, buttons) changed
    AuthFormUpdateRequired,

    /// Search suggestion list opened, closed or moved its selection
    SuggestionsUpdateRequired,

    /// A notification banner appeared or expired
    NotificationsUpdateRequired,

    /// An overlay such as the announcement changed visibility
    OverlayUpdateRequired,

    /// Theme or theme icon changed
    ThemeUpdateRequired,

    /// The terminal command line text changed
    CommandLineUpdateRequired,
}
