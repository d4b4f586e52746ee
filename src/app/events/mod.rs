//! # Events Module
//!
//! Re-exports all event system components organized by category.

pub mod model_events;
pub mod types;
pub mod view_events;

// Re-export all types for easy access
pub use model_events::ModelEvent;
pub use types::{AuthStep, NotificationKind, RouteName, SlideDirection, Theme, TransitionKind};
pub use view_events::ViewEvent;
