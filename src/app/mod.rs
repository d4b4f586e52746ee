//! # Application Core
//!
//! The MVVM implementation of the catalogue site. The browser DOM is modelled
//! by [`views::Document`], timers by [`view_models::Scheduler`], and user
//! clicks and keystrokes by [`commands::UserAction`].

pub mod commands;
pub mod controllers;
pub mod events;
pub mod io;
pub mod models;
pub mod services;
pub mod utils;
pub mod view_models;
pub mod views;

// Re-export core types
pub use controllers::AppController;
pub use events::*;
pub use view_models::{AppContext, ViewModel};
pub use views::Document;

pub use commands::{CommandEvent, CommandRegistry, UserAction};
pub use models::{ContentCatalog, ContentItem, Route, RouteParams, SessionUser, UserRecord};
