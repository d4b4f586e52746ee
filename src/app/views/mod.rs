//! # Views Module
//!
//! The document model the view models draw into, the page markup builders
//! and the terminal presentation of both.

pub mod document;
pub mod markup;
pub mod pages;
pub mod terminal_renderer;

// Re-export main types for convenience
pub use document::{default_nav_items, Document, NavItem, ANNOUNCEMENT_ID};
pub use pages::{
    category_alert, AccountSetting, AuthView, CardView, DetailView, HomeView, PageView,
    ProfileView, CATEGORIES, COMMENT_ALERT, DOWNLOAD_ALERT, FEEDBACK_ALERT, GAL_SEARCH_ALERT,
    REPORT_INVALID_ALERT, UPLOAD_ALERT,
};
pub use terminal_renderer::{TerminalRenderer, ViewRenderer};
