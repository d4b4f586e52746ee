//! # Models Module
//!
//! Data models: the content catalogue, routes and sign-in flow state.

pub mod auth_state;
pub mod catalog;
pub mod route;

pub use auth_state::AuthFlowState;
pub use catalog::{
    Announcement, CatalogError, Comment, ContentCatalog, ContentItem, MediaItem, MediaKind,
    SessionUser, UserRecord, Version,
};
pub use route::{detail_params, Route, RouteParams};
