//! # Services
//!
//! Collaborators the view models call into: notifications, theme and its
//! storage, search ranking, image preloading and human verification.

pub mod notification;
pub mod preloader;
pub mod search;
pub mod storage;
pub mod theme;
pub mod verification;

pub use notification::{Notification, NotificationService};
pub use preloader::{ImagePreloader, PreloadPriority, PreloadRequest};
pub use search::{SearchSuggestionEngine, Suggestion, SuggestionKind, Suggestions};
pub use storage::{JsonFileStore, KeyValueStore, MemoryStore};
pub use theme::{icon_class_for, local_hour, ThemeManager, THEME_KEY};
pub use verification::{HumanVerification, StaticVerification, VERIFICATION_CONTAINER};
