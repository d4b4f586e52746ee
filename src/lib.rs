//! # Niypher - Galgame Catalogue App Core
//!
//! A headless single-page application core for browsing a catalogue of
//! visual-novel resources. Routing, animated view transitions, a two-step
//! sign-in flow and search suggestions all live here, with a terminal
//! front end driving them.
//!
//! ## Architecture
//!
//! This application follows the Model-View-ViewModel (MVVM) pattern:
//!
//! ```text
//! ┌─────────────┐    Events    ┌───────────────┐    Updates   ┌──────────┐
//! │    View     │◄─────────────│   ViewModel   │◄─────────────│  Models  │
//! │             │              │               │              │          │
//! │ - Document  │              │ - Router      │              │ - Catalog│
//! │ - Pages     │              │ - Transitions │              │ - Route  │
//! │ - Terminal  │              │ - Auth flow   │              │ - Auth   │
//! └─────────────┘              └───────────────┘              └──────────┘
//!                                      ▲
//!                                      │ UserActions
//!                                      ▼
//!                               ┌──────────────┐
//!                               │  Controller  │
//!                               │              │
//!                               │ - Key input  │
//!                               │ - Event Loop │
//!                               │ - Clock      │
//!                               └──────────────┘
//! ```

pub mod app;
pub mod cmd_args;
pub mod config;

// Re-export main types for easy access
pub use app::*;
