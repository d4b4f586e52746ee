//! # Controllers
//!
//! The event loop tying input, the ViewModel and the renderer together.

pub mod app_controller;

pub use app_controller::AppController;
