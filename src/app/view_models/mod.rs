//! # ViewModel Module
//!
//! The ViewModel split into focused responsibilities, plus the engines it
//! drives: router, transitions, the auth flow, the search box and the clock.

mod action_dispatcher;
pub mod auth_flow;
mod core;
mod nav_bar;
mod navigation_manager;
mod rendering_coordinator;
mod router;
mod scheduler;
mod search_box;
mod transition;

// Re-export the main ViewModel
pub use core::{AppContext, ViewModel};

// Re-export types that other modules need
pub use auth_flow::{AuthBinding, AuthFlowController, AuthForm, AuthOutcome, NextStep, Notice};
pub use nav_bar::{refresh_nav, PROFILE_LABEL_GUEST, PROFILE_LABEL_MEMBER};
pub use router::{RouteChange, Router};
pub use scheduler::{DeferredTask, Scheduler};
pub use search_box::{SearchBox, SearchKeyOutcome};
pub use transition::{
    transition_kind, Swap, SwapPlan, TransitionState, TransitionToken, ViewTransitionEngine,
};
