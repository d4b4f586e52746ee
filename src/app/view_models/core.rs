//! # Core ViewModel Structure
//!
//! Contains the application context and the main ViewModel struct.
//! The ViewModel owns the document model, the clock and every engine; the
//! behaviour lives in the sibling manager modules.

use super::auth_flow::{AuthFlowController, AuthForm};
use super::router::Router;
use super::scheduler::Scheduler;
use super::search_box::SearchBox;
use super::transition::{TransitionState, ViewTransitionEngine};
use crate::app::events::{ModelEvent, Theme, ViewEvent};
use crate::app::models::{AuthFlowState, ContentCatalog};
use crate::app::services::{
    HumanVerification, ImagePreloader, NotificationService, PreloadRequest,
    SearchSuggestionEngine, ThemeManager,
};
use crate::app::views::Document;
use crate::config::AppConfig;
use std::time::Duration;

/// Mutable application state threaded through the router and the auth flow
#[derive(Debug, Clone)]
pub struct AppContext {
    pub router: Router,
    pub catalog: ContentCatalog,
    pub auth: AuthFlowState,
}

impl AppContext {
    pub fn new(catalog: ContentCatalog) -> Self {
        Self {
            router: Router::new(),
            catalog,
            auth: AuthFlowState::new(),
        }
    }
}

pub struct ViewModel {
    pub(super) ctx: AppContext,
    pub(super) config: AppConfig,

    // View state
    pub(super) document: Document,
    pub(super) transitions: ViewTransitionEngine,
    pub(super) auth_flow: AuthFlowController,
    pub(super) search_box: SearchBox,
    pub(super) command_line: String,

    // Services
    pub(super) scheduler: Scheduler,
    pub(super) search_engine: SearchSuggestionEngine,
    pub(super) notifications: NotificationService,
    pub(super) theme: ThemeManager,
    pub(super) preloader: ImagePreloader,
    pub(super) preload_requests: Vec<PreloadRequest>,
    pub(super) verification: Option<Box<dyn HumanVerification>>,

    // Event management
    pub(super) pending_view_events: Vec<ViewEvent>,
    pub(super) pending_model_events: Vec<ModelEvent>,
}

impl ViewModel {
    /// Create a ViewModel over `catalog`. Nothing is rendered until [`start`].
    ///
    /// [`start`]: ViewModel::start
    pub fn new(catalog: ContentCatalog, theme: ThemeManager, config: AppConfig) -> Self {
        let document = Document::new(theme.current(), theme.icon_class());
        Self {
            ctx: AppContext::new(catalog),
            document,
            transitions: ViewTransitionEngine::new(config.settle_delay),
            auth_flow: AuthFlowController::new(),
            search_box: SearchBox::new(),
            command_line: String::new(),
            scheduler: Scheduler::new(),
            search_engine: SearchSuggestionEngine::new(
                config.search_cache_capacity,
                config.suggestion_limit,
            ),
            notifications: NotificationService::new(),
            theme,
            preloader: ImagePreloader::new(),
            preload_requests: Vec::new(),
            verification: None,
            pending_view_events: Vec::new(),
            pending_model_events: Vec::new(),
            config,
        }
    }

    /// Install the human-verification widget for the credential step
    pub fn set_verification(&mut self, widget: Box<dyn HumanVerification>) {
        self.verification = Some(widget);
    }

    /// Preload catalogue images and show the first route
    pub fn start(&mut self, route: &str) {
        self.preload_requests = self.preloader.preload_all(&self.ctx.catalog);
        tracing::info!(
            "preloading {} images, starting at '{}'",
            self.preload_requests.len(),
            route
        );
        self.push(route, Default::default());
    }

    pub fn context(&self) -> &AppContext {
        &self.ctx
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn auth_form(&self) -> &AuthForm {
        self.auth_flow.form()
    }

    pub fn auth_flow(&self) -> &AuthFlowController {
        &self.auth_flow
    }

    pub fn search_box(&self) -> &SearchBox {
        &self.search_box
    }

    pub fn search_engine(&self) -> &SearchSuggestionEngine {
        &self.search_engine
    }

    pub fn transition_state(&self) -> &TransitionState {
        self.transitions.state()
    }

    pub fn theme(&self) -> Theme {
        self.theme.current()
    }

    pub fn preload_requests(&self) -> &[PreloadRequest] {
        &self.preload_requests
    }

    pub fn verification(&self) -> Option<&dyn HumanVerification> {
        self.verification.as_deref()
    }

    /// Current time on the virtual clock
    pub fn now(&self) -> Duration {
        self.scheduler.now()
    }

    /// Time until the next deferred task is due
    pub fn time_until_next_task(&self) -> Option<Duration> {
        self.scheduler
            .next_due()
            .map(|due| due.saturating_sub(self.scheduler.now()))
    }

    pub fn has_pending_tasks(&self) -> bool {
        !self.scheduler.is_idle()
    }
}
