//! # Navigation Management
//!
//! Route pushes, rendering through the transition engine and the deferred
//! work that follows a render: finalising slides, rebinding the auth card,
//! showing the announcement.

use super::core::ViewModel;
use super::nav_bar::refresh_nav;
use super::scheduler::DeferredTask;
use super::transition::{transition_kind, Swap};
use crate::app::events::{ModelEvent, RouteName, TransitionKind, ViewEvent};
use crate::app::models::RouteParams;
use crate::app::services::VERIFICATION_CONTAINER;
use crate::app::views::{PageView, ANNOUNCEMENT_ID};
use std::time::Duration;

impl ViewModel {
    /// Navigate to `name`, render it and refresh the nav bar
    pub fn push(&mut self, name: impl Into<RouteName>, params: RouteParams) {
        let change = self.ctx.router.push(name, params);
        self.emit_model_event(ModelEvent::RouteChanged {
            previous: change.previous.clone(),
            current: change.current.clone(),
        });
        self.render_with(transition_kind(&change.previous, &change.current));
        self.refresh_nav();
    }

    /// Redraw the current route in place
    pub fn rerender(&mut self) {
        self.render_with(TransitionKind::Fade);
    }

    /// Sync the nav bar with the current route and session
    pub fn refresh_nav(&mut self) {
        refresh_nav(
            self.document.nav_items_mut(),
            &self.ctx.router.current().name,
            self.ctx.catalog.is_logged_in(),
        );
        self.emit_view_event(ViewEvent::NavBarUpdateRequired);
    }

    fn render_with(&mut self, kind: TransitionKind) {
        let route = self.ctx.router.current().clone();
        let page = PageView::build(&route, &self.ctx.catalog, &self.ctx.auth);
        let animated = page.render(Some(kind.entrance_class()));
        let static_markup = page.render(None);

        let plan = self.transitions.begin(
            &mut self.document,
            kind,
            animated,
            static_markup,
            self.scheduler.now(),
        );
        // old listeners went away with the old markup
        self.auth_flow.reset_form(&self.ctx.auth);

        if let Some(token) = plan.cancelled {
            self.emit_model_event(ModelEvent::TransitionCancelled {
                token: token.value(),
            });
        }
        self.emit_model_event(ModelEvent::TransitionStarted {
            route: route.name,
            kind,
        });
        self.emit_view_event(ViewEvent::ContentReplaced);

        match plan.swap {
            Swap::Immediate => self.on_settled(),
            Swap::Deferred { token, .. } => {
                self.scheduler.schedule(
                    self.transitions.settle_delay(),
                    DeferredTask::FinalizeTransition { token },
                );
            }
        }
    }

    /// The container holds the final markup of the current route
    fn on_settled(&mut self) {
        let route = self.ctx.router.current().name.clone();
        match route {
            RouteName::Home if self.ctx.catalog.announcement().show => {
                self.scheduler
                    .schedule(Duration::ZERO, DeferredTask::ShowAnnouncement);
            }
            RouteName::Profile => {
                self.scheduler
                    .schedule(self.config.rebind_delay, DeferredTask::RebindAuth);
            }
            _ => {}
        }
        self.emit_model_event(ModelEvent::TransitionSettled { route });
    }

    /// Advance the clock and run every task that came due
    pub fn tick(&mut self, elapsed: Duration) {
        let deadline = self.scheduler.now() + elapsed;
        while let Some(task) = self.scheduler.pop_due_by(deadline) {
            self.run_deferred(task);
        }
        self.scheduler.advance_to(deadline);
    }

    /// Keep advancing to the next due task until nothing is queued
    pub fn run_until_idle(&mut self) {
        while let Some(wait) = self.time_until_next_task() {
            self.tick(wait);
        }
    }

    fn run_deferred(&mut self, task: DeferredTask) {
        tracing::trace!("running deferred task {:?}", task);
        match task {
            DeferredTask::FinalizeTransition { token } => {
                if self.transitions.finalize(&mut self.document, token) {
                    self.emit_view_event(ViewEvent::ContentReplaced);
                    self.on_settled();
                }
            }
            DeferredTask::RebindAuth => self.rebind_auth(),
            DeferredTask::ShowAnnouncement => {
                if self.ctx.catalog.announcement().show
                    && self.document.show_overlay(ANNOUNCEMENT_ID)
                {
                    self.emit_view_event(ViewEvent::OverlayUpdateRequired);
                }
            }
            DeferredTask::RemoveNotification { id } => self.expire_notification(id),
            DeferredTask::SearchDebounce { generation } => {
                if self.search_box.on_debounce(
                    generation,
                    &mut self.search_engine,
                    &self.ctx.catalog,
                ) {
                    self.emit_view_event(ViewEvent::SuggestionsUpdateRequired);
                }
            }
        }
    }

    fn rebind_auth(&mut self) {
        let binding = self.auth_flow.bind(&self.ctx.auth, &self.document);
        tracing::debug!("auth card bound: {:?}", binding);

        if self.document.has_class(VERIFICATION_CONTAINER) {
            let theme = self.theme.current();
            if let Some(widget) = self.verification.as_mut() {
                if let Err(e) = widget.render(
                    VERIFICATION_CONTAINER,
                    &self.config.verification_site_key,
                    theme,
                ) {
                    tracing::warn!("verification widget failed to render: {}", e);
                }
            }
        }
        self.emit_view_event(ViewEvent::AuthFormUpdateRequired);
    }
}
