//! # Rendering Coordination
//!
//! Handles model/view event emission and notification banners.

use super::auth_flow::Notice;
use super::core::ViewModel;
use super::scheduler::DeferredTask;
use crate::app::events::{ModelEvent, NotificationKind, ViewEvent};

impl ViewModel {
    /// Emit a view event (adds to pending events collection)
    pub(super) fn emit_view_event(&mut self, event: ViewEvent) {
        tracing::trace!("View event emitted: {:?}", event);
        self.pending_view_events.push(event);
    }

    /// Queue a model event for the controller
    pub(super) fn emit_model_event(&mut self, event: ModelEvent) {
        tracing::debug!("Model event: {:?}", event);
        self.pending_model_events.push(event);
    }

    /// Collect and clear pending view events
    pub fn collect_pending_view_events(&mut self) -> Vec<ViewEvent> {
        std::mem::take(&mut self.pending_view_events)
    }

    /// Collect and clear pending model events
    pub fn collect_pending_model_events(&mut self) -> Vec<ModelEvent> {
        std::mem::take(&mut self.pending_model_events)
    }

    /// Show a banner and schedule its removal
    pub fn notify(&mut self, message: impl Into<String>, kind: NotificationKind) -> u64 {
        let id = self.notifications.show(message, kind);
        self.document
            .set_notifications(self.notifications.active());
        self.scheduler.schedule(
            self.config.notification_duration,
            DeferredTask::RemoveNotification { id },
        );
        self.emit_view_event(ViewEvent::NotificationsUpdateRequired);
        id
    }

    pub(super) fn show_notice(&mut self, notice: Notice) {
        self.notify(notice.message, notice.kind);
    }

    pub(super) fn expire_notification(&mut self, id: u64) {
        if self.notifications.remove(id) {
            self.document
                .set_notifications(self.notifications.active());
            self.emit_view_event(ViewEvent::NotificationsUpdateRequired);
        }
    }
}
