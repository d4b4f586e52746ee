//! # Notification Service
//!
//! Transient on-screen messages. The service only tracks which banners are
//! live; the view model schedules their removal on the clock.

use crate::app::events::NotificationKind;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub id: u64,
    pub message: String,
    pub kind: NotificationKind,
}

#[derive(Debug, Default)]
pub struct NotificationService {
    next_id: u64,
    active: Vec<Notification>,
}

impl NotificationService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inject a banner and return its id
    pub fn show(&mut self, message: impl Into<String>, kind: NotificationKind) -> u64 {
        self.next_id += 1;
        let notification = Notification {
            id: self.next_id,
            message: message.into(),
            kind,
        };
        tracing::debug!(
            "notification #{} [{}]: {}",
            notification.id,
            kind.as_str(),
            notification.message
        );
        self.active.push(notification);
        self.next_id
    }

    /// Remove a banner; returns false when it was already gone
    pub fn remove(&mut self, id: u64) -> bool {
        let before = self.active.len();
        self.active.retain(|n| n.id != id);
        before != self.active.len()
    }

    pub fn active(&self) -> &[Notification] {
        &self.active
    }

    pub fn latest(&self) -> Option<&Notification> {
        self.active.last()
    }
}
