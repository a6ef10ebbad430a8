//! Transient user notifications.

use log::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Success,
    Error,
}

/// A message for the front-end to show briefly and dismiss.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub id: u64,
    pub level: NotificationLevel,
    pub message: String,
}

/// Pending notifications for one screen, oldest first.
#[derive(Debug, Default)]
pub struct Notifications {
    next_id: u64,
    pending: Vec<Notification>,
}

impl Notifications {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn success(&mut self, message: impl Into<String>) {
        let message = message.into();
        info!("{}", message);
        self.push(NotificationLevel::Success, message);
    }

    pub fn error(&mut self, message: impl Into<String>) {
        let message = message.into();
        warn!("{}", message);
        self.push(NotificationLevel::Error, message);
    }

    pub fn pending(&self) -> &[Notification] {
        &self.pending
    }

    /// Hand the pending notifications to the front-end.
    pub fn drain(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.pending)
    }

    fn push(&mut self, level: NotificationLevel, message: String) {
        self.next_id += 1;
        self.pending.push(Notification {
            id: self.next_id,
            level,
            message,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drain_empties_queue() {
        let mut notifications = Notifications::new();
        notifications.success("Pet added successfully");
        notifications.error("Failed to load pets");

        let drained = notifications.drain();
        assert_eq!(drained.len(), 2);
        assert_eq!(drained[0].level, NotificationLevel::Success);
        assert_eq!(drained[1].message, "Failed to load pets");
        assert!(notifications.pending().is_empty());
    }

    #[test]
    fn test_ids_keep_increasing() {
        let mut notifications = Notifications::new();
        notifications.success("a");
        notifications.drain();
        notifications.success("b");
        assert_eq!(notifications.pending()[0].id, 2);
    }
}
