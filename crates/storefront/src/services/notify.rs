//! Transient user notifications ("toasts").

use tokio::sync::broadcast;
use tracing::debug;

const CHANNEL_CAPACITY: usize = 32;

/// Severity of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Success,
    Error,
    Info,
}

/// A short message for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
}

/// Fan-out of notifications to whichever surfaces are listening.
///
/// Messages published with no subscriber are dropped; slow subscribers lose
/// the oldest messages.
#[derive(Debug, Clone)]
pub struct Notifier {
    sender: broadcast::Sender<Notification>,
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new()
    }
}

impl Notifier {
    #[must_use]
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self { sender }
    }

    /// Listen for notifications published from now on.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<Notification> {
        self.sender.subscribe()
    }

    pub fn success(&self, message: impl Into<String>) {
        self.publish(NotificationLevel::Success, message.into());
    }

    pub fn error(&self, message: impl Into<String>) {
        self.publish(NotificationLevel::Error, message.into());
    }

    pub fn info(&self, message: impl Into<String>) {
        self.publish(NotificationLevel::Info, message.into());
    }

    fn publish(&self, level: NotificationLevel, message: String) {
        debug!(?level, %message, "Notification");
        // No receivers is fine
        let _ = self.sender.send(Notification { level, message });
    }
}
