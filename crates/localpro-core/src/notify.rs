//! Transient user feedback
//!
//! Surfaces push [`Notification`]s into a bounded channel; the view layer
//! shows each one for its display duration and then drops it.

use std::time::Duration;

use tokio::sync::mpsc;
use tracing::warn;

/// Severity of a notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Error,
}

/// A transient, auto-dismissing message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub level: NoticeLevel,
    /// How long the view layer keeps it on screen
    pub display_for: Duration,
}

/// Sending half of the notification channel
#[derive(Debug, Clone)]
pub struct Notifier {
    tx: mpsc::Sender<Notification>,
    display_for: Duration,
}

impl Notifier {
    /// Create a notifier and the receiver the view layer drains
    pub fn channel(capacity: usize, display_for: Duration) -> (Self, mpsc::Receiver<Notification>) {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        (Self { tx, display_for }, rx)
    }

    /// Queue a success message
    pub fn success(&self, message: impl Into<String>) {
        self.emit(message.into(), NoticeLevel::Success);
    }

    /// Queue an error message
    pub fn error(&self, message: impl Into<String>) {
        self.emit(message.into(), NoticeLevel::Error);
    }

    fn emit(&self, message: String, level: NoticeLevel) {
        let notification = Notification {
            message,
            level,
            display_for: self.display_for,
        };

        // Never block a mutation on the view layer
        if self.tx.try_send(notification).is_err() {
            warn!("Notification channel full or closed, dropping notification");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_notifications_carry_display_duration() {
        let (notifier, mut rx) = Notifier::channel(4, Duration::from_millis(3000));

        notifier.success("Electrician added successfully");
        notifier.error("Failed to save");

        let first = rx.recv().await.unwrap();
        assert_eq!(first.message, "Electrician added successfully");
        assert_eq!(first.level, NoticeLevel::Success);
        assert_eq!(first.display_for, Duration::from_secs(3));

        let second = rx.recv().await.unwrap();
        assert_eq!(second.level, NoticeLevel::Error);
    }

    #[tokio::test]
    async fn test_full_channel_drops_instead_of_blocking() {
        let (notifier, mut rx) = Notifier::channel(1, Duration::from_millis(10));

        notifier.success("first");
        notifier.success("second");

        assert_eq!(rx.recv().await.unwrap().message, "first");
        assert!(rx.try_recv().is_err());
    }
}
