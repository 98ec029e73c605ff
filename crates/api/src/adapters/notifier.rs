//! Notifier that logs each notification and queues it for the terminal

use agenda_core::{Notification, NotificationLevel, Notifier};
use parking_lot::Mutex;
use tracing::{info, warn};

/// Collects notifications until the current command prints them
#[derive(Debug, Default)]
pub struct NotificationFeed {
    pending: Mutex<Vec<Notification>>,
}

impl NotificationFeed {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take every notification raised since the last call
    pub fn drain(&self) -> Vec<Notification> {
        std::mem::take(&mut *self.pending.lock())
    }
}

impl Notifier for NotificationFeed {
    fn notify(&self, notification: Notification) {
        match notification.level {
            NotificationLevel::Success => {
                info!(title = %notification.title, "notification");
            }
            NotificationLevel::Error => {
                warn!(
                    title = %notification.title,
                    description = notification.description.as_deref().unwrap_or_default(),
                    "notification"
                );
            }
        }
        self.pending.lock().push(notification);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drain_empties_the_queue() {
        let feed = NotificationFeed::new();
        feed.notify(Notification::success("Schedule created"));
        feed.notify(Notification::error("Failed to cancel schedule", "Already sent"));

        let drained = feed.drain();
        assert_eq!(drained.len(), 2);
        assert_eq!(drained[1].description.as_deref(), Some("Already sent"));
        assert!(feed.drain().is_empty());
    }
}
