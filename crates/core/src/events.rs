//! Change events published after acknowledged mutations
//!
//! Delivery order is fixed: synchronous listeners (the query cache) run
//! first, then broadcast subscribers are woken. A subscriber that reloads
//! on an event therefore never reads an entry the event invalidates.

use std::sync::Arc;

use agenda_domain::ScheduleId;
use parking_lot::RwLock;
use tokio::sync::broadcast;
use tokio::sync::broadcast::error::{RecvError, TryRecvError};
use tracing::{debug, warn};

const CHANNEL_CAPACITY: usize = 64;

/// Cached entity a change applies to
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EntityKey {
    /// Every list query result
    ScheduleList,
    /// One schedule by id
    Schedule(ScheduleId),
}

/// What happened to the entity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    Created,
    Updated,
    Canceled,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeEvent {
    pub key: EntityKey,
    pub kind: ChangeKind,
}

impl ChangeEvent {
    pub const fn new(key: EntityKey, kind: ChangeKind) -> Self {
        Self { key, kind }
    }
}

/// Synchronous receiver invoked inline by [`EventBus::publish`]
pub trait ChangeListener: Send + Sync {
    fn on_change(&self, event: &ChangeEvent);
}

/// Fan-out point for change events
pub struct EventBus {
    listeners: RwLock<Vec<Arc<dyn ChangeListener>>>,
    sender: broadcast::Sender<ChangeEvent>,
}

impl EventBus {
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self { listeners: RwLock::new(Vec::new()), sender }
    }

    /// Register a listener that runs before any subscriber is woken
    pub fn register(&self, listener: Arc<dyn ChangeListener>) {
        self.listeners.write().push(listener);
    }

    /// Subscribe to events matching `filter` (`None` receives everything)
    pub fn subscribe(&self, filter: Option<EntityKey>) -> Subscription {
        Subscription { receiver: self.sender.subscribe(), filter }
    }

    pub fn publish(&self, event: ChangeEvent) {
        for listener in self.listeners.read().iter() {
            listener.on_change(&event);
        }

        // No receivers is not an error
        match self.sender.send(event) {
            Ok(receivers) => debug!(receivers, "change event delivered"),
            Err(broadcast::error::SendError(event)) => {
                debug!(key = ?event.key, "change event had no subscribers");
            }
        }
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

/// Filtered receiving end of the bus
pub struct Subscription {
    receiver: broadcast::Receiver<ChangeEvent>,
    filter: Option<EntityKey>,
}

impl Subscription {
    fn accepts(&self, event: &ChangeEvent) -> bool {
        self.filter.as_ref().map_or(true, |key| *key == event.key)
    }

    /// Next matching event already queued, without waiting
    pub fn try_next(&mut self) -> Option<ChangeEvent> {
        loop {
            match self.receiver.try_recv() {
                Ok(event) if self.accepts(&event) => return Some(event),
                Ok(_) => {}
                Err(TryRecvError::Lagged(skipped)) => {
                    warn!(skipped, "change subscription lagged");
                    // Missed events may have matched; report a synthetic change
                    if let Some(key) = self.filter.clone() {
                        return Some(ChangeEvent::new(key, ChangeKind::Updated));
                    }
                }
                Err(TryRecvError::Empty | TryRecvError::Closed) => return None,
            }
        }
    }

    /// Drain queued events and report whether any matched
    pub fn drain(&mut self) -> bool {
        let mut changed = false;
        while self.try_next().is_some() {
            changed = true;
        }
        changed
    }

    /// Wait for the next matching event; `None` once the bus is dropped
    pub async fn recv(&mut self) -> Option<ChangeEvent> {
        loop {
            match self.receiver.recv().await {
                Ok(event) if self.accepts(&event) => return Some(event),
                Ok(_) => {}
                Err(RecvError::Lagged(skipped)) => {
                    warn!(skipped, "change subscription lagged");
                }
                Err(RecvError::Closed) => return None,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use parking_lot::Mutex;

    use super::*;

    struct Recorder {
        seen: Mutex<Vec<ChangeEvent>>,
        probe: Arc<Mutex<Option<Subscription>>>,
        queued_at_call: Mutex<Vec<bool>>,
    }

    impl ChangeListener for Recorder {
        fn on_change(&self, event: &ChangeEvent) {
            self.seen.lock().push(event.clone());
            if let Some(sub) = self.probe.lock().as_mut() {
                self.queued_at_call.lock().push(sub.try_next().is_some());
            }
        }
    }

    #[test]
    fn listeners_run_before_subscribers_see_the_event() {
        let bus = EventBus::new();
        let probe = Arc::new(Mutex::new(Some(bus.subscribe(None))));
        let recorder = Arc::new(Recorder {
            seen: Mutex::new(Vec::new()),
            probe: Arc::clone(&probe),
            queued_at_call: Mutex::new(Vec::new()),
        });
        bus.register(recorder.clone());

        bus.publish(ChangeEvent::new(EntityKey::ScheduleList, ChangeKind::Created));

        assert_eq!(recorder.seen.lock().len(), 1);
        assert_eq!(*recorder.queued_at_call.lock(), vec![false]);
        assert!(probe.lock().as_mut().is_some_and(Subscription::drain));
    }

    #[test]
    fn subscription_filters_by_key() {
        let bus = EventBus::new();
        let id = ScheduleId::new("s-1");
        let mut only_one = bus.subscribe(Some(EntityKey::Schedule(id.clone())));

        bus.publish(ChangeEvent::new(EntityKey::ScheduleList, ChangeKind::Canceled));
        assert!(only_one.try_next().is_none());

        bus.publish(ChangeEvent::new(EntityKey::Schedule(id.clone()), ChangeKind::Canceled));
        let event = only_one.try_next();
        assert_eq!(event.map(|e| e.key), Some(EntityKey::Schedule(id)));
    }

    #[test]
    fn publish_without_subscribers_is_fine() {
        let bus = EventBus::default();
        bus.publish(ChangeEvent::new(EntityKey::ScheduleList, ChangeKind::Updated));
    }

    #[tokio::test]
    async fn recv_waits_for_matching_event() {
        let bus = Arc::new(EventBus::new());
        let mut sub = bus.subscribe(Some(EntityKey::ScheduleList));

        let publisher = Arc::clone(&bus);
        tokio::spawn(async move {
            publisher.publish(ChangeEvent::new(
                EntityKey::Schedule(ScheduleId::new("x")),
                ChangeKind::Updated,
            ));
            publisher.publish(ChangeEvent::new(EntityKey::ScheduleList, ChangeKind::Updated));
        });

        let event = sub.recv().await;
        assert_eq!(event.map(|e| e.key), Some(EntityKey::ScheduleList));
    }
}
