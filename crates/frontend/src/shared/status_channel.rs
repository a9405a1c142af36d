//! Publish/subscribe channel for status edits.
//!
//! Every open view (lists, details, dashboards, notification bell) subscribes
//! once and re-derives its state when a change is published.

use contracts::domain::common::EntityKind;
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusChange {
    /// Effective status of one entity changed
    Updated {
        kind: EntityKind,
        id: String,
        status: String,
    },
    /// Notification read flags changed
    NotificationsRead,
    /// Overlay was wiped
    Cleared,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

type Listener = Arc<dyn Fn(&StatusChange) + Send + Sync>;

#[derive(Default)]
struct Registry {
    next_id: u64,
    listeners: Vec<(SubscriptionId, Listener)>,
}

#[derive(Clone, Default)]
pub struct StatusChannel {
    registry: Arc<Mutex<Registry>>,
}

impl std::fmt::Debug for StatusChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StatusChannel")
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}

impl StatusChannel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe<F>(&self, listener: F) -> SubscriptionId
    where
        F: Fn(&StatusChange) + Send + Sync + 'static,
    {
        let mut registry = match self.registry.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        registry.next_id += 1;
        let id = SubscriptionId(registry.next_id);
        registry.listeners.push((id, Arc::new(listener)));
        id
    }

    /// Returns `false` if the id was not subscribed.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut registry = match self.registry.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        let before = registry.listeners.len();
        registry.listeners.retain(|(sub, _)| *sub != id);
        registry.listeners.len() != before
    }

    /// Delivers `change` to every subscriber in subscription order.
    /// Listeners run outside the lock and may (un)subscribe themselves.
    pub fn publish(&self, change: StatusChange) {
        let listeners: Vec<Listener> = match self.registry.lock() {
            Ok(guard) => guard.listeners.iter().map(|(_, l)| l.clone()).collect(),
            Err(poisoned) => poisoned
                .into_inner()
                .listeners
                .iter()
                .map(|(_, l)| l.clone())
                .collect(),
        };
        log::debug!("Publishing {:?} to {} subscribers", change, listeners.len());
        for listener in listeners {
            listener(&change);
        }
    }

    pub fn subscriber_count(&self) -> usize {
        match self.registry.lock() {
            Ok(guard) => guard.listeners.len(),
            Err(poisoned) => poisoned.into_inner().listeners.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn updated(id: &str) -> StatusChange {
        StatusChange::Updated {
            kind: EntityKind::Order,
            id: id.into(),
            status: "processing".into(),
        }
    }

    #[test]
    fn test_all_subscribers_receive_until_unsubscribed() {
        let channel = StatusChannel::new();
        let a = Arc::new(AtomicUsize::new(0));
        let b = Arc::new(AtomicUsize::new(0));

        let a2 = a.clone();
        let sub_a = channel.subscribe(move |_| {
            a2.fetch_add(1, Ordering::SeqCst);
        });
        let b2 = b.clone();
        channel.subscribe(move |_| {
            b2.fetch_add(1, Ordering::SeqCst);
        });

        channel.publish(updated("1"));
        assert!(channel.unsubscribe(sub_a));
        assert!(!channel.unsubscribe(sub_a));
        channel.publish(StatusChange::Cleared);

        assert_eq!(a.load(Ordering::SeqCst), 1);
        assert_eq!(b.load(Ordering::SeqCst), 2);
        assert_eq!(channel.subscriber_count(), 1);
    }

    #[test]
    fn test_listener_sees_payload() {
        let channel = StatusChannel::new();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        channel.subscribe(move |change| {
            sink.lock().unwrap().push(change.clone());
        });
        channel.publish(updated("42"));
        assert_eq!(*seen.lock().unwrap(), vec![updated("42")]);
    }

    #[test]
    fn test_listener_can_subscribe_during_publish() {
        let channel = StatusChannel::new();
        let inner = channel.clone();
        channel.subscribe(move |_| {
            inner.subscribe(|_| {});
        });
        channel.publish(StatusChange::Cleared);
        assert_eq!(channel.subscriber_count(), 2);
    }
}
