//! In-memory broadcast hub for real-time message fan-out.
//!
//! All conversations share one global channel: `publish` delivers every
//! message event to every currently registered listener, and listeners
//! filter by conversation id on their side. The registry is the single
//! piece of shared mutable state in the core; one mutex guards every
//! add/remove/iterate and is never held across an await point.
//!
//! Delivery guarantees: per-listener order matches publish call order
//! (each listener owns a FIFO channel); order across listeners is
//! unspecified. A slow listener has events dropped once its bounded
//! channel fills, and a disconnected listener is pruned. Neither case
//! stalls or fails delivery to the remaining listeners, and `publish`
//! itself never fails.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use shared::models::{Message, StreamEvent};
use tokio::sync::mpsc;
use tracing::{debug, warn};
use uuid::Uuid;

/// Opaque token identifying one active subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerHandle(Uuid);

/// Process-wide registry of live subscribers.
///
/// Constructed once in [`crate::server::run`] and shared through
/// [`crate::app_state::AppState`].
pub struct BroadcastHub {
    capacity: usize,
    listeners: Mutex<HashMap<Uuid, mpsc::Sender<StreamEvent>>>,
}

impl BroadcastHub {
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            listeners: Mutex::new(HashMap::new()),
        }
    }

    /// Registers a new listener and returns its handle plus the receiving
    /// end of its event channel.
    ///
    /// The channel already contains the `connected` acknowledgment, so the
    /// subscriber sees it before any message event published afterwards.
    pub fn subscribe(&self) -> (ListenerHandle, mpsc::Receiver<StreamEvent>) {
        let (tx, rx) = mpsc::channel(self.capacity);
        // Fresh channel with capacity >= 1, cannot be full.
        let _ = tx.try_send(StreamEvent::Connected);

        let id = Uuid::new_v4();
        let count = {
            let mut listeners = self.lock();
            listeners.insert(id, tx);
            listeners.len()
        };
        metrics::gauge!("courier_stream_listeners").set(count as f64);
        debug!(listener = %id, listeners = count, "subscribed listener");

        (ListenerHandle(id), rx)
    }

    /// Removes a listener. Removing an already-removed handle is a no-op.
    pub fn unsubscribe(&self, handle: ListenerHandle) {
        let (removed, count) = {
            let mut listeners = self.lock();
            let removed = listeners.remove(&handle.0).is_some();
            (removed, listeners.len())
        };
        if removed {
            metrics::gauge!("courier_stream_listeners").set(count as f64);
            debug!(listener = %handle.0, listeners = count, "unsubscribed listener");
        }
    }

    /// Fans a persisted message out to every registered listener.
    ///
    /// Must only be called after the message has been durably stored, so
    /// that every delivered event corresponds to a persisted row.
    pub fn publish(&self, message: Message) {
        let snapshot: Vec<(Uuid, mpsc::Sender<StreamEvent>)> = {
            let listeners = self.lock();
            listeners
                .iter()
                .map(|(id, tx)| (*id, tx.clone()))
                .collect()
        };

        let event = StreamEvent::Message { message };
        let mut closed = Vec::new();
        for (id, tx) in snapshot {
            match tx.try_send(event.clone()) {
                Ok(()) => {}
                Err(mpsc::error::TrySendError::Full(_)) => {
                    // Slow consumer: drop the event for this listener only.
                    metrics::counter!("courier_stream_events_dropped_total").increment(1);
                    warn!(listener = %id, "listener channel full, dropping event");
                }
                Err(mpsc::error::TrySendError::Closed(_)) => closed.push(id),
            }
        }

        if !closed.is_empty() {
            let mut listeners = self.lock();
            for id in closed {
                listeners.remove(&id);
            }
            metrics::gauge!("courier_stream_listeners").set(listeners.len() as f64);
        }

        metrics::counter!("courier_stream_events_published_total").increment(1);
    }

    /// Number of currently registered listeners.
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.lock().len()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<Uuid, mpsc::Sender<StreamEvent>>> {
        self.listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl std::fmt::Debug for BroadcastHub {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BroadcastHub")
            .field("capacity", &self.capacity)
            .field("listeners", &self.listener_count())
            .finish()
    }
}

/// RAII pairing of registration with deregistration.
///
/// The subscription endpoint moves this guard into its response stream;
/// whichever way the connection ends, dropping the stream drops the guard
/// and the listener is removed.
#[derive(Debug)]
pub struct SubscriptionGuard {
    hub: Arc<BroadcastHub>,
    handle: ListenerHandle,
}

impl SubscriptionGuard {
    #[must_use]
    pub fn new(hub: Arc<BroadcastHub>, handle: ListenerHandle) -> Self {
        Self { hub, handle }
    }
}

impl Drop for SubscriptionGuard {
    fn drop(&mut self) {
        self.hub.unsubscribe(self.handle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use shared::models::Timestamp;

    fn test_message(content: &str) -> Message {
        Message {
            id: Uuid::new_v4(),
            conversation_id: Uuid::new_v4(),
            sender_id: "user_a".into(),
            content: content.into(),
            sent_at: Timestamp(Utc::now()),
            read_at: None,
        }
    }

    #[tokio::test]
    async fn subscriber_receives_connected_ack_first() {
        let hub = BroadcastHub::new(8);
        let (_handle, mut rx) = hub.subscribe();

        hub.publish(test_message("hi"));

        assert_eq!(rx.recv().await, Some(StreamEvent::Connected));
        match rx.recv().await {
            Some(StreamEvent::Message { message }) => assert_eq!(message.content, "hi"),
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[tokio::test]
    async fn subscriber_receives_all_events_in_publish_order() {
        let hub = BroadcastHub::new(8);
        let (_handle, mut rx) = hub.subscribe();
        assert_eq!(rx.recv().await, Some(StreamEvent::Connected));

        for i in 0..5 {
            hub.publish(test_message(&format!("m{i}")));
        }

        for i in 0..5 {
            match rx.recv().await {
                Some(StreamEvent::Message { message }) => {
                    assert_eq!(message.content, format!("m{i}"));
                }
                other => panic!("unexpected event: {other:?}"),
            }
        }
    }

    #[tokio::test]
    async fn every_listener_gets_every_message() {
        let hub = BroadcastHub::new(8);
        let (_h1, mut rx1) = hub.subscribe();
        let (_h2, mut rx2) = hub.subscribe();
        assert_eq!(hub.listener_count(), 2);

        hub.publish(test_message("fan-out"));

        assert_eq!(rx1.recv().await, Some(StreamEvent::Connected));
        assert_eq!(rx2.recv().await, Some(StreamEvent::Connected));
        assert!(matches!(rx1.recv().await, Some(StreamEvent::Message { .. })));
        assert!(matches!(rx2.recv().await, Some(StreamEvent::Message { .. })));
    }

    #[tokio::test]
    async fn unsubscribed_listener_receives_nothing() {
        let hub = BroadcastHub::new(8);
        let (handle, mut rx) = hub.subscribe();
        assert_eq!(rx.recv().await, Some(StreamEvent::Connected));

        hub.unsubscribe(handle);
        hub.publish(test_message("after"));

        // Channel closes on unsubscribe; no message event arrives.
        assert_eq!(rx.recv().await, None);
        assert_eq!(hub.listener_count(), 0);
    }

    #[tokio::test]
    async fn double_unsubscribe_is_a_noop() {
        let hub = BroadcastHub::new(8);
        let (handle, _rx) = hub.subscribe();

        hub.unsubscribe(handle);
        hub.unsubscribe(handle);
        assert_eq!(hub.listener_count(), 0);
    }

    #[tokio::test]
    async fn full_listener_does_not_stall_others() {
        let hub = BroadcastHub::new(1);
        // First listener never drains; its channel holds only the ack.
        let (_slow, _slow_rx) = hub.subscribe();
        let (_fast, mut fast_rx) = hub.subscribe();
        assert_eq!(fast_rx.recv().await, Some(StreamEvent::Connected));

        hub.publish(test_message("m1"));

        match fast_rx.recv().await {
            Some(StreamEvent::Message { message }) => assert_eq!(message.content, "m1"),
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[tokio::test]
    async fn dropped_receiver_is_pruned_on_publish() {
        let hub = BroadcastHub::new(8);
        let (_handle, rx) = hub.subscribe();
        drop(rx);
        assert_eq!(hub.listener_count(), 1);

        hub.publish(test_message("prune"));
        assert_eq!(hub.listener_count(), 0);
    }

    #[tokio::test]
    async fn guard_unsubscribes_on_drop() {
        let hub = Arc::new(BroadcastHub::new(8));
        let (handle, _rx) = hub.subscribe();
        {
            let _guard = SubscriptionGuard::new(Arc::clone(&hub), handle);
            assert_eq!(hub.listener_count(), 1);
        }
        assert_eq!(hub.listener_count(), 0);
    }

    #[tokio::test]
    async fn concurrent_subscribe_publish_unsubscribe() {
        let hub = Arc::new(BroadcastHub::new(64));
        let mut tasks = Vec::new();

        for _ in 0..8 {
            let hub = Arc::clone(&hub);
            tasks.push(tokio::spawn(async move {
                for _ in 0..25 {
                    let (handle, _rx) = hub.subscribe();
                    hub.publish(test_message("x"));
                    hub.unsubscribe(handle);
                }
            }));
        }

        for task in tasks {
            task.await.expect("task should not panic");
        }
        assert_eq!(hub.listener_count(), 0);
    }
}
