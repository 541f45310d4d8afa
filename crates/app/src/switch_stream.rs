//! Switch change stream — fan-out of ordered change events.
//!
//! Every subscriber owns a bounded slot in a tokio [`broadcast`] channel, so
//! a slow subscriber never delays another one and publishing never waits.
//! A subscriber that falls more than `capacity` events behind receives a
//! [`StreamItem::Gap`] telling it how many events were dropped, then resumes
//! with the oldest event still retained.

use std::sync::Mutex;

use tokio::sync::{broadcast, watch};

use pinhub_domain::event::{ChangeEvent, StreamItem};
use pinhub_domain::id::{SubscriptionId, SwitchNumber};
use pinhub_domain::time::Millis;

/// Publisher side of the change stream.
pub struct SwitchChangeStream {
    sender: broadcast::Sender<ChangeEvent>,
    shutdown: watch::Sender<bool>,
    /// Last sequence number handed out. Held while sending so publication
    /// order matches sequence order.
    sequence: Mutex<u64>,
    capacity: usize,
}

impl SwitchChangeStream {
    /// Create a stream buffering at least `capacity` events per subscriber.
    ///
    /// The broadcast channel rounds its buffer up to a power of two;
    /// [`capacity`](Self::capacity) reports the rounded value.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1).next_power_of_two();
        let (sender, _) = broadcast::channel(capacity);
        let (shutdown, _) = watch::channel(false);
        Self {
            sender,
            shutdown,
            sequence: Mutex::new(0),
            capacity,
        }
    }

    /// Effective per-subscriber buffer size.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of subscriptions that are not closed yet.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }

    /// Open a new subscription.
    ///
    /// The subscriber receives every event published *after* this call.
    /// Subscribing after [`shutdown`](Self::shutdown) yields an already
    /// closed subscription.
    #[must_use]
    pub fn subscribe(&self) -> Subscription {
        let subscription = Subscription {
            id: SubscriptionId::new(),
            receiver: Some(self.sender.subscribe()),
            shutdown: self.shutdown.subscribe(),
            state: SubscriptionState::Open,
        };
        tracing::debug!(subscription = %subscription.id, "switch change subscription opened");
        subscription
    }

    /// Publish a change, assigning it the next sequence number.
    ///
    /// Never blocks on subscribers. Publishing with no subscribers is fine.
    pub fn publish(
        &self,
        switch_number: SwitchNumber,
        is_active: bool,
        timestamp: Millis,
    ) -> ChangeEvent {
        let mut sequence = self
            .sequence
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        *sequence += 1;
        let event = ChangeEvent {
            sequence: *sequence,
            switch_number,
            is_active,
            timestamp,
        };
        // fails only when there are zero receivers
        let _ = self.sender.send(event.clone());
        event
    }

    /// Close every subscription, current and future.
    pub fn shutdown(&self) {
        self.shutdown.send_replace(true);
        tracing::info!(subscribers = self.subscriber_count(), "switch change stream shut down");
    }
}

/// Lifecycle of a [`Subscription`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubscriptionState {
    /// Created, nothing delivered yet.
    Open,
    /// At least one item delivered.
    Streaming,
    /// Cancelled or shut down. Terminal.
    Closed,
}

/// Receiver side of the change stream, one per subscriber.
///
/// Dropping the subscription cancels it; no state lingers in the stream.
pub struct Subscription {
    id: SubscriptionId,
    /// Dropped on close so the stream stops retaining events for it.
    receiver: Option<broadcast::Receiver<ChangeEvent>>,
    shutdown: watch::Receiver<bool>,
    state: SubscriptionState,
}

impl Subscription {
    #[must_use]
    pub fn id(&self) -> SubscriptionId {
        self.id
    }

    #[must_use]
    pub fn state(&self) -> SubscriptionState {
        self.state
    }

    /// Wait for the next item.
    ///
    /// Returns `None` once the subscription is closed, and forever after.
    pub async fn recv(&mut self) -> Option<StreamItem> {
        if *self.shutdown.borrow_and_update() {
            self.close();
        }
        let receiver = self.receiver.as_mut()?;

        tokio::select! {
            biased;
            _ = self.shutdown.changed() => {
                self.close();
                None
            }
            result = receiver.recv() => match result {
                Ok(event) => {
                    self.state = SubscriptionState::Streaming;
                    Some(StreamItem::Change(event))
                }
                Err(broadcast::error::RecvError::Lagged(missed)) => {
                    tracing::warn!(subscription = %self.id, missed, "switch change subscriber lagged");
                    self.state = SubscriptionState::Streaming;
                    Some(StreamItem::Gap { missed })
                }
                Err(broadcast::error::RecvError::Closed) => {
                    self.close();
                    None
                }
            }
        }
    }

    /// Cancel the subscription. Nothing is delivered afterwards.
    pub fn close(&mut self) {
        if self.receiver.take().is_some() {
            tracing::debug!(subscription = %self.id, "switch change subscription closed");
        }
        self.state = SubscriptionState::Closed;
    }
}
