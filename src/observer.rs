//! Change notification for presentation surfaces
//!
//! A surface subscribes to a component, receives a snapshot on every change
//! through an mpsc channel, and unsubscribes explicitly (or simply drops its
//! receiver, which is pruned on the next notification).

use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};

/// Identifies one subscription within a [`Subscribers`] set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(pub u64);

/// Receiving end handed to a subscriber
#[derive(Debug)]
pub struct Subscription<T> {
    id: SubscriptionId,
    rx: Receiver<T>,
}

impl<T> Subscription<T> {
    pub fn id(&self) -> SubscriptionId {
        self.id
    }

    /// Latest pending snapshot, discarding older ones (non-blocking)
    pub fn latest(&self) -> Option<T> {
        let mut latest = None;
        loop {
            match self.rx.try_recv() {
                Ok(value) => latest = Some(value),
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
        latest
    }

    /// All pending snapshots in order (non-blocking)
    pub fn drain(&self) -> Vec<T> {
        self.rx.try_iter().collect()
    }
}

/// Set of subscribers interested in snapshots of type `T`
#[derive(Debug)]
pub struct Subscribers<T> {
    next_id: u64,
    senders: Vec<(SubscriptionId, Sender<T>)>,
}

impl<T> Default for Subscribers<T> {
    fn default() -> Self {
        Self {
            next_id: 0,
            senders: Vec::new(),
        }
    }
}

impl<T: Clone> Subscribers<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self) -> Subscription<T> {
        let (tx, rx) = mpsc::channel();
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.senders.push((id, tx));
        tracing::debug!("observer: subscription {} added", id.0);
        Subscription { id, rx }
    }

    /// Remove a subscription. Returns false if it was unknown.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.senders.len();
        self.senders.retain(|(sid, _)| *sid != id);
        let removed = self.senders.len() != before;
        if removed {
            tracing::debug!("observer: subscription {} removed", id.0);
        }
        removed
    }

    /// Send a snapshot to every live subscriber
    pub fn notify(&mut self, value: &T) {
        self.senders.retain(|(id, tx)| {
            let alive = tx.send(value.clone()).is_ok();
            if !alive {
                tracing::debug!("observer: pruning dropped subscription {}", id.0);
            }
            alive
        });
    }

    pub fn len(&self) -> usize {
        self.senders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.senders.is_empty()
    }
}
