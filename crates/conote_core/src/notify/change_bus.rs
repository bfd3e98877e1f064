//! Publish/subscribe channel for durable-slot mutations.
//!
//! # Responsibility
//! - Deliver slot-change events to every instance except the mutating one.
//! - Keep subscribe/unsubscribe an explicit, deterministic lifecycle.
//!
//! # Invariants
//! - A publish is enqueued at most once per other live subscriber and
//!   never for its origin.
//! - Delivery order relative to a receiver's own in-flight operations is
//!   not guaranteed; receivers drain their mailbox when they choose to.

use std::collections::{BTreeMap, VecDeque};
use std::sync::{Arc, Mutex, PoisonError};

/// Handle identifying one subscriber on a bus.
pub type SubscriberId = u64;

/// One slot mutation as observed by other instances.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeEvent {
    /// Name of the mutated slot.
    pub slot: String,
    /// The slot's new serialized payload.
    pub payload: String,
}

type Mailbox = Arc<Mutex<VecDeque<ChangeEvent>>>;

/// Subscription handle owning a private event mailbox.
///
/// Events accumulate until the owner drains them; dropping the handle
/// without unsubscribing leaves the bus entry behind, so owners
/// unsubscribe at teardown.
#[derive(Debug, Clone)]
pub struct Subscription {
    id: SubscriberId,
    mailbox: Mailbox,
}

impl Subscription {
    pub fn id(&self) -> SubscriberId {
        self.id
    }

    /// Takes every pending event, oldest first.
    pub fn drain(&self) -> Vec<ChangeEvent> {
        let mut queue = self
            .mailbox
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        queue.drain(..).collect()
    }
}

/// Broadcast contract between instances sharing one durable medium.
pub trait ChangeBus: Send + Sync {
    /// Registers a new subscriber and returns its mailbox handle.
    fn subscribe(&self) -> Subscription;
    /// Enqueues `event` for every subscriber except `origin`.
    fn publish(&self, origin: SubscriberId, event: ChangeEvent);
    /// Removes a subscriber; unknown ids are a no-op.
    fn unsubscribe(&self, id: SubscriberId);
}

#[derive(Default)]
struct BusState {
    next_id: SubscriberId,
    mailboxes: BTreeMap<SubscriberId, Mailbox>,
}

/// In-process change bus shared by instances in one process.
#[derive(Default)]
pub struct LocalChangeBus {
    state: Mutex<BusState>,
}

impl LocalChangeBus {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    #[cfg(test)]
    fn subscriber_count(&self) -> usize {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .mailboxes
            .len()
    }
}

impl ChangeBus for LocalChangeBus {
    fn subscribe(&self) -> Subscription {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        let id = state.next_id;
        state.next_id += 1;
        let mailbox: Mailbox = Arc::default();
        state.mailboxes.insert(id, Arc::clone(&mailbox));
        Subscription { id, mailbox }
    }

    fn publish(&self, origin: SubscriberId, event: ChangeEvent) {
        let state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        for (id, mailbox) in &state.mailboxes {
            if *id == origin {
                continue;
            }
            let mut queue = mailbox.lock().unwrap_or_else(PoisonError::into_inner);
            queue.push_back(event.clone());
        }
    }

    fn unsubscribe(&self, id: SubscriberId) {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        state.mailboxes.remove(&id);
    }
}
