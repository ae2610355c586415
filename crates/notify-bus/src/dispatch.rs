//! Subscriber registry and synchronous fan-out.
//!
//! Dispatch is an explicit, ordered call list: subscribers for an event kind
//! run synchronously, in registration order, before the triggering mutation
//! returns. A panicking subscriber is isolated and logged; the remaining
//! subscribers in the same publish still run.
//!
//! Isolation relies on stack unwinding. Builds compiled with `panic = "abort"`
//! turn a subscriber panic into a process abort instead.

use std::collections::HashMap;
use std::panic::{AssertUnwindSafe, catch_unwind};

use serde::Serialize;
use tracing::error;

use crate::record::NotificationRecord;

/// The three bus mutations subscribers can observe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, strum::Display)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum BusEventKind {
    Add,
    Remove,
    Clear,
}

/// Payload delivered to subscribers on a bus mutation.
#[derive(Debug, Clone, Serialize)]
pub enum BusEvent {
    /// A record was validated, stored, and is now visible via `get_all`.
    Added(NotificationRecord),
    /// A record was removed by id.
    Removed(NotificationRecord),
    /// The store was reset; carries the full prior record set in insertion
    /// order (possibly empty).
    Cleared(Vec<NotificationRecord>),
}

impl BusEvent {
    pub fn kind(&self) -> BusEventKind {
        match self {
            Self::Added(_) => BusEventKind::Add,
            Self::Removed(_) => BusEventKind::Remove,
            Self::Cleared(_) => BusEventKind::Clear,
        }
    }
}

/// Opaque token returned by `subscribe`, used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionHandle {
    kind: BusEventKind,
    id: u64,
}

impl SubscriptionHandle {
    pub fn kind(&self) -> BusEventKind {
        self.kind
    }
}

type Callback = Box<dyn Fn(&BusEvent) + Send + 'static>;

/// Ordered subscriber registry keyed by event kind.
///
/// Not internally synchronized; the bus serializes access behind its own
/// mutex.
#[derive(Default)]
pub struct EventDispatcher {
    subscribers: HashMap<BusEventKind, Vec<(u64, Callback)>>,
    next_id: u64,
}

impl EventDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a callback for one event kind. Duplicate registrations of the
    /// same callback are permitted; each is invoked independently.
    pub fn subscribe<F>(&mut self, kind: BusEventKind, callback: F) -> SubscriptionHandle
    where
        F: Fn(&BusEvent) + Send + 'static,
    {
        let id = self.next_id;
        self.next_id += 1;
        self.subscribers
            .entry(kind)
            .or_default()
            .push((id, Box::new(callback)));
        SubscriptionHandle { kind, id }
    }

    /// Drop a registration. Returns false if the handle was already removed.
    pub fn unsubscribe(&mut self, handle: SubscriptionHandle) -> bool {
        let Some(list) = self.subscribers.get_mut(&handle.kind) else {
            return false;
        };
        let before = list.len();
        list.retain(|(id, _)| *id != handle.id);
        list.len() != before
    }

    /// Invoke every subscriber registered for the event's kind, in
    /// registration order. Returns the number of subscribers invoked.
    ///
    /// Each call is isolated: a panic is caught, logged, and does not prevent
    /// later subscribers from running.
    pub fn publish(&self, event: &BusEvent) -> usize {
        let Some(list) = self.subscribers.get(&event.kind()) else {
            return 0;
        };
        for (id, callback) in list {
            if catch_unwind(AssertUnwindSafe(|| callback(event))).is_err() {
                error!(
                    kind = %event.kind(),
                    subscriber = id,
                    "subscriber panicked during dispatch"
                );
            }
        }
        list.len()
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.values().map(Vec::len).sum()
    }

    pub fn subscriber_count_for(&self, kind: BusEventKind) -> usize {
        self.subscribers.get(&kind).map_or(0, Vec::len)
    }

    /// Remove all registrations (host teardown aid).
    pub fn clear_subscribers(&mut self) {
        self.subscribers.clear();
    }
}

impl std::fmt::Debug for EventDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventDispatcher")
            .field("subscribers", &self.subscriber_count())
            .field("next_id", &self.next_id)
            .finish()
    }
}
