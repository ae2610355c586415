//! The notification bus facade.
//!
//! Composes validation, classification, the bounded store, and the dispatcher
//! into the public producer/consumer surface. One bus instance is constructed
//! at process start and shared (typically as `Arc<NotificationBus>`) for the
//! process lifetime; `clear` is the only way to reset record state without a
//! restart.

use parking_lot::Mutex;
use serde::Serialize;
use tracing::debug;

use crate::config::BusConfig;
use crate::dispatch::{BusEvent, BusEventKind, EventDispatcher, SubscriptionHandle};
use crate::error::AddError;
use crate::event::RawEvent;
use crate::record::NotificationRecord;
use crate::store::{InsertOutcome, NotificationStore};

/// Point-in-time counters for diagnostics.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct BusStats {
    pub stored: usize,
    pub capacity: usize,
    pub subscribers: usize,
}

struct BusInner {
    store: NotificationStore,
    dispatcher: EventDispatcher,
}

/// Process-wide notification bus.
///
/// All operations take `&self`; a single coarse mutex serializes every
/// mutation together with its dispatch, so a reader never observes the store
/// mid-insert and subscribers never observe interleaved dispatches for the
/// same event kind. By the time `add`/`remove`/`clear` returns, every
/// subscriber has observed the change.
pub struct NotificationBus {
    inner: Mutex<BusInner>,
}

impl NotificationBus {
    pub fn new() -> Self {
        Self::with_config(BusConfig::default())
    }

    pub fn with_config(config: BusConfig) -> Self {
        Self {
            inner: Mutex::new(BusInner {
                store: NotificationStore::with_capacity(config.capacity),
                dispatcher: EventDispatcher::new(),
            }),
        }
    }

    /// Validate, enrich, store, and dispatch a raw event.
    ///
    /// Returns true when the record was inserted and every `add` subscriber
    /// notified; false when the event failed validation or was rejected as a
    /// duplicate. Rejects are expected, frequent outcomes; use [`try_add`]
    /// when the reason matters.
    ///
    /// [`try_add`]: Self::try_add
    pub fn add(&self, raw: RawEvent) -> bool {
        self.try_add(raw).is_ok()
    }

    /// The reason-bearing form of [`add`](Self::add); returns the stored
    /// record on success.
    pub fn try_add(&self, raw: RawEvent) -> Result<NotificationRecord, AddError> {
        let validated = raw.validate()?;
        let record = NotificationRecord::enrich(raw, validated);

        let mut inner = self.inner.lock();
        match inner.store.insert(record.clone()) {
            InsertOutcome::Duplicate(kind) => Err(AddError::Duplicate(kind)),
            InsertOutcome::Accepted { evicted: _ } => {
                let delivered = inner.dispatcher.publish(&BusEvent::Added(record.clone()));
                debug!(id = %record.id, delivered, "notification dispatched");
                Ok(record)
            }
        }
    }

    /// Remove a record by id. Returns false when no record carries that id.
    pub fn remove(&self, id: &str) -> bool {
        self.try_remove(id).is_some()
    }

    /// Remove a record by id, returning it and dispatching a `remove` event
    /// when found.
    pub fn try_remove(&self, id: &str) -> Option<NotificationRecord> {
        let mut inner = self.inner.lock();
        let removed = inner.store.remove(id)?;
        inner.dispatcher.publish(&BusEvent::Removed(removed.clone()));
        Some(removed)
    }

    /// Remove all records and dispatch a single `clear` event carrying the
    /// full prior record set. The event fires even when the store was already
    /// empty; subscribers get a consistent signal that a reset happened.
    pub fn clear(&self) {
        let mut inner = self.inner.lock();
        let prior = inner.store.clear();
        inner.dispatcher.publish(&BusEvent::Cleared(prior));
    }

    /// All records in insertion order, as defensive copies.
    pub fn get_all(&self) -> Vec<NotificationRecord> {
        self.inner.lock().store.all()
    }

    /// Records for one room, insertion order preserved.
    pub fn get_by_room(&self, room: &str) -> Vec<NotificationRecord> {
        self.inner.lock().store.by_room(room)
    }

    /// Records matching a caller-supplied predicate, insertion order
    /// preserved.
    pub fn filter<F>(&self, predicate: F) -> Vec<NotificationRecord>
    where
        F: Fn(&NotificationRecord) -> bool,
    {
        self.inner.lock().store.filter(predicate)
    }

    /// Register a subscriber for one event kind.
    ///
    /// Callbacks run inside the bus critical section; a callback must not
    /// call back into the bus (the mutex is not re-entrant, so re-entry
    /// deadlocks), and a blocking callback blocks the bus. Integrators wiring
    /// a transport queue the actual write off the callback.
    pub fn on<F>(&self, kind: BusEventKind, callback: F) -> SubscriptionHandle
    where
        F: Fn(&BusEvent) + Send + 'static,
    {
        self.inner.lock().dispatcher.subscribe(kind, callback)
    }

    /// Drop a subscription. Returns false if the handle was already removed.
    pub fn off(&self, handle: SubscriptionHandle) -> bool {
        self.inner.lock().dispatcher.unsubscribe(handle)
    }

    pub fn len(&self) -> usize {
        self.inner.lock().store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().store.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.inner.lock().store.capacity()
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner.lock().dispatcher.subscriber_count()
    }

    pub fn stats(&self) -> BusStats {
        let inner = self.inner.lock();
        BusStats {
            stored: inner.store.len(),
            capacity: inner.store.capacity(),
            subscribers: inner.dispatcher.subscriber_count(),
        }
    }
}

impl Default for NotificationBus {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for NotificationBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let stats = self.stats();
        f.debug_struct("NotificationBus")
            .field("stored", &stats.stored)
            .field("capacity", &stats.capacity)
            .field("subscribers", &stats.subscribers)
            .finish()
    }
}
