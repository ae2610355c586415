//! Bounded, dedup-aware notification store.
//!
//! Insertion order is the only ordering: oldest record at the head, newest at
//! the tail. When the capacity bound is exceeded the head is evicted silently;
//! eviction is a memory-bound policy, not a rejection.

use std::collections::VecDeque;

use tracing::debug;

use crate::error::DuplicateKind;
use crate::record::NotificationRecord;

/// Result of a store insertion.
#[derive(Debug, Clone, PartialEq)]
pub enum InsertOutcome {
    /// Appended at the tail; `evicted` carries the record dropped from the
    /// head when the append exceeded capacity.
    Accepted {
        evicted: Option<NotificationRecord>,
    },
    /// An existing record matched one of the dedup keys; no mutation.
    Duplicate(DuplicateKind),
}

/// Bounded ordered collection of notification records.
#[derive(Debug)]
pub struct NotificationStore {
    records: VecDeque<NotificationRecord>,
    capacity: usize,
}

impl NotificationStore {
    /// Create a store bounded at `capacity` records. A requested capacity of
    /// 0 is clamped to 1; a store that can hold nothing would make every
    /// insert a silent no-op.
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            records: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Insert a record unless a dedup key matches an existing member.
    ///
    /// Existence is checked by `id` first, then by `(type, room_number)`.
    pub fn insert(&mut self, record: NotificationRecord) -> InsertOutcome {
        if self.records.iter().any(|r| r.id == record.id) {
            return InsertOutcome::Duplicate(DuplicateKind::Id);
        }
        if self
            .records
            .iter()
            .any(|r| r.event_type == record.event_type && r.room_number == record.room_number)
        {
            return InsertOutcome::Duplicate(DuplicateKind::TypeAndRoom);
        }

        debug!(
            id = %record.id,
            event_type = %record.event_type,
            room = %record.room_number,
            "notification stored"
        );
        self.records.push_back(record);

        let evicted = if self.records.len() > self.capacity {
            let evicted = self.records.pop_front();
            if let Some(old) = &evicted {
                debug!(id = %old.id, "notification evicted at capacity");
            }
            evicted
        } else {
            None
        };
        InsertOutcome::Accepted { evicted }
    }

    /// Remove the record with the given id, if present.
    pub fn remove(&mut self, id: &str) -> Option<NotificationRecord> {
        let position = self.records.iter().position(|r| r.id == id)?;
        let removed = self.records.remove(position);
        if let Some(record) = &removed {
            debug!(id = %record.id, "notification removed");
        }
        removed
    }

    /// Remove everything, returning the prior records in insertion order.
    pub fn clear(&mut self) -> Vec<NotificationRecord> {
        let prior: Vec<_> = self.records.drain(..).collect();
        debug!(count = prior.len(), "notification store cleared");
        prior
    }

    /// All records in insertion order, as a defensive copy.
    pub fn all(&self) -> Vec<NotificationRecord> {
        self.records.iter().cloned().collect()
    }

    /// Records for one room, insertion order preserved.
    pub fn by_room(&self, room: &str) -> Vec<NotificationRecord> {
        self.records
            .iter()
            .filter(|r| r.room_number.as_str() == room)
            .cloned()
            .collect()
    }

    /// Records matching an arbitrary predicate, insertion order preserved.
    pub fn filter<F>(&self, predicate: F) -> Vec<NotificationRecord>
    where
        F: Fn(&NotificationRecord) -> bool,
    {
        self.records
            .iter()
            .filter(|r| predicate(r))
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::RawEvent;

    fn record(event_type: &str, room: &str, id: &str) -> NotificationRecord {
        let raw = RawEvent::new(event_type, "system_monitor", room).with_id(id);
        let validated = raw.validate().unwrap();
        NotificationRecord::enrich(raw, validated)
    }

    fn accepted(outcome: InsertOutcome) -> Option<NotificationRecord> {
        match outcome {
            InsertOutcome::Accepted { evicted } => evicted,
            other => panic!("expected Accepted, got {other:?}"),
        }
    }

    #[test]
    fn test_insert_and_order() {
        let mut store = NotificationStore::with_capacity(10);
        accepted(store.insert(record("system_alert", "101", "a")));
        accepted(store.insert(record("order_started", "101", "b")));
        accepted(store.insert(record("system_alert", "102", "c")));

        let ids: Vec<_> = store.all().iter().map(|r| r.id.clone()).collect();
        assert_eq!(ids, ["a", "b", "c"]);
    }

    #[test]
    fn test_duplicate_by_id() {
        let mut store = NotificationStore::with_capacity(10);
        accepted(store.insert(record("system_alert", "101", "a")));
        assert_eq!(
            store.insert(record("order_started", "102", "a")),
            InsertOutcome::Duplicate(DuplicateKind::Id)
        );
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_duplicate_by_type_and_room() {
        let mut store = NotificationStore::with_capacity(10);
        accepted(store.insert(record("order_started", "101", "a")));
        assert_eq!(
            store.insert(record("order_started", "101", "b")),
            InsertOutcome::Duplicate(DuplicateKind::TypeAndRoom)
        );
        // Same type for a different room is not a duplicate.
        accepted(store.insert(record("order_started", "102", "c")));
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_eviction_drops_oldest() {
        let mut store = NotificationStore::with_capacity(2);
        accepted(store.insert(record("system_alert", "101", "a")));
        accepted(store.insert(record("system_alert", "102", "b")));

        let evicted = accepted(store.insert(record("system_alert", "103", "c"))).unwrap();
        assert_eq!(evicted.id, "a");
        assert_eq!(store.len(), 2);
        let ids: Vec<_> = store.all().iter().map(|r| r.id.clone()).collect();
        assert_eq!(ids, ["b", "c"]);
    }

    #[test]
    fn test_capacity_zero_clamped() {
        let mut store = NotificationStore::with_capacity(0);
        assert_eq!(store.capacity(), 1);
        accepted(store.insert(record("system_alert", "101", "a")));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_remove() {
        let mut store = NotificationStore::with_capacity(10);
        accepted(store.insert(record("system_alert", "101", "a")));
        assert_eq!(store.remove("a").unwrap().id, "a");
        assert!(store.remove("a").is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn test_clear_returns_prior_records() {
        let mut store = NotificationStore::with_capacity(10);
        accepted(store.insert(record("system_alert", "101", "a")));
        accepted(store.insert(record("order_started", "102", "b")));

        let prior = store.clear();
        assert_eq!(prior.len(), 2);
        assert_eq!(prior[0].id, "a");
        assert!(store.is_empty());
    }

    #[test]
    fn test_by_room_and_filter() {
        let mut store = NotificationStore::with_capacity(10);
        accepted(store.insert(record("system_alert", "101", "a")));
        accepted(store.insert(record("order_started", "102", "b")));
        accepted(store.insert(record("housekeeping_request", "101", "c")));

        let room_101 = store.by_room("101");
        assert_eq!(room_101.len(), 2);
        assert_eq!(room_101[0].id, "a");
        assert_eq!(room_101[1].id, "c");

        let alerts = store.filter(|r| r.event_type == crate::event::EventType::SystemAlert);
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].id, "a");
    }

    #[test]
    fn test_all_is_a_defensive_copy() {
        let mut store = NotificationStore::with_capacity(10);
        accepted(store.insert(record("system_alert", "101", "a")));

        let mut copy = store.all();
        copy.clear();
        assert_eq!(store.len(), 1);
    }
}
