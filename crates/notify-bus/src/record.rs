//! Canonical notification records and enrichment.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::classify::{Category, Classification, Priority, classify};
use crate::event::{AgentKind, EventType, RawEvent, RoomNumber, ValidatedEvent};

/// A validated, enriched notification. Immutable once stored: "updating" a
/// notification means remove-then-add.
///
/// `priority` and `category` are always derived by the classifier, never
/// accepted from the producer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationRecord {
    /// Globally unique within the process lifetime. Taken from the raw event
    /// when supplied, otherwise generated (UUID v7: creation-time ordered
    /// with a random suffix).
    pub id: String,
    #[serde(rename = "type")]
    pub event_type: EventType,
    pub agent: AgentKind,
    pub room_number: RoomNumber,
    pub timestamp: DateTime<Utc>,
    pub priority: Priority,
    pub category: Category,
    /// Opaque producer fields, carried through unchanged.
    #[serde(flatten)]
    pub payload: Map<String, Value>,
}

/// Record field names the payload must not carry. A raw JSON event with e.g.
/// a top-level `"priority"` key lands in the flattened payload (RawEvent has
/// no such field) and would otherwise shadow the derived value when the
/// record is serialized back out.
const RESERVED_FIELDS: &[&str] = &[
    "id",
    "type",
    "agent",
    "room_number",
    "timestamp",
    "priority",
    "category",
];

impl NotificationRecord {
    /// Build a record from a raw event and its validated view, filling in
    /// derived and defaulted fields.
    ///
    /// Payload keys colliding with record field names are dropped; derived
    /// metadata is never accepted from the producer.
    pub fn enrich(raw: RawEvent, validated: ValidatedEvent) -> Self {
        let Classification { priority, category } = classify(validated.event_type);
        let mut payload = raw.payload;
        for field in RESERVED_FIELDS {
            payload.remove(*field);
        }
        Self {
            id: raw.id.unwrap_or_else(|| Uuid::now_v7().to_string()),
            event_type: validated.event_type,
            agent: validated.agent,
            room_number: validated.room_number,
            timestamp: raw.timestamp.unwrap_or_else(Utc::now),
            priority,
            category,
            payload,
        }
    }
}
