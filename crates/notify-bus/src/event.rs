//! Raw producer events and boundary validation.
//!
//! Producers hand the bus a loosely-typed [`RawEvent`]; nothing in it is
//! trusted until [`RawEvent::validate`] has parsed the required fields into
//! the closed enumerations. Anything outside those sets is rejected.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::ValidationError;

/// Closed set of notification event types.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display, strum::EnumString,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    HousekeepingRequest,
    OrderStarted,
    MaintenanceRequest,
    SystemAlert,
}

/// Closed set of producer identities.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display, strum::EnumString,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum AgentKind {
    RoomServiceAgent,
    HousekeepingAgent,
    MaintenanceAgent,
    AdminAgent,
    SystemMonitor,
}

/// A validated hotel room number: exactly three ASCII digits.
///
/// Constructed only through parsing, so every stored record's room number is
/// well-formed by construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RoomNumber(String);

impl RoomNumber {
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        if input.len() == 3 && input.chars().all(|c| c.is_ascii_digit()) {
            Ok(Self(input.to_string()))
        } else {
            Err(ValidationError::InvalidRoomNumber(input.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for RoomNumber {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for RoomNumber {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<RoomNumber> for String {
    fn from(room: RoomNumber) -> Self {
        room.0
    }
}

impl std::fmt::Display for RoomNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A raw event as submitted by a producer, before validation.
///
/// Required fields are `Option` so that absence is representable and reported
/// by validation rather than by a deserialize error. Fields the bus does not
/// interpret are captured in `payload` and carried through unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawEvent {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub event_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agent: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub room_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub payload: Map<String, Value>,
}

impl RawEvent {
    /// Create a raw event with the three required fields set.
    pub fn new(
        event_type: impl Into<String>,
        agent: impl Into<String>,
        room_number: impl Into<String>,
    ) -> Self {
        Self {
            event_type: Some(event_type.into()),
            agent: Some(agent.into()),
            room_number: Some(room_number.into()),
            ..Self::default()
        }
    }

    /// Supply an explicit id (enables idempotent re-submission by a retrying
    /// producer).
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    /// Attach an opaque payload field; the bus carries it through unchanged.
    pub fn with_payload_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.payload.insert(key.into(), value.into());
        self
    }

    /// Validate the required fields against the closed enumerations.
    ///
    /// Absence is checked before format, in field order (`type`, `agent`,
    /// `room_number`). The raw event itself is not coerced; the returned view
    /// is consumed by enrichment together with the raw event.
    pub fn validate(&self) -> Result<ValidatedEvent, ValidationError> {
        let raw_type = self
            .event_type
            .as_deref()
            .ok_or(ValidationError::MissingField("type"))?;
        let raw_agent = self
            .agent
            .as_deref()
            .ok_or(ValidationError::MissingField("agent"))?;
        let raw_room = self
            .room_number
            .as_deref()
            .ok_or(ValidationError::MissingField("room_number"))?;

        let event_type = raw_type
            .parse::<EventType>()
            .map_err(|_| ValidationError::InvalidType(raw_type.to_string()))?;
        let agent = raw_agent
            .parse::<AgentKind>()
            .map_err(|_| ValidationError::InvalidAgent(raw_agent.to_string()))?;
        let room_number = RoomNumber::parse(raw_room)?;

        Ok(ValidatedEvent {
            event_type,
            agent,
            room_number,
        })
    }
}

/// The parsed closed-enum view of a raw event that passed validation.
#[derive(Debug, Clone)]
pub struct ValidatedEvent {
    pub event_type: EventType,
    pub agent: AgentKind,
    pub room_number: RoomNumber,
}
