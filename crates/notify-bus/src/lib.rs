//! # Notify Bus
//!
//! In-process, real-time notification bus for the hotel operations backend.
//! Producers (agent handlers, system monitors) submit loosely-typed raw
//! events; the bus validates them against closed enumerations, derives
//! priority and category, deduplicates by id and by `(type, room_number)`,
//! retains a bounded FIFO history, and fans each mutation out synchronously
//! to registered subscribers (dashboard view-models, transport adapters).
//!
//! ## Features
//!
//! - Boundary validation into closed `EventType` / `AgentKind` enums and a
//!   three-digit `RoomNumber` newtype
//! - Table-driven classification to priority and dashboard category
//! - Bounded store with dedup-aware insertion and oldest-first eviction
//! - Ordered synchronous fan-out with per-subscriber panic isolation
//!
//! Delivery is best-effort and history is volatile: nothing is persisted and
//! disconnected subscribers miss what they miss.

pub mod bus;
pub mod classify;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod event;
pub mod record;
pub mod routing;
pub mod store;

/// Re-export key types
pub use bus::{BusStats, NotificationBus};
pub use classify::{Category, Classification, Priority, classification_rules, classify};
pub use config::{BusConfig, DEFAULT_CAPACITY};
pub use dispatch::{BusEvent, BusEventKind, EventDispatcher, SubscriptionHandle};
pub use error::{AddError, DuplicateKind, ValidationError};
pub use event::{AgentKind, EventType, RawEvent, RoomNumber, ValidatedEvent};
pub use record::NotificationRecord;
pub use routing::{ChannelRouting, DEFAULT_CHANNEL};
pub use store::{InsertOutcome, NotificationStore};
