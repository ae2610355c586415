//! Event classification.
//!
//! Maps each event type to the priority and dashboard category that downstream
//! UI logic depends on for severity coloring and channel routing. Pure and
//! total over the closed [`EventType`] enumeration.

use serde::{Deserialize, Serialize};

use crate::event::EventType;

/// Priority level for notifications.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    /// Informational only.
    #[default]
    Low,
    /// Standard notifications.
    Medium,
    /// Important events.
    High,
    /// Requires immediate attention.
    Critical,
}

/// Dashboard audience a notification belongs to.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Admin,
    RoomService,
    Housekeeping,
    Maintenance,
    #[default]
    General,
}

/// Derived metadata for one event type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    pub priority: Priority,
    pub category: Category,
}

/// Static classification row for a supported event type.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ClassificationRule {
    pub event_type: EventType,
    pub priority: Priority,
    pub category: Category,
}

const CLASSIFICATION_RULES: &[ClassificationRule] = &[
    ClassificationRule {
        event_type: EventType::HousekeepingRequest,
        priority: Priority::Medium,
        category: Category::Housekeeping,
    },
    ClassificationRule {
        event_type: EventType::OrderStarted,
        priority: Priority::High,
        category: Category::RoomService,
    },
    ClassificationRule {
        event_type: EventType::MaintenanceRequest,
        priority: Priority::High,
        category: Category::Maintenance,
    },
    ClassificationRule {
        event_type: EventType::SystemAlert,
        priority: Priority::Critical,
        category: Category::Admin,
    },
];

pub fn classification_rules() -> &'static [ClassificationRule] {
    CLASSIFICATION_RULES
}

/// Classify an event type.
///
/// An event type added to the enumeration without a table row falls back to
/// `low` / `general` rather than failing.
pub fn classify(event_type: EventType) -> Classification {
    CLASSIFICATION_RULES
        .iter()
        .find(|rule| rule.event_type == event_type)
        .map(|rule| Classification {
            priority: rule.priority,
            category: rule.category,
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_ordering() {
        assert!(Priority::Low < Priority::Medium);
        assert!(Priority::Medium < Priority::High);
        assert!(Priority::High < Priority::Critical);
    }

    #[test]
    fn test_priority_display() {
        assert_eq!(Priority::Low.to_string(), "low");
        assert_eq!(Priority::Critical.to_string(), "critical");
    }

    #[test]
    fn test_category_display() {
        assert_eq!(Category::RoomService.to_string(), "room_service");
        assert_eq!(Category::Admin.to_string(), "admin");
    }

    #[test]
    fn test_canonical_classification_table() {
        let cases = [
            (EventType::HousekeepingRequest, Priority::Medium, Category::Housekeeping),
            (EventType::OrderStarted, Priority::High, Category::RoomService),
            (EventType::MaintenanceRequest, Priority::High, Category::Maintenance),
            (EventType::SystemAlert, Priority::Critical, Category::Admin),
        ];
        for (event_type, priority, category) in cases {
            let classification = classify(event_type);
            assert_eq!(classification.priority, priority, "{event_type}");
            assert_eq!(classification.category, category, "{event_type}");
        }
    }

    #[test]
    fn test_every_event_type_has_a_rule() {
        let types = [
            EventType::HousekeepingRequest,
            EventType::OrderStarted,
            EventType::MaintenanceRequest,
            EventType::SystemAlert,
        ];
        for event_type in types {
            assert!(
                classification_rules()
                    .iter()
                    .any(|rule| rule.event_type == event_type),
                "{event_type} missing from classification table"
            );
        }
    }

    #[test]
    fn test_fallback_is_low_general() {
        let fallback = Classification::default();
        assert_eq!(fallback.priority, Priority::Low);
        assert_eq!(fallback.category, Category::General);
    }
}
