//! Detected PII entities

use serde::{Deserialize, Serialize};

/// One detected PII occurrence in a piece of text.
///
/// Offsets are byte offsets into the *original* text, with
/// `0 <= start < end <= text.len()`. All built-in patterns match ASCII only,
/// so byte offsets coincide with character offsets for every matched span.
///
/// Entities are produced in bulk per analysis call and never mutated.
/// Recognizers do not deduplicate or conflict-resolve: multiple matchers may
/// report overlapping spans for the same region, and consumers must tolerate
/// that.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    /// Start position in the original text
    pub start: usize,

    /// End position in the original text (exclusive)
    pub end: usize,

    /// Confidence score (0.0 to 1.0)
    pub score: f64,

    /// Type of PII detected
    pub entity_type: EntityType,
}

impl Entity {
    /// Create a new entity
    pub fn new(start: usize, end: usize, score: f64, entity_type: EntityType) -> Self {
        Self {
            start,
            end,
            score,
            entity_type,
        }
    }

    /// The slice of `text` this entity covers.
    ///
    /// Returns `None` if the span does not fall on valid boundaries of `text`
    /// (e.g. the entity belongs to a different string).
    pub fn slice<'a>(&self, text: &'a str) -> Option<&'a str> {
        text.get(self.start..self.end)
    }
}

/// Types of PII that can be detected.
///
/// Serialized with the external service's wire names (`EMAIL`,
/// `PHONE_NUMBER`, ...). `Default` is the fallback bucket for any entity
/// type without an explicit operator configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EntityType {
    /// Email address
    Email,

    /// Phone number
    PhoneNumber,

    /// Credit card number
    CreditCard,

    /// US Social Security Number
    UsSsn,

    /// Person name
    Person,

    /// IPv4 address
    IpAddress,

    /// Date
    DateTime,

    /// Fallback for unconfigured entity types
    Default,
}

impl EntityType {
    /// Wire name used by the external service
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityType::Email => "EMAIL",
            EntityType::PhoneNumber => "PHONE_NUMBER",
            EntityType::CreditCard => "CREDIT_CARD",
            EntityType::UsSsn => "US_SSN",
            EntityType::Person => "PERSON",
            EntityType::IpAddress => "IP_ADDRESS",
            EntityType::DateTime => "DATE_TIME",
            EntityType::Default => "DEFAULT",
        }
    }
}

impl std::fmt::Display for EntityType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_wire_shape() {
        let entity = Entity::new(14, 30, 0.9, EntityType::Email);
        let json = serde_json::to_value(&entity).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "start": 14,
                "end": 30,
                "score": 0.9,
                "entity_type": "EMAIL"
            })
        );
    }

    #[test]
    fn test_entity_type_wire_names() {
        assert_eq!(EntityType::PhoneNumber.to_string(), "PHONE_NUMBER");
        assert_eq!(EntityType::UsSsn.to_string(), "US_SSN");
        assert_eq!(EntityType::IpAddress.to_string(), "IP_ADDRESS");
        assert_eq!(EntityType::DateTime.to_string(), "DATE_TIME");
        assert_eq!(EntityType::Default.to_string(), "DEFAULT");
    }

    #[test]
    fn test_entity_type_roundtrip() {
        for ty in [
            EntityType::Email,
            EntityType::PhoneNumber,
            EntityType::CreditCard,
            EntityType::UsSsn,
            EntityType::Person,
            EntityType::IpAddress,
            EntityType::DateTime,
            EntityType::Default,
        ] {
            let json = serde_json::to_string(&ty).unwrap();
            assert_eq!(json, format!("\"{}\"", ty.as_str()));
            let back: EntityType = serde_json::from_str(&json).unwrap();
            assert_eq!(back, ty);
        }
    }

    #[test]
    fn test_entity_slice() {
        let text = "Contact me at jane@example.com today";
        let entity = Entity::new(14, 30, 0.9, EntityType::Email);
        assert_eq!(entity.slice(text), Some("jane@example.com"));

        let out_of_bounds = Entity::new(30, 100, 0.9, EntityType::Email);
        assert_eq!(out_of_bounds.slice(text), None);
    }
}
