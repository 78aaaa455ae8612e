//! Operator configuration
//!
//! Maps entity types to the transformation the external anonymization service
//! should apply. The tagged `Operator` enum makes invalid parameter
//! combinations unrepresentable instead of relying on runtime field checks.

use crate::entity::EntityType;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A transformation applied to an entity's text by the anonymization service.
///
/// Serialized with a `type` tag matching the service's wire format, e.g.
/// `{"type": "replace", "new_value": "[REDACTED]"}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Operator {
    /// Replace the entity text with a fixed literal
    Replace {
        new_value: String,
    },

    /// Mask part of the entity text with a masking character
    Mask {
        masking_char: char,
        chars_to_mask: u32,
        from_end: bool,
    },

    /// Remove the entity text entirely
    Redact,

    /// Replace the entity text with a hash of it
    Hash {
        hash_type: String,
    },

    /// Encrypt the entity text (reversible via de-anonymization)
    Encrypt {
        key: String,
    },
}

impl Operator {
    /// Replace with a fixed literal
    pub fn replace(new_value: impl Into<String>) -> Self {
        Operator::Replace {
            new_value: new_value.into(),
        }
    }

    /// Mask `chars_to_mask` characters with `masking_char`
    pub fn mask(masking_char: char, chars_to_mask: u32, from_end: bool) -> Self {
        Operator::Mask {
            masking_char,
            chars_to_mask,
            from_end,
        }
    }

    /// True for operators whose output the service can reverse
    pub fn is_reversible(&self) -> bool {
        matches!(self, Operator::Encrypt { .. })
    }
}

/// Per-entity-type operator configuration.
///
/// An entity type absent from the map falls back to the `DEFAULT` entry.
/// The configuration is user-editable process state; the client serializes
/// a snapshot of it into each outgoing request, so a request in flight
/// never observes later edits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OperatorConfig {
    operators: BTreeMap<EntityType, Operator>,
}

impl OperatorConfig {
    /// Empty configuration (no fallback entry either)
    pub fn empty() -> Self {
        Self {
            operators: BTreeMap::new(),
        }
    }

    /// Set the operator for an entity type
    pub fn set(&mut self, entity_type: EntityType, operator: Operator) -> &mut Self {
        self.operators.insert(entity_type, operator);
        self
    }

    /// Builder-style variant of [`set`](Self::set)
    pub fn with(mut self, entity_type: EntityType, operator: Operator) -> Self {
        self.operators.insert(entity_type, operator);
        self
    }

    /// Look up the operator for an entity type, falling back to `DEFAULT`
    pub fn operator_for(&self, entity_type: EntityType) -> Option<&Operator> {
        self.operators
            .get(&entity_type)
            .or_else(|| self.operators.get(&EntityType::Default))
    }

    /// Iterate over configured (entity type, operator) pairs
    pub fn iter(&self) -> impl Iterator<Item = (&EntityType, &Operator)> {
        self.operators.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.operators.is_empty()
    }
}

impl Default for OperatorConfig {
    /// The stock configuration shipped with the UI defaults.
    fn default() -> Self {
        Self::empty()
            .with(EntityType::Default, Operator::replace("[REDACTED]"))
            .with(
                EntityType::PhoneNumber,
                Operator::replace("--Redacted phone number--"),
            )
            .with(EntityType::Email, Operator::replace("--Redacted email--"))
            .with(EntityType::CreditCard, Operator::mask('*', 12, true))
            .with(EntityType::Person, Operator::replace("[PERSON]"))
            .with(EntityType::DateTime, Operator::replace("[DATE]"))
            .with(EntityType::IpAddress, Operator::replace("[IP]"))
            .with(EntityType::UsSsn, Operator::mask('*', 5, true))
    }
}
