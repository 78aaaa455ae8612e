//! Result records for anonymize / de-anonymize calls

use crate::entity::Entity;
use serde::{Deserialize, Serialize};

/// Unified outcome of one anonymize call.
///
/// `entities` keeps the recognizer's emission order (not guaranteed sorted by
/// position). `operator_results` are the service's opaque per-entity records,
/// kept verbatim because a later de-anonymize call must send them back
/// unchanged. Held in memory only; nothing is persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnonymizationResult {
    /// The text submitted for anonymization
    pub original: String,

    /// The anonymized text returned by the service
    pub anonymized: String,

    /// Locally recognized entities, in emission order
    pub entities: Vec<Entity>,

    /// Opaque operator-result records from the service, verbatim
    #[serde(default)]
    pub operator_results: Vec<serde_json::Value>,

    /// Filled in after a successful de-anonymize call for this result
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deanonymized: Option<DeanonymizationResult>,
}

impl AnonymizationResult {
    /// True if the result carries operator records a de-anonymize call needs
    pub fn is_deanonymizable(&self) -> bool {
        !self.operator_results.is_empty()
    }

    /// Augment this result in place with the outcome of a de-anonymize call
    pub fn attach_deanonymized(&mut self, result: DeanonymizationResult) {
        self.deanonymized = Some(result);
    }
}

/// Outcome of one de-anonymize call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeanonymizationResult {
    /// The recovered text
    pub text: String,

    /// Opaque per-item records from the service
    #[serde(default)]
    pub items: Vec<serde_json::Value>,
}
