//! Entity recognizers

mod regex_recognizer;

pub use regex_recognizer::RegexRecognizer;

use veil_core::{Entity, EntityType};

/// Trait for recognizing PII entities in text.
///
/// `detect` is total over its input domain: it never fails, and text without
/// matches yields an empty vec. Implementations must emit entities in their
/// matcher's declared order without merging, deduplicating, or sorting by
/// position. Overlapping detections from different matchers (a credit-card
/// span that also looks like a phone number, say) are all retained, so
/// callers must not assume exclusivity of spans.
pub trait Recognizer: Send + Sync {
    /// Detect PII entities in the given text
    fn detect(&self, text: &str) -> Vec<Entity>;

    /// The entity types this recognizer can report
    fn supported_types(&self) -> Vec<EntityType>;
}
