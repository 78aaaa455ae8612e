//! Regex-based entity recognizer implementation

use crate::recognizer::Recognizer;
use regex::Regex;
use veil_core::{Entity, EntityType};

/// Regex-based PII entity recognizer.
///
/// Each matcher scans the full text for all non-overlapping occurrences of
/// its own pattern (leftmost-first regex semantics) and reports one entity
/// per occurrence with a fixed, matcher-specific confidence score. Matcher
/// outputs are concatenated in declared order.
pub struct RegexRecognizer {
    matchers: Vec<Matcher>,
}

struct Matcher {
    entity_type: EntityType,
    score: f64,
    regex: Regex,
}

impl RegexRecognizer {
    /// Create a recognizer with the built-in matcher set
    pub fn new() -> Result<Self, regex::Error> {
        let matchers = vec![
            Matcher {
                entity_type: EntityType::Email,
                score: 0.9,
                regex: Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b")?,
            },
            // 10 digits in 3-3-4 grouping, optional -/. separators
            Matcher {
                entity_type: EntityType::PhoneNumber,
                score: 0.85,
                regex: Regex::new(r"\b\d{3}[-.]?\d{3}[-.]?\d{4}\b")?,
            },
            // 16 digits in 4-4-4-4 groups, optional -/space separators
            Matcher {
                entity_type: EntityType::CreditCard,
                score: 0.9,
                regex: Regex::new(r"\b\d{4}[-\s]?\d{4}[-\s]?\d{4}[-\s]?\d{4}\b")?,
            },
            Matcher {
                entity_type: EntityType::UsSsn,
                score: 0.9,
                regex: Regex::new(r"\b\d{3}-\d{2}-\d{4}\b")?,
            },
            // Two consecutive capitalized words
            Matcher {
                entity_type: EntityType::Person,
                score: 0.7,
                regex: Regex::new(r"\b[A-Z][a-z]+ [A-Z][a-z]+\b")?,
            },
            // Four dot-separated 1-3 digit groups; no range validation
            Matcher {
                entity_type: EntityType::IpAddress,
                score: 0.85,
                regex: Regex::new(r"\b(?:\d{1,3}\.){3}\d{1,3}\b")?,
            },
            // MM/DD/YYYY or YYYY-MM-DD
            Matcher {
                entity_type: EntityType::DateTime,
                score: 0.8,
                regex: Regex::new(r"\b\d{1,2}/\d{1,2}/\d{4}\b|\b\d{4}-\d{2}-\d{2}\b")?,
            },
        ];

        Ok(Self { matchers })
    }
}

impl Recognizer for RegexRecognizer {
    fn detect(&self, text: &str) -> Vec<Entity> {
        let mut entities = Vec::new();

        for matcher in &self.matchers {
            for m in matcher.regex.find_iter(text) {
                entities.push(Entity::new(
                    m.start(),
                    m.end(),
                    matcher.score,
                    matcher.entity_type,
                ));
            }
        }

        // Deliberately NOT sorted or deduplicated: entities appear grouped by
        // matcher, and overlapping spans across matchers are all kept.
        entities
    }

    fn supported_types(&self) -> Vec<EntityType> {
        self.matchers.iter().map(|m| m.entity_type).collect()
    }
}
