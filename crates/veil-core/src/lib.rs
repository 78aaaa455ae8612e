//! Veil Core Types
//!
//! This crate provides the fundamental types shared across Veil:
//! - Detected PII entities and their wire representation
//! - Operator configuration (replace/mask/redact/hash/encrypt)
//! - Anonymization and de-anonymization result records

pub mod entity;
pub mod operator;
pub mod results;

pub use entity::{Entity, EntityType};
pub use operator::{Operator, OperatorConfig};
pub use results::{AnonymizationResult, DeanonymizationResult};
