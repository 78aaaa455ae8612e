//! Veil PII Entity Recognition
//!
//! This crate provides pattern-based PII entity recognition:
//! - Email, phone, credit card, SSN, person name, IP address, date detection
//! - Fixed per-matcher confidence scores
//! - Total `detect` (never fails; no matches yields an empty vec)

pub mod recognizer;

pub use recognizer::{Recognizer, RegexRecognizer};
