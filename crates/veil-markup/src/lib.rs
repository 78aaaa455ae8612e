//! Veil Span Rewriting and Highlighting
//!
//! This crate turns text plus detected entities into annotated HTML markup:
//! - `annotate` wraps each entity span in a `<mark>` element
//! - `escape` neutralizes markup-injection characters
//! - `sanitize` strips executable constructs from assembled markup
//!
//! Everything here is pure string transformation with no platform
//! dependency, so it can be unit tested headlessly.

pub mod highlight;
pub mod sanitizer;

pub use highlight::annotate;
pub use sanitizer::{escape, sanitize};
