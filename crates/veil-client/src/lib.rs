//! Veil Anonymization Service Client
//!
//! This crate talks to the external anonymization service:
//! - `anonymize`: local entity recognition + `POST /anonymize`
//! - `deanonymize`: `POST /deanonymize` with previously returned operator results
//! - `health`: liveness probe against `GET /health`

pub mod client;
pub mod error;
pub mod service;

pub use client::HttpClientConfig;
pub use error::{ClientError, Result};
pub use service::{ServiceClient, ServiceConfig};
