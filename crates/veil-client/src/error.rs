//! Client error taxonomy

use thiserror::Error;

/// Failures surfaced by the anonymize / de-anonymize operations.
///
/// `InvalidInput` and `MissingKey` are detected synchronously before any
/// network activity. A call produces exactly one failure value; there are no
/// partial or degraded success states.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Empty/whitespace-only text, or missing operator results
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// De-anonymization attempted without an explicitly configured key
    #[error("De-anonymization key not configured; set VEIL_DECRYPT_KEY or supply a key")]
    MissingKey,

    /// Network unreachable, timeout, connection reset
    #[error("Transport failure: {0}")]
    Transport(#[from] reqwest::Error),

    /// Non-success status from the service, body preserved for diagnostics
    #[error("Service returned status {status}: {body}")]
    Service { status: u16, body: String },

    /// Response body missing expected fields or not parseable
    #[error("Malformed service response: {0}")]
    MalformedResponse(String),

    /// Client-side configuration problem (e.g. HTTP client construction)
    #[error("Invalid configuration: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, ClientError>;
