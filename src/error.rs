//! Error types for Elasticsearch operations.
//!
//! Validation failures render as the machine-readable tokens the wire API
//! has always used (`not_index`, `invalid_body`, ...), so callers that match
//! on the message keep working across client versions.

use crate::transport::RawResponse;
use thiserror::Error;

/// Elasticsearch client error type.
#[derive(Error, Debug)]
pub enum EsError {
    /// Configuration was not supplied (JSON `null`).
    #[error("not_config")]
    MissingConfig,

    /// Configuration is not a keyed mapping.
    #[error("invalid_config")]
    InvalidConfig,

    /// Option bag was not supplied (JSON `null`).
    #[error("not_options")]
    MissingOptions,

    /// Option bag is not a keyed mapping.
    #[error("invalid_options")]
    InvalidOptions,

    /// A required option is absent (or an empty string).
    #[error("not_{0}")]
    MissingOption(&'static str),

    /// An option is present but has the wrong shape for its declared kind.
    #[error("invalid_{0}")]
    InvalidOption(&'static str),

    /// Body serialization failed.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Request signing failed.
    #[error("signing error: {0}")]
    Signing(String),

    /// Network-level failure; no response was received.
    #[error("transport error: {0}")]
    Transport(String),

    /// A response arrived but its body is not valid JSON. The raw response
    /// is retained for diagnosis.
    #[error("decode error (status {}): {source}", .raw.status)]
    Decode {
        /// The undecodable response.
        raw: RawResponse,
        /// The underlying parse failure.
        #[source]
        source: serde_json::Error,
    },

    /// The existence probe returned a status that is neither 200 nor 404.
    #[error("status code {0}")]
    UnexpectedStatus(u16),
}

/// Result type alias for Elasticsearch operations.
pub type Result<T> = std::result::Result<T, EsError>;
