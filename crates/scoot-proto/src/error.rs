//! # Error Types
//!
//! Errors produced by the digest path. All errors use `thiserror` for
//! derive-based `Display` and `Error` implementations.
//!
//! The Time Converter has no error type: every conversion in
//! [`crate::temporal`] is total.

use thiserror::Error;

/// Top-level error type for `scoot-proto`.
#[derive(Error, Debug)]
pub enum ProtoError {
    /// Canonical encoding of a message failed.
    #[error("serialization error: {0}")]
    Serialization(#[from] SerializationError),

    /// A digest string or wire digest did not have the expected shape.
    #[error("invalid digest: {0}")]
    InvalidDigest(String),
}

/// Failure to produce the canonical byte form of a message.
///
/// This is the only failure mode of [`crate::compute_digest`]. There is no
/// partial digest for a message that cannot be encoded.
#[derive(Error, Debug)]
pub enum SerializationError {
    /// The protobuf encoder rejected the message.
    #[error("protobuf encoding failed: {0}")]
    Encode(#[from] prost::EncodeError),

    /// Float values have no canonical JSON form; use integers or strings.
    #[cfg(feature = "jcs")]
    #[error("float values are not permitted in canonical representations: {0}")]
    FloatRejected(f64),

    /// JSON serialization failed.
    #[cfg(feature = "jcs")]
    #[error("json serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}
