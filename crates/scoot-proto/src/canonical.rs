//! # Canonical Encoding — Deterministic Byte Production
//!
//! This module defines `CanonicalBytes`, the sole input accepted by the
//! digest path, and the `CanonicalEncode` capability that produces it.
//!
//! ## Invariant
//!
//! `CanonicalBytes` has a private inner field. The only way to obtain one is
//! through a `CanonicalEncode` implementation in this module, so no caller can
//! hash bytes that skipped canonicalization.
//!
//! ## Encodings
//!
//! 1. **Protobuf** — every `prost::Message` is canonically encodable. prost
//!    writes fields in ascending tag order and omits default scalars, so a
//!    message with no fields set encodes to zero bytes. Message types used as
//!    cache keys must not carry `HashMap` map fields, whose iteration order is
//!    unspecified; use `btree_map` instead.
//! 2. **JSON (RFC 8785)** — behind the `jcs` feature, [`Jcs`] wraps any serde
//!    value and emits JCS output: sorted keys, compact separators. Floats are
//!    rejected because their JCS number form has cross-language edge cases.

use crate::error::SerializationError;

/// Bytes produced exclusively by a canonical encoding.
///
/// Two values that are logically equal under their schema produce equal
/// `CanonicalBytes`; the digest of a message is the digest of these bytes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CanonicalBytes(Vec<u8>);

impl CanonicalBytes {
    /// Access the canonical bytes for digest computation.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Returns the length of the canonical byte sequence.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the encoding is zero bytes (an empty or default message).
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl AsRef<[u8]> for CanonicalBytes {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// A message with a deterministic byte encoding.
///
/// Implementations must return identical bytes for identical logical values,
/// independent of construction order or prior calls.
pub trait CanonicalEncode {
    /// Encode `self` into its canonical byte form.
    ///
    /// # Errors
    ///
    /// Returns [`SerializationError`] if the value has no canonical form.
    fn canonical_bytes(&self) -> Result<CanonicalBytes, SerializationError>;
}

impl<M: prost::Message> CanonicalEncode for M {
    fn canonical_bytes(&self) -> Result<CanonicalBytes, SerializationError> {
        let mut buf = Vec::with_capacity(self.encoded_len());
        self.encode(&mut buf)?;
        Ok(CanonicalBytes(buf))
    }
}

/// A serde value encoded as RFC 8785 canonical JSON.
///
/// ```
/// use scoot_proto::{CanonicalEncode, Jcs};
///
/// let cb = Jcs(serde_json::json!({"b": 2, "a": 1})).canonical_bytes().unwrap();
/// assert_eq!(cb.as_bytes(), br#"{"a":1,"b":2}"#);
/// ```
#[cfg(feature = "jcs")]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Jcs<T>(pub T);

#[cfg(feature = "jcs")]
impl<T: serde::Serialize> CanonicalEncode for Jcs<T> {
    fn canonical_bytes(&self) -> Result<CanonicalBytes, SerializationError> {
        let value = serde_json::to_value(&self.0)?;
        reject_floats(&value)?;
        let s = serde_jcs::to_string(&value)?;
        Ok(CanonicalBytes(s.into_bytes()))
    }
}

/// Walk a JSON tree and fail on the first non-integer number.
#[cfg(feature = "jcs")]
fn reject_floats(value: &serde_json::Value) -> Result<(), SerializationError> {
    use serde_json::Value;

    match value {
        Value::Null | Value::Bool(_) | Value::String(_) => Ok(()),
        Value::Number(n) => {
            if n.is_f64() {
                if let Some(f) = n.as_f64() {
                    return Err(SerializationError::FloatRejected(f));
                }
            }
            Ok(())
        }
        Value::Array(items) => items.iter().try_for_each(reject_floats),
        Value::Object(map) => map.values().try_for_each(reject_floats),
    }
}
