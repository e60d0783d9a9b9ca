//! # Content Digest — Cache Keys for Messages
//!
//! Defines `ContentDigest` and `compute_digest()`, the serialize-then-hash
//! path that names actions, commands, and input trees in the remote-execution
//! cache.
//!
//! ## Invariant
//!
//! A `ContentDigest` is computed only from `CanonicalBytes`. Two messages with
//! identical canonical bytes always share a digest, and an absent or empty
//! message always maps to [`EMPTY_SHA256`] with a size of zero.

use std::fmt;
use std::str::FromStr;

use sha2::{Digest, Sha256};

use crate::canonical::{CanonicalBytes, CanonicalEncode};
use crate::error::{ProtoError, SerializationError};

/// SHA-256 of zero bytes, the digest of every absent or empty message.
pub const EMPTY_SHA256: &str = "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855";

const EMPTY_SHA256_BYTES: [u8; 32] = [
    0xe3, 0xb0, 0xc4, 0x42, 0x98, 0xfc, 0x1c, 0x14, 0x9a, 0xfb, 0xf4, 0xc8, 0x99, 0x6f, 0xb9, 0x24,
    0x27, 0xae, 0x41, 0xe4, 0x64, 0x9b, 0x93, 0x4c, 0xa4, 0x95, 0x99, 0x1b, 0x78, 0x52, 0xb8, 0x55,
];

/// Length of a hex-encoded SHA-256 hash.
pub const SHA256_HEX_LEN: usize = 64;

/// A SHA-256 digest paired with the length of the bytes it was computed over.
///
/// The string form is `{hex}/{size_bytes}`, the same shape CAS resource
/// names use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContentDigest {
    hash: [u8; 32],
    size_bytes: i64,
}

impl ContentDigest {
    /// The sentinel digest for absent or empty input.
    pub const fn empty() -> Self {
        Self {
            hash: EMPTY_SHA256_BYTES,
            size_bytes: 0,
        }
    }

    /// Hash canonical bytes.
    ///
    /// Zero-length input yields [`ContentDigest::empty()`] without hashing.
    pub fn of(data: &CanonicalBytes) -> Self {
        if data.is_empty() {
            return Self::empty();
        }
        let mut hash = [0u8; 32];
        hash.copy_from_slice(&Sha256::digest(data.as_bytes()));
        Self {
            hash,
            size_bytes: data.len() as i64,
        }
    }

    /// Build a digest from a hex hash and a size, as carried on the wire.
    ///
    /// # Errors
    ///
    /// Returns [`ProtoError::InvalidDigest`] unless `hash` is exactly 64
    /// lowercase hex characters and `size_bytes` is non-negative.
    pub fn from_hex(hash: &str, size_bytes: i64) -> Result<Self, ProtoError> {
        if hash.len() != SHA256_HEX_LEN
            || !hash.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
        {
            return Err(ProtoError::InvalidDigest(format!(
                "hash must be {SHA256_HEX_LEN} lowercase hex characters, got: {hash:?}"
            )));
        }
        if size_bytes < 0 {
            return Err(ProtoError::InvalidDigest(format!(
                "size must be non-negative, got: {size_bytes}"
            )));
        }
        let mut bytes = [0u8; 32];
        hex::decode_to_slice(hash, &mut bytes)
            .map_err(|e| ProtoError::InvalidDigest(format!("bad hex {hash:?}: {e}")))?;
        Ok(Self {
            hash: bytes,
            size_bytes,
        })
    }

    /// The raw 32-byte hash.
    pub fn hash(&self) -> &[u8; 32] {
        &self.hash
    }

    /// Length in bytes of the canonical encoding that was hashed.
    pub fn size_bytes(&self) -> i64 {
        self.size_bytes
    }

    /// Render the hash as a lowercase hex string.
    pub fn to_hex(&self) -> String {
        hex::encode(self.hash)
    }

    /// Returns true if this is the sentinel for empty input.
    pub fn is_empty(&self) -> bool {
        *self == Self::empty()
    }
}

impl Default for ContentDigest {
    fn default() -> Self {
        Self::empty()
    }
}

impl fmt::Display for ContentDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.to_hex(), self.size_bytes)
    }
}

impl FromStr for ContentDigest {
    type Err = ProtoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (hash, size) = s.split_once('/').ok_or_else(|| {
            ProtoError::InvalidDigest(format!("expected {{hash}}/{{size}}, got: {s:?}"))
        })?;
        let size_bytes = size
            .parse::<i64>()
            .map_err(|e| ProtoError::InvalidDigest(format!("bad size {size:?}: {e}")))?;
        Self::from_hex(hash, size_bytes)
    }
}

/// Compute the content digest of a message.
///
/// `None` and messages whose canonical encoding is empty (protobuf `Empty`,
/// or any message with every field at its default) produce
/// [`ContentDigest::empty()`].
///
/// # Errors
///
/// Returns [`SerializationError`] if the message cannot be canonically
/// encoded. No partial digest is produced.
pub fn compute_digest<M: CanonicalEncode>(
    msg: Option<&M>,
) -> Result<ContentDigest, SerializationError> {
    let Some(msg) = msg else {
        return Ok(ContentDigest::empty());
    };
    let bytes = msg.canonical_bytes().map_err(|e| {
        tracing::debug!(error = %e, "canonical encoding failed");
        e
    })?;
    let digest = ContentDigest::of(&bytes);
    tracing::trace!(hash = %digest.to_hex(), size_bytes = digest.size_bytes(), "computed digest");
    Ok(digest)
}

/// Compute the `(hex, size)` pair for a message.
///
/// Convenience wrapper around [`compute_digest()`] for callers that key on
/// strings.
pub fn sha256_of<M: CanonicalEncode>(msg: &M) -> Result<(String, i64), SerializationError> {
    let digest = compute_digest(Some(msg))?;
    Ok((digest.to_hex(), digest.size_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use prost::Message;

    #[derive(Clone, PartialEq, Message)]
    struct Blob {
        #[prost(string, tag = "1")]
        label: String,
        #[prost(uint64, tag = "2")]
        count: u64,
    }

    #[test]
    fn test_empty_constant_matches_sha256_of_nothing() {
        assert_eq!(Sha256::digest(b"").as_slice(), &EMPTY_SHA256_BYTES);
        assert_eq!(ContentDigest::empty().to_hex(), EMPTY_SHA256);
    }

    #[test]
    fn test_none_is_empty_sentinel() {
        let d = compute_digest::<Blob>(None).unwrap();
        assert_eq!(d.to_hex(), EMPTY_SHA256);
        assert_eq!(d.size_bytes(), 0);
        assert!(d.is_empty());
    }

    #[test]
    fn test_empty_message_is_empty_sentinel() {
        let (hex, len) = sha256_of(&()).unwrap();
        assert_eq!(hex, EMPTY_SHA256);
        assert_eq!(len, 0);

        let (hex, len) = sha256_of(&Blob::default()).unwrap();
        assert_eq!(hex, EMPTY_SHA256);
        assert_eq!(len, 0);
    }

    #[test]
    fn test_digest_deterministic() {
        let a = Blob {
            label: "input".to_string(),
            count: 3,
        };
        let b = a.clone();
        assert_eq!(
            compute_digest(Some(&a)).unwrap(),
            compute_digest(Some(&b)).unwrap()
        );
    }

    #[test]
    fn test_hex_shape_and_size() {
        let msg = Blob {
            label: "input".to_string(),
            count: 300,
        };
        let d = compute_digest(Some(&msg)).unwrap();
        let hex = d.to_hex();
        assert_eq!(hex.len(), SHA256_HEX_LEN);
        assert!(hex.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f')));
        assert_eq!(d.size_bytes(), msg.encoded_len() as i64);
    }

    #[test]
    fn test_single_field_change_changes_digest() {
        let base = Blob {
            label: "input".to_string(),
            count: 3,
        };
        let relabeled = Blob {
            label: "inpuT".to_string(),
            ..base.clone()
        };
        let recounted = Blob {
            count: 4,
            ..base.clone()
        };
        let d = compute_digest(Some(&base)).unwrap();
        assert_ne!(d, compute_digest(Some(&relabeled)).unwrap());
        assert_ne!(d, compute_digest(Some(&recounted)).unwrap());
    }

    #[test]
    fn test_known_vector() {
        // Blob { label: "a" } encodes as 0a 01 61.
        let msg = Blob {
            label: "a".to_string(),
            count: 0,
        };
        let expected = Sha256::digest([0x0a, 0x01, b'a']);
        let d = compute_digest(Some(&msg)).unwrap();
        assert_eq!(d.hash().as_slice(), expected.as_slice());
        assert_eq!(d.size_bytes(), 3);
    }

    #[test]
    fn test_display_and_parse() {
        let d = compute_digest(Some(&Blob {
            label: "x".to_string(),
            count: 1,
        }))
        .unwrap();
        let s = d.to_string();
        assert_eq!(s, format!("{}/{}", d.to_hex(), d.size_bytes()));
        assert_eq!(s.parse::<ContentDigest>().unwrap(), d);
        assert_eq!(
            format!("{EMPTY_SHA256}/0").parse::<ContentDigest>().unwrap(),
            ContentDigest::empty()
        );
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert!("".parse::<ContentDigest>().is_err());
        assert!(EMPTY_SHA256.parse::<ContentDigest>().is_err());
        assert!(format!("{EMPTY_SHA256}/-1").parse::<ContentDigest>().is_err());
        assert!(format!("{EMPTY_SHA256}/ten").parse::<ContentDigest>().is_err());
        assert!("abc123/10".parse::<ContentDigest>().is_err());
        let upper = EMPTY_SHA256.to_uppercase();
        assert!(ContentDigest::from_hex(&upper, 0).is_err());
    }

    #[cfg(feature = "jcs")]
    #[test]
    fn test_serialization_error_surfaces() {
        let data = serde_json::json!({"ratio": 0.5});
        let err = compute_digest(Some(&crate::Jcs(&data))).unwrap_err();
        assert!(matches!(err, SerializationError::FloatRejected(_)));
    }

    #[cfg(feature = "jcs")]
    #[test]
    fn test_jcs_digest_of_empty_object_is_not_sentinel() {
        // "{}" is two bytes, not an empty encoding.
        let d = compute_digest(Some(&crate::Jcs(serde_json::json!({})))).unwrap();
        assert_eq!(
            d.to_hex(),
            "44136fa355b3678a1146ad16f7e8649e94fb4fc21fe77e8310c060f61caaff8a"
        );
        assert_eq!(d.size_bytes(), 2);
    }
}
