//! Wire `Digest` construction from messages, and conversions to and from
//! [`ContentDigest`].

use scoot_proto::{compute_digest, CanonicalEncode, ContentDigest, ProtoError, SerializationError};

use crate::remote_execution::Digest;

/// The wire digest naming `msg` in the CAS or action cache.
///
/// ```
/// use scoot_bazel::{digest_of, Action};
///
/// let d = digest_of(&Action::default()).unwrap();
/// assert_eq!(d.hash, scoot_proto::EMPTY_SHA256);
/// assert_eq!(d.size_bytes, 0);
/// ```
pub fn digest_of<M: CanonicalEncode>(msg: &M) -> Result<Digest, SerializationError> {
    compute_digest(Some(msg)).map(Digest::from)
}

/// The wire digest of empty content.
pub fn empty_digest() -> Digest {
    Digest::from(ContentDigest::empty())
}

impl Digest {
    /// Returns true if this names empty content.
    pub fn is_empty(&self) -> bool {
        self.size_bytes == 0 && self.hash == scoot_proto::EMPTY_SHA256
    }
}

impl From<ContentDigest> for Digest {
    fn from(d: ContentDigest) -> Self {
        Self {
            hash: d.to_hex(),
            size_bytes: d.size_bytes(),
        }
    }
}

impl TryFrom<&Digest> for ContentDigest {
    type Error = ProtoError;

    fn try_from(d: &Digest) -> Result<Self, Self::Error> {
        ContentDigest::from_hex(&d.hash, d.size_bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::remote_execution::{Command, EnvironmentVariable};

    #[test]
    fn empty_digest_matches_sentinel() {
        let d = empty_digest();
        assert_eq!(d.hash, scoot_proto::EMPTY_SHA256);
        assert_eq!(d.size_bytes, 0);
        assert!(d.is_empty());
        assert_eq!(digest_of(&()).unwrap(), d);
    }

    #[test]
    fn digest_of_command_has_encoded_size() {
        let cmd = Command {
            arguments: vec!["echo".to_string(), "hi".to_string()],
            environment_variables: vec![EnvironmentVariable {
                name: "LANG".to_string(),
                value: "C".to_string(),
            }],
        };
        let d = digest_of(&cmd).unwrap();
        assert_eq!(d.hash.len(), scoot_proto::SHA256_HEX_LEN);
        assert_eq!(d.size_bytes, prost::Message::encoded_len(&cmd) as i64);
        assert!(!d.is_empty());
    }

    #[test]
    fn content_digest_conversion_roundtrip() {
        let cmd = Command {
            arguments: vec!["true".to_string()],
            environment_variables: vec![],
        };
        let wire = digest_of(&cmd).unwrap();
        let content = ContentDigest::try_from(&wire).unwrap();
        assert_eq!(Digest::from(content), wire);
        assert_eq!(content.to_string(), format!("{}/{}", wire.hash, wire.size_bytes));
    }

    #[test]
    fn malformed_wire_digest_rejected() {
        let d = Digest {
            hash: "abc123".to_string(),
            size_bytes: 10,
        };
        assert!(matches!(
            ContentDigest::try_from(&d),
            Err(ProtoError::InvalidDigest(_))
        ));
    }
}
