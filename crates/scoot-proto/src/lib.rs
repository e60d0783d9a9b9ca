//! # scoot-proto — Content Digests and Time Conversions
//!
//! Leaf utilities for the remote-execution layer: cache keys for protocol
//! messages and conversions between protobuf time types, milliseconds, and
//! wall-clock instants. Request dispatch, cache lookup, and deadline
//! propagation build on these; nothing here performs I/O.
//!
//! ## Key Design Principles
//!
//! 1. **`CanonicalBytes` newtype.** All digest computation flows through a
//!    `CanonicalEncode` implementation. Raw byte slices cannot be hashed into
//!    a `ContentDigest`, so every cache key comes from a deterministic encoding.
//!
//! 2. **Fixed empty sentinel.** Absent and empty messages share
//!    [`EMPTY_SHA256`], the SHA-256 of zero bytes, held as a `const`.
//!
//! 3. **Deliberate precision asymmetry.** Durations round-trip through
//!    milliseconds lossily; timestamps round-trip through `DateTime<Utc>`
//!    exactly.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `scoot-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.
//! - Every operation is pure and safe to call from any thread.

#![forbid(unsafe_code)]

pub mod canonical;
pub mod digest;
pub mod error;
pub mod temporal;

// Re-export primary types for ergonomic imports.
#[cfg(feature = "jcs")]
pub use canonical::Jcs;
pub use canonical::{CanonicalBytes, CanonicalEncode};
pub use digest::{compute_digest, sha256_of, ContentDigest, EMPTY_SHA256, SHA256_HEX_LEN};
pub use error::{ProtoError, SerializationError};
pub use prost_types::{Duration, Timestamp};
pub use temporal::{
    datetime_from_timestamp, duration_from_millis, duration_from_std, millis_from_duration,
    std_from_duration, timestamp_from_datetime, timestamp_now,
};
