//! # scoot-bazel — Remote Execution Messages and Cache Keys
//!
//! The subset of the Bazel remote-execution protocol that the job layer
//! hashes: `Action`, `Command`, `Digest`, and `Platform`. Digests are computed
//! with `scoot-proto`, so an action built here gets the same cache key as the
//! same action built by any other remote-execution client.
//!
//! ## Crate Policy
//!
//! - Depends only on `scoot-proto` internally.
//! - Message field tags never change; a renumbering would silently change
//!   every action-cache key.

#![forbid(unsafe_code)]

pub mod digest;
pub mod remote_execution;

pub use digest::{digest_of, empty_digest};
pub use remote_execution::{Action, Command, Digest, EnvironmentVariable, Platform, Property};
