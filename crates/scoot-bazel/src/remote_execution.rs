//! # Remote Execution Messages
//!
//! Protobuf messages from `google.devtools.remoteexecution.v1test`, derived
//! with prost. Field tags match the upstream `.proto`, so the encoded bytes,
//! and therefore the digests, agree with every other client of the protocol.
//!
//! None of these messages carry map fields; repeated fields keep insertion
//! order and are part of the canonical encoding.

use prost::Message;
use prost_types::Duration;

use scoot_proto::{duration_from_millis, millis_from_duration};

/// A content digest as carried on the wire: lowercase hex hash plus size.
#[derive(Clone, PartialEq, Eq, Hash, Message)]
pub struct Digest {
    #[prost(string, tag = "1")]
    pub hash: String,
    #[prost(int64, tag = "2")]
    pub size_bytes: i64,
}

/// Everything needed to run one command against one input tree.
///
/// The digest of an `Action` is its key in the action cache.
#[derive(Clone, PartialEq, Message)]
pub struct Action {
    #[prost(message, optional, tag = "1")]
    pub command_digest: Option<Digest>,
    #[prost(message, optional, tag = "2")]
    pub input_root_digest: Option<Digest>,
    #[prost(string, repeated, tag = "3")]
    pub output_files: Vec<String>,
    #[prost(string, repeated, tag = "4")]
    pub output_directories: Vec<String>,
    #[prost(message, optional, tag = "5")]
    pub platform: Option<Platform>,
    #[prost(message, optional, tag = "6")]
    pub timeout: Option<Duration>,
    #[prost(bool, tag = "7")]
    pub do_not_cache: bool,
}

impl Action {
    /// The execution timeout in whole milliseconds, if one is set.
    pub fn timeout_ms(&self) -> Option<i64> {
        self.timeout.as_ref().map(millis_from_duration)
    }

    /// Set the execution timeout from a millisecond count.
    pub fn with_timeout_ms(mut self, ms: i64) -> Self {
        self.timeout = Some(duration_from_millis(ms));
        self
    }
}

/// The argv and environment of a command.
#[derive(Clone, PartialEq, Message)]
pub struct Command {
    #[prost(string, repeated, tag = "1")]
    pub arguments: Vec<String>,
    #[prost(message, repeated, tag = "2")]
    pub environment_variables: Vec<EnvironmentVariable>,
}

impl Command {
    /// Sort environment variables by name.
    ///
    /// Environment order does not change what a command does, but it does
    /// change the encoded bytes. Normalize before digesting so commands built
    /// in different orders share a cache key.
    pub fn normalize(&mut self) {
        self.environment_variables
            .sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.value.cmp(&b.value)));
    }
}

#[derive(Clone, PartialEq, Eq, Message)]
pub struct EnvironmentVariable {
    #[prost(string, tag = "1")]
    pub name: String,
    #[prost(string, tag = "2")]
    pub value: String,
}

/// Worker requirements for an action, as name/value properties.
#[derive(Clone, PartialEq, Eq, Message)]
pub struct Platform {
    #[prost(message, repeated, tag = "1")]
    pub properties: Vec<Property>,
}

#[derive(Clone, PartialEq, Eq, Message)]
pub struct Property {
    #[prost(string, tag = "1")]
    pub name: String,
    #[prost(string, tag = "2")]
    pub value: String,
}
