//! # Source Store
//!
//! Read-only access to the key-value store a NodeBB forum keeps its data in.
//!
//! ## Keys Read
//!
//! | Key | Type | Used for |
//! |-----|------|----------|
//! | `uid:{uid}:topics` | sorted set | discovering users (key only) |
//! | `user:{uid}` | hash | `username` field |
//! | `cid:{cid}:tids` | sorted set | topic ids of a category |
//! | `topic:{tid}` | hash | topic fields |
//! | `topic:{tid}:tags` | set | tag names |
//! | `post:{pid}` | hash | `content` field |
//!
//! ## Implementations
//!
//! - [`RedisSource`] - blocking connection to a live Redis server
//! - [`MemorySource`] - in-memory store for tests and fixtures
//!
//! The exporter never writes to the store.

mod memory;
mod redis;

use std::collections::HashMap;

use thiserror::Error;

pub use memory::MemorySource;
pub use self::redis::RedisSource;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Failed to connect to {url}: {source}")]
    Connect {
        url: String,
        #[source]
        source: ::redis::RedisError,
    },

    #[error("Redis error: {0}")]
    Redis(#[from] ::redis::RedisError),

    #[error("Key '{key}' holds the wrong kind of value")]
    WrongType { key: String },
}

/// The store operations the exporter needs
///
/// All calls are blocking and issued one at a time over a single
/// connection, hence `&mut self`.
pub trait ForumSource {
    /// Enumerates all keys matching a glob pattern
    fn keys(&mut self, pattern: &str) -> Result<Vec<String>, SourceError>;

    /// Reads a single hash field
    fn hash_field(&mut self, key: &str, field: &str) -> Result<Option<String>, SourceError>;

    /// Reads all fields of a hash (empty if the key does not exist)
    fn hash_all(&mut self, key: &str) -> Result<HashMap<String, String>, SourceError>;

    /// Reads the members of a set
    fn set_members(&mut self, key: &str) -> Result<Vec<String>, SourceError>;

    /// Scans a sorted set, yielding `(member, score)` in the store's own order
    fn sorted_set_scan(&mut self, key: &str) -> Result<Vec<(String, f64)>, SourceError>;
}
