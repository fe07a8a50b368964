//! Redis source
//!
//! Blocking connection to the Redis server backing a NodeBB forum.
//! Key enumeration uses SCAN (production-safe, not KEYS) and sorted sets
//! are walked with ZSCAN, so no single command blocks the server on a
//! large forum.

use std::collections::HashMap;

use redis::{Client, Commands, Connection};

use super::{ForumSource, SourceError};

/// Redis-backed forum store
pub struct RedisSource {
    connection: Connection,
    url: String,
}

impl std::fmt::Debug for RedisSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisSource")
            .field("url", &self.url)
            .finish_non_exhaustive()
    }
}

impl RedisSource {
    /// Opens a connection to the given URL (e.g. `redis://localhost:6379`)
    ///
    /// # Errors
    /// Returns [`SourceError::Connect`] if the URL is invalid or the server
    /// cannot be reached.
    pub fn connect(url: &str) -> Result<Self, SourceError> {
        let connect_err = |source| SourceError::Connect {
            url: url.to_string(),
            source,
        };

        let client = Client::open(url).map_err(connect_err)?;
        let connection = client.get_connection().map_err(connect_err)?;

        Ok(Self {
            connection,
            url: url.to_string(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

/// Pairs up a flat ZSCAN reply (`member, score, member, score, ...`)
fn pair_scores(flat: Vec<String>, key: &str) -> Result<Vec<(String, f64)>, SourceError> {
    if flat.len() % 2 != 0 {
        return Err(SourceError::WrongType { key: key.to_string() });
    }

    let mut pairs = Vec::with_capacity(flat.len() / 2);
    let mut items = flat.into_iter();
    while let (Some(member), Some(score)) = (items.next(), items.next()) {
        let score = score
            .parse::<f64>()
            .map_err(|_| SourceError::WrongType { key: key.to_string() })?;
        pairs.push((member, score));
    }

    Ok(pairs)
}

impl ForumSource for RedisSource {
    fn keys(&mut self, pattern: &str) -> Result<Vec<String>, SourceError> {
        let iter: redis::Iter<String> = self.connection.scan_match(pattern)?;
        Ok(iter.collect())
    }

    fn hash_field(&mut self, key: &str, field: &str) -> Result<Option<String>, SourceError> {
        Ok(self.connection.hget(key, field)?)
    }

    fn hash_all(&mut self, key: &str) -> Result<HashMap<String, String>, SourceError> {
        Ok(self.connection.hgetall(key)?)
    }

    fn set_members(&mut self, key: &str) -> Result<Vec<String>, SourceError> {
        Ok(self.connection.smembers(key)?)
    }

    fn sorted_set_scan(&mut self, key: &str) -> Result<Vec<(String, f64)>, SourceError> {
        let flat: Vec<String> = {
            let iter: redis::Iter<String> = self.connection.zscan(key)?;
            iter.collect()
        };
        pair_scores(flat, key)
    }
}
