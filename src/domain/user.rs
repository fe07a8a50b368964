//! User index
//!
//! NodeBB keeps a `uid:{uid}:topics` sorted set for every user who started
//! a topic. Those marker keys are the only way users are discovered; the
//! display name lives in the `username` field of the `user:{uid}` hash.

use std::collections::HashMap;

/// Mapping from user id to display name, built once per run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserIndex {
    names: HashMap<String, String>,
}

impl UserIndex {
    /// Key pattern matching one marker per user with topics
    pub const MARKER_PATTERN: &'static str = "uid:*:topics";

    pub fn new() -> Self {
        Self::default()
    }

    /// Extracts the user id embedded in a `uid:{uid}:topics` key
    ///
    /// The `*` in [`Self::MARKER_PATTERN`] also matches `:`, so any key the
    /// pattern matches is accepted and the id is its second segment.
    pub fn uid_from_marker(key: &str) -> Option<&str> {
        if !key.starts_with("uid:") || !key.ends_with(":topics") {
            return None;
        }
        key.split(':').nth(1).filter(|uid| !uid.is_empty())
    }

    /// Key of the hash holding a user's profile fields
    pub fn user_key(uid: &str) -> String {
        format!("user:{}", uid)
    }

    pub fn insert(&mut self, uid: impl Into<String>, name: impl Into<String>) {
        self.names.insert(uid.into(), name.into());
    }

    /// Returns the display name for a user id
    pub fn name(&self, uid: &str) -> Option<&str> {
        self.names.get(uid).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uid_from_marker_key() {
        assert_eq!(UserIndex::uid_from_marker("uid:17:topics"), Some("17"));
        assert_eq!(UserIndex::uid_from_marker("uid::topics"), None);
        assert_eq!(UserIndex::uid_from_marker("uid:17:posts"), None);
        assert_eq!(UserIndex::uid_from_marker("uid:17:topics:extra"), None);
        assert_eq!(UserIndex::uid_from_marker("uid:1:x:topics"), Some("1"));
        assert_eq!(UserIndex::uid_from_marker("user:17"), None);
    }

    #[test]
    fn lookup() {
        let mut index = UserIndex::new();
        index.insert("1", "alice");

        assert_eq!(index.name("1"), Some("alice"));
        assert_eq!(index.name("2"), None);
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn user_key() {
        assert_eq!(UserIndex::user_key("1"), "user:1");
    }
}
