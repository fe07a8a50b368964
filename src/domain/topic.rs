//! Topic domain model
//!
//! A topic is read from the `topic:{tid}` hash in a single call. Only the
//! fields needed for the export are kept; everything else in the hash is
//! ignored.

use std::collections::{BTreeSet, HashMap};

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum TopicError {
    #[error("Topic {tid} not found")]
    NotFound { tid: String },

    #[error("Topic {tid} is missing field '{field}'")]
    MissingField { tid: String, field: &'static str },
}

/// A forum topic as stored by NodeBB
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Topic {
    pub slug: String,
    pub title: String,

    /// Author user id (`uid`)
    pub uid: String,

    /// Creation timestamp, exactly as stored
    pub timestamp: String,

    /// Id of the first post (`mainPid`)
    pub main_pid: String,

    /// Tags, kept sorted
    pub tags: BTreeSet<String>,
}

impl Topic {
    /// Key of the hash holding a topic's fields
    pub fn key(tid: &str) -> String {
        format!("topic:{}", tid)
    }

    /// Key of the set holding a topic's tags
    pub fn tags_key(tid: &str) -> String {
        format!("topic:{}:tags", tid)
    }

    /// Builds a topic from its raw hash fields and tag set
    pub fn from_fields(
        tid: &str,
        fields: &HashMap<String, String>,
        tags: impl IntoIterator<Item = String>,
    ) -> Result<Self, TopicError> {
        if fields.is_empty() {
            return Err(TopicError::NotFound { tid: tid.to_string() });
        }

        let field = |name: &'static str| {
            fields.get(name).cloned().ok_or_else(|| TopicError::MissingField {
                tid: tid.to_string(),
                field: name,
            })
        };

        Ok(Self {
            slug: field("slug")?,
            title: field("title")?,
            uid: field("uid")?,
            timestamp: field("timestamp")?,
            main_pid: field("mainPid")?,
            tags: tags.into_iter().collect(),
        })
    }
}
