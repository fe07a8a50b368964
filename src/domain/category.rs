//! Category domain model
//!
//! Categories are not discovered from the store. Each one is configured
//! with the NodeBB category id, the display name written into the front
//! matter, and the subdirectory its topics are exported to.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// NodeBB category id (`cid`)
    pub id: String,

    /// Display name, rendered as the `categories` field
    pub name: String,

    /// Output subdirectory, relative to the destination root
    pub path: PathBuf,
}

impl Category {
    pub fn new(id: impl Into<String>, name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            path: path.into(),
        }
    }

    /// Key of the sorted set holding this category's topic ids
    pub fn topics_key(&self) -> String {
        format!("cid:{}:tids", self.id)
    }

    /// Path of the exported file for a topic slug
    pub fn article_path(&self, root: &Path, slug: &str) -> PathBuf {
        root.join(&self.path).join(format!("{}.md", slug))
    }

    /// The two categories exported by default
    pub fn defaults() -> Vec<Category> {
        vec![
            Category::new("3", "Knowledge Base", "kb"),
            Category::new("6", "CI Book", "ci-book"),
        ]
    }
}
