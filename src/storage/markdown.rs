//! Markdown article output
//!
//! Each exported topic becomes `{destination}/{category path}/{slug}.md`.
//! Files are written in place with a truncating write: whatever was at the
//! path before is replaced, and a crash mid-run can leave a mix of fresh
//! and stale files.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::domain::{Category, Document};

/// Writes rendered documents under a destination root
pub struct ArticleWriter {
    /// Directory containing the category subdirectories
    root: PathBuf,

    /// Compute paths without touching the filesystem
    dry_run: bool,
}

impl ArticleWriter {
    /// Creates a writer rooted at the given directory
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            dry_run: false,
        }
    }

    /// Creates a writer that only reports where files would go
    pub fn dry_run(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            dry_run: true,
        }
    }

    pub fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    /// Returns the path a topic slug is written to
    pub fn article_path(&self, category: &Category, slug: &str) -> PathBuf {
        category.article_path(&self.root, slug)
    }

    /// Writes a document, overwriting any existing file
    pub fn write(&self, category: &Category, slug: &str, document: &Document) -> Result<PathBuf> {
        let path = self.article_path(category, slug);
        if self.dry_run {
            return Ok(path);
        }

        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create directory: {}", dir.display()))?;
        }

        fs::write(&path, document.render())
            .with_context(|| format!("Failed to write article: {}", path.display()))?;

        Ok(path)
    }
}
