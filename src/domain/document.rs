//! Rendered article documents
//!
//! The output format is fixed: a `---` delimited front matter block with
//! seven `key: value` lines in a fixed order, a blank line, the post
//! content verbatim, and a trailing blank line. Values are written as-is,
//! with no YAML quoting, so the files match what the blog generator
//! consuming them already expects.

use std::fmt;

use chrono::DateTime;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum DocumentError {
    #[error("Invalid timestamp '{0}': expected epoch milliseconds")]
    InvalidTimestamp(String),

    #[error("Link template must contain '{{slug}}', got '{0}'")]
    InvalidLinkTemplate(String),
}

/// How the stored topic timestamp is written into the `date` field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DateStyle {
    /// Stored value, unchanged
    #[default]
    Raw,

    /// Epoch milliseconds rendered as `%Y-%m-%d %H:%M:%S` (UTC)
    Formatted,
}

impl DateStyle {
    pub fn apply(&self, timestamp: &str) -> Result<String, DocumentError> {
        match self {
            DateStyle::Raw => Ok(timestamp.to_string()),
            DateStyle::Formatted => {
                let millis: i64 = timestamp
                    .trim()
                    .parse()
                    .map_err(|_| DocumentError::InvalidTimestamp(timestamp.to_string()))?;
                let dt = DateTime::from_timestamp_millis(millis)
                    .ok_or_else(|| DocumentError::InvalidTimestamp(timestamp.to_string()))?;
                Ok(dt.format("%Y-%m-%d %H:%M:%S").to_string())
            }
        }
    }
}

impl fmt::Display for DateStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DateStyle::Raw => write!(f, "raw"),
            DateStyle::Formatted => write!(f, "formatted"),
        }
    }
}

/// Permalink template with a `{slug}` placeholder
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LinkTemplate(String);

impl LinkTemplate {
    pub const PLACEHOLDER: &'static str = "{slug}";

    pub fn new(template: impl Into<String>) -> Result<Self, DocumentError> {
        let template = template.into();
        if !template.contains(Self::PLACEHOLDER) {
            return Err(DocumentError::InvalidLinkTemplate(template));
        }
        Ok(Self(template))
    }

    pub fn link(&self, slug: &str) -> String {
        self.0.replace(Self::PLACEHOLDER, slug)
    }
}

impl Default for LinkTemplate {
    fn default() -> Self {
        Self("https://quantum-integration.org/topic/{slug}".to_string())
    }
}

impl TryFrom<String> for LinkTemplate {
    type Error = DocumentError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<LinkTemplate> for String {
    fn from(template: LinkTemplate) -> Self {
        template.0
    }
}

/// Sorts tags and joins them with commas
pub fn join_tags<I, S>(tags: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut tags: Vec<String> = tags.into_iter().map(|t| t.as_ref().to_string()).collect();
    tags.sort();
    tags.join(",")
}

/// A topic rendered for export
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub slug: String,
    pub title: String,
    pub author: String,
    pub date: String,
    pub tags: String,
    pub categories: String,
    pub link: String,
    pub content: String,
}

impl Document {
    /// Renders the full file contents
    pub fn render(&self) -> String {
        format!(
            "---\n\
             slug: {}\n\
             title: {}\n\
             author: {}\n\
             date: {}\n\
             tags: {}\n\
             categories: {}\n\
             link: {}\n\
             ---\n\
             \n\
             {}\n\
             \n",
            self.slug,
            self.title,
            self.author,
            self.date,
            self.tags,
            self.categories,
            self.link,
            self.content,
        )
    }
}
