//! # Export Pipeline
//!
//! The export runs once, top to bottom:
//!
//! 1. [`build_user_index`] scans the store for users with topics
//! 2. [`category_topics`] lists the topic ids of each configured category
//! 3. [`Renderer::render`] turns one topic id into a [`Document`]
//! 4. [`ArticleWriter::write`] stores it as `{category path}/{slug}.md`
//!
//! There is no retry and no per-topic isolation: the first error aborts the
//! whole run, and nothing is written for the topic that failed.

use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info};

use crate::domain::{
    join_tags, Category, DateStyle, Document, DocumentError, LinkTemplate, Topic, TopicError,
    UserIndex,
};
use crate::source::{ForumSource, SourceError};
use crate::storage::{ArticleWriter, Config};

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Topic {tid} was written by unknown user {uid}")]
    UnknownAuthor { tid: String, uid: String },

    #[error("Topic {tid}: main post {pid} has no content")]
    MissingContent { tid: String, pid: String },

    #[error(transparent)]
    Topic(#[from] TopicError),

    #[error("Topic {tid}: {source}")]
    Document {
        tid: String,
        #[source]
        source: DocumentError,
    },

    #[error(transparent)]
    Source(#[from] SourceError),
}

/// Builds the user id to display name mapping
///
/// Users are discovered through their `uid:{uid}:topics` marker keys. A user
/// without a `username` field gets no entry.
pub fn build_user_index<S: ForumSource>(source: &mut S) -> Result<UserIndex, ExportError> {
    let mut users = UserIndex::new();

    for key in source.keys(UserIndex::MARKER_PATTERN)? {
        let Some(uid) = UserIndex::uid_from_marker(&key) else {
            continue;
        };

        match source.hash_field(&UserIndex::user_key(uid), "username")? {
            Some(name) => users.insert(uid, name),
            None => debug!(uid, "User has topics but no username"),
        }
    }

    Ok(users)
}

/// Lists `(tid, score)` pairs of a category in the store's scan order
pub fn category_topics<S: ForumSource>(
    source: &mut S,
    category: &Category,
) -> Result<Vec<(String, f64)>, ExportError> {
    Ok(source.sorted_set_scan(&category.topics_key())?)
}

/// A topic rendered and ready to be written
#[derive(Debug, Clone)]
pub struct RenderedTopic {
    pub topic: Topic,
    pub document: Document,
}

/// Turns topic ids into documents
pub struct Renderer<'a> {
    users: &'a UserIndex,
    link_template: &'a LinkTemplate,
    date_style: DateStyle,
}

impl<'a> Renderer<'a> {
    pub fn new(users: &'a UserIndex, link_template: &'a LinkTemplate, date_style: DateStyle) -> Self {
        Self {
            users,
            link_template,
            date_style,
        }
    }

    /// Fetches everything a topic needs and renders it
    pub fn render<S: ForumSource>(
        &self,
        source: &mut S,
        tid: &str,
        category: &Category,
    ) -> Result<RenderedTopic, ExportError> {
        let fields = source.hash_all(&Topic::key(tid))?;
        debug!(tid, ?fields, "Fetched topic");

        let tags = source.set_members(&Topic::tags_key(tid))?;
        let topic = Topic::from_fields(tid, &fields, tags)?;

        let author = self
            .users
            .name(&topic.uid)
            .ok_or_else(|| ExportError::UnknownAuthor {
                tid: tid.to_string(),
                uid: topic.uid.clone(),
            })?;

        let date = self
            .date_style
            .apply(&topic.timestamp)
            .map_err(|source| ExportError::Document {
                tid: tid.to_string(),
                source,
            })?;

        let content = source
            .hash_field(&format!("post:{}", topic.main_pid), "content")?
            .ok_or_else(|| ExportError::MissingContent {
                tid: tid.to_string(),
                pid: topic.main_pid.clone(),
            })?;

        let document = Document {
            slug: topic.slug.clone(),
            title: topic.title.clone(),
            author: author.to_string(),
            date,
            tags: join_tags(&topic.tags),
            categories: category.name.clone(),
            link: self.link_template.link(&topic.slug),
            content,
        };

        Ok(RenderedTopic { topic, document })
    }
}

/// One exported file
#[derive(Debug, Clone, Serialize)]
pub struct ExportedFile {
    pub category: String,
    pub tid: String,
    pub path: PathBuf,
}

/// Result of a complete run
#[derive(Debug, Clone, Serialize)]
pub struct ExportSummary {
    pub exported: usize,
    pub dry_run: bool,
    pub users: usize,
    pub files: Vec<ExportedFile>,
}

/// Runs the full export against a store
pub fn run<S: ForumSource>(source: &mut S, config: &Config, writer: &ArticleWriter) -> Result<ExportSummary> {
    let users = build_user_index(source).context("Failed to build user index")?;
    info!(users = users.len(), "Built user index");

    let renderer = Renderer::new(&users, &config.link_template, config.date_style);
    let mut files = Vec::new();

    for category in &config.categories {
        let tids = category_topics(source, category)
            .with_context(|| format!("Failed to list topics of category {}", category.id))?;
        info!(cid = %category.id, topics = tids.len(), "Exporting category {}", category.name);

        for (tid, _score) in tids {
            info!("Rendering topic with tid {}", tid);
            let rendered = renderer
                .render(source, &tid, category)
                .with_context(|| format!("Failed to render topic {}", tid))?;

            let path = writer.article_path(category, &rendered.topic.slug);
            if writer.is_dry_run() {
                info!("Would publish to file {}", path.display());
            } else {
                info!("Publishing to file {}", path.display());
            }
            writer.write(category, &rendered.topic.slug, &rendered.document)?;

            files.push(ExportedFile {
                category: category.id.clone(),
                tid,
                path,
            });
        }
    }

    Ok(ExportSummary {
        exported: files.len(),
        dry_run: writer.is_dry_run(),
        users: users.len(),
        files,
    })
}
