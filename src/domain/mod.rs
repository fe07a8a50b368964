//! Domain models for the exporter
//!
//! Contains the topic, user and document types without any I/O concerns.

mod category;
mod document;
mod topic;
mod user;

pub use category::Category;
pub use document::{join_tags, DateStyle, Document, DocumentError, LinkTemplate};
pub use topic::{Topic, TopicError};
pub use user::UserIndex;
