//! # Storage Layer
//!
//! Everything the exporter reads from or writes to the local filesystem.
//!
//! | Data | Format | Location |
//! |------|--------|----------|
//! | Articles | Markdown + front matter | `{destination}/{category path}/{slug}.md` |
//! | Config | TOML | `nodebb-export.toml` or the user config dir |
//!
//! ## Key Types
//!
//! - [`ArticleWriter`] - Writes rendered topics, overwriting existing files
//! - [`Config`] - Categories, store URL, destination and rendering options

mod config;
mod markdown;

pub use config::{Config, ConfigError};
pub use markdown::ArticleWriter;
