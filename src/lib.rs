//! nodebb-export - Export NodeBB forum topics into Markdown files
//!
//! Reads topics of a fixed set of categories from the Redis store of a
//! NodeBB forum and writes each one as `{category path}/{slug}.md` with a
//! front matter block, ready for a static site generator.

pub mod domain;
pub mod source;
pub mod storage;
pub mod export;
pub mod cli;

pub use domain::{Category, Document, Topic, UserIndex};
pub use export::{ExportError, ExportSummary};
