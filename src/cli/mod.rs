//! # Command-Line Interface
//!
//! `nodebb-export` has no subcommands: every invocation runs one full export.
//!
//! ## Options
//!
//! | Flag | Purpose |
//! |------|---------|
//! | `--config` | Config file to read |
//! | `--redis-url` | Override the store URL (env `NODEBB_EXPORT_REDIS_URL`) |
//! | `--dest` | Override the destination root |
//! | `--dry-run` | Render and report paths without writing |
//! | `--format` | `text` (default) or `json` summary |
//! | `--verbose` | CLI progress messages and debug logging |
//!
//! Per-topic progress is logged through `tracing` on stderr; set `RUST_LOG`
//! to change the filter.
//!
//! ## Entry Point
//!
//! Call [`run()`] to parse arguments and run the export.

mod app;
mod output;

pub use app::{run, Cli};
pub use output::{Output, OutputFormat};
