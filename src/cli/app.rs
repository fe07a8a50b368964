//! Main CLI application structure

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use super::output::{Output, OutputFormat};
use crate::export::{self, ExportSummary};
use crate::source::RedisSource;
use crate::storage::{ArticleWriter, Config};

#[derive(Parser)]
#[command(name = "nodebb-export")]
#[command(author, version, about = "Export NodeBB forum topics from Redis into Markdown files")]
pub struct Cli {
    /// Config file (defaults to ./nodebb-export.toml, then the user config dir)
    #[arg(long, short = 'c')]
    pub config: Option<PathBuf>,

    /// Redis connection URL, overrides the config file
    #[arg(long, env = "NODEBB_EXPORT_REDIS_URL")]
    pub redis_url: Option<String>,

    /// Destination root directory, overrides the config file
    #[arg(long, short = 'd')]
    pub dest: Option<PathBuf>,

    /// Render everything but do not write any file
    #[arg(long)]
    pub dry_run: bool,

    /// Output format
    #[arg(long, short = 'f', default_value = "text")]
    pub format: OutputFormat,

    /// Enable verbose output for debugging
    #[arg(long, short = 'v')]
    pub verbose: bool,
}

impl Cli {
    /// Loads the config file and applies command-line overrides
    pub fn resolve_config(&self) -> Result<(Config, Option<PathBuf>)> {
        let (mut config, path) = Config::load(self.config.as_deref())?;

        if let Some(url) = &self.redis_url {
            config.redis_url = url.clone();
        }
        if let Some(dest) = &self.dest {
            config.destination = dest.clone();
        }

        config.validate()?;
        Ok((config, path))
    }
}

/// Installs the stderr log subscriber; `RUST_LOG` wins over `--verbose`
fn init_logging(verbose: bool) {
    let default = if verbose { "nodebb_export=debug" } else { "nodebb_export=info" };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into()))
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Main entry point for the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let output = Output::new(cli.format, cli.verbose);
    init_logging(cli.verbose);

    let (config, config_path) = cli.resolve_config()?;
    match &config_path {
        Some(path) => output.verbose_ctx("config", &format!("Loaded {}", path.display())),
        None => output.verbose_ctx("config", "No config file found, using defaults"),
    }
    output.verbose_ctx(
        "config",
        &format!(
            "{} categories, destination {}, date style {}",
            config.categories.len(),
            config.destination.display(),
            config.date_style
        ),
    );

    let mut source = RedisSource::connect(&config.redis_url)?;
    output.verbose_ctx("source", &format!("Connected to {}", source.url()));

    let writer = if cli.dry_run {
        ArticleWriter::dry_run(&config.destination)
    } else {
        ArticleWriter::new(&config.destination)
    };

    let summary = export::run(&mut source, &config, &writer).context("Export failed")?;
    report(&output, &summary)?;

    output.verbose("Export completed successfully");
    Ok(())
}

/// Builds the JSON summary; paths that are not valid UTF-8 are an error
fn json_summary(summary: &ExportSummary) -> Result<serde_json::Value> {
    let mut value = serde_json::to_value(summary).context("Failed to serialize export summary")?;
    if let Some(fields) = value.as_object_mut() {
        fields.insert("success".to_string(), serde_json::Value::Bool(true));
    }
    Ok(value)
}

/// Prints the list of exported files
fn report(output: &Output, summary: &ExportSummary) -> Result<()> {
    if output.is_json() {
        output.data(&json_summary(summary)?);
        return Ok(());
    }

    let verb = if summary.dry_run { "Would write" } else { "Wrote" };
    for file in &summary.files {
        let path = file.path.display().to_string();
        output.row(&[verb, path.as_str()]);
    }

    let noun = if summary.exported == 1 { "topic" } else { "topics" };
    if summary.dry_run {
        output.success(&format!("Dry run: {} {} would be exported", summary.exported, noun));
    } else {
        output.success(&format!("Exported {} {}", summary.exported, noun));
    }

    Ok(())
}
