//! Configuration handling for the exporter
//!
//! Configuration is read from the first of:
//! 1. the file passed with `--config`
//! 2. `nodebb-export.toml` in the current directory
//! 3. `~/.config/nodebb-export/config.toml` (platform equivalent)
//!
//! When no file is found the built-in defaults are used, which export the
//! "Knowledge Base" and "CI Book" categories from a local Redis.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::{Category, DateStyle, LinkTemplate};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Failed to parse configuration: {0}")]
    Parse(String),

    #[error("Configuration file not found: {0}")]
    NotFound(PathBuf),
}

/// Exporter configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Redis connection URL
    pub redis_url: String,

    /// Directory the category subdirectories are created in
    pub destination: PathBuf,

    /// Permalink template, `{slug}` is substituted
    pub link_template: LinkTemplate,

    /// How topic timestamps are written
    pub date_style: DateStyle,

    /// Categories to export, in order
    pub categories: Vec<Category>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            redis_url: "redis://localhost:6379".to_string(),
            destination: PathBuf::from("."),
            link_template: LinkTemplate::default(),
            date_style: DateStyle::Raw,
            categories: Category::defaults(),
        }
    }
}

impl Config {
    /// Name of the config file looked up in the current directory
    pub const LOCAL_FILE: &'static str = "nodebb-export.toml";

    /// Loads configuration, returning it with the file it came from
    pub fn load(explicit: Option<&Path>) -> Result<(Self, Option<PathBuf>)> {
        let cwd = std::env::current_dir().context("Failed to determine current directory")?;

        match Self::locate(explicit, &cwd, Self::global_config_dir().as_deref())? {
            Some(path) => Ok((Self::from_file(&path)?, Some(path))),
            None => Ok((Self::default(), None)),
        }
    }

    /// Returns the global config directory
    pub fn global_config_dir() -> Option<PathBuf> {
        ProjectDirs::from("org", "quantum-integration", "nodebb-export")
            .map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Picks the config file to read, if any
    pub fn locate(explicit: Option<&Path>, cwd: &Path, global_dir: Option<&Path>) -> Result<Option<PathBuf>> {
        if let Some(path) = explicit {
            if !path.is_file() {
                return Err(ConfigError::NotFound(path.to_path_buf()).into());
            }
            return Ok(Some(path.to_path_buf()));
        }

        let local = cwd.join(Self::LOCAL_FILE);
        if local.is_file() {
            return Ok(Some(local));
        }

        Ok(global_dir
            .map(|dir| dir.join("config.toml"))
            .filter(|path| path.is_file()))
    }

    /// Reads and validates a config file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;

        Self::parse(&content).with_context(|| format!("Invalid config file: {}", path.display()))
    }

    /// Parses and validates TOML configuration
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let config: Config =
            toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Checks invariants serde cannot express
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.redis_url.trim().is_empty() {
            return Err(ConfigError::Invalid("redis_url must not be empty".to_string()));
        }

        if self.categories.is_empty() {
            return Err(ConfigError::Invalid("at least one category is required".to_string()));
        }

        let mut seen = HashSet::new();
        for category in &self.categories {
            if category.id.trim().is_empty() {
                return Err(ConfigError::Invalid("category id must not be empty".to_string()));
            }
            if !seen.insert(category.id.as_str()) {
                return Err(ConfigError::Invalid(format!(
                    "duplicate category id '{}'",
                    category.id
                )));
            }
            if category.name.trim().is_empty() {
                return Err(ConfigError::Invalid(format!(
                    "category '{}' has an empty name",
                    category.id
                )));
            }
            if category.path.as_os_str().is_empty() {
                return Err(ConfigError::Invalid(format!(
                    "category '{}' has an empty path",
                    category.id
                )));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config() {
        let config = Config::default();

        assert_eq!(config.redis_url, "redis://localhost:6379");
        assert_eq!(config.date_style, DateStyle::Raw);
        assert_eq!(config.categories.len(), 2);
        assert_eq!(config.categories[0].name, "Knowledge Base");
        assert_eq!(config.categories[1].path, PathBuf::from("ci-book"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn parse_full_config() {
        let toml = r#"
redis_url = "redis://forum.internal:6380/2"
destination = "site/content"
link_template = "https://forum.example.org/t/{slug}"
date_style = "formatted"

[[categories]]
id = "9"
name = "Howtos"
path = "howto"
"#;

        let config = Config::parse(toml).unwrap();
        assert_eq!(config.redis_url, "redis://forum.internal:6380/2");
        assert_eq!(config.destination, PathBuf::from("site/content"));
        assert_eq!(config.link_template.link("x"), "https://forum.example.org/t/x");
        assert_eq!(config.date_style, DateStyle::Formatted);
        assert_eq!(config.categories, vec![Category::new("9", "Howtos", "howto")]);
    }

    #[test]
    fn missing_keys_fall_back_to_defaults() {
        let config = Config::parse("destination = \"out\"\n").unwrap();

        assert_eq!(config.destination, PathBuf::from("out"));
        assert_eq!(config.categories, Category::defaults());
        assert_eq!(config.link_template, LinkTemplate::default());
    }

    #[test]
    fn link_template_without_placeholder_is_rejected() {
        let err = Config::parse("link_template = \"https://example.org/\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn duplicate_category_ids_are_rejected() {
        let toml = r#"
[[categories]]
id = "3"
name = "A"
path = "a"

[[categories]]
id = "3"
name = "B"
path = "b"
"#;

        let err = Config::parse(toml).unwrap_err();
        assert!(err.to_string().contains("duplicate category id '3'"));
    }

    #[test]
    fn empty_category_list_is_rejected() {
        let err = Config::parse("categories = []\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn locate_prefers_explicit_then_local_then_global() {
        let cwd = TempDir::new().unwrap();
        let global = TempDir::new().unwrap();

        assert_eq!(Config::locate(None, cwd.path(), Some(global.path())).unwrap(), None);

        let global_file = global.path().join("config.toml");
        fs::write(&global_file, "").unwrap();
        assert_eq!(
            Config::locate(None, cwd.path(), Some(global.path())).unwrap(),
            Some(global_file)
        );

        let local_file = cwd.path().join(Config::LOCAL_FILE);
        fs::write(&local_file, "").unwrap();
        assert_eq!(
            Config::locate(None, cwd.path(), Some(global.path())).unwrap(),
            Some(local_file.clone())
        );

        let explicit = cwd.path().join("other.toml");
        fs::write(&explicit, "").unwrap();
        assert_eq!(
            Config::locate(Some(&explicit), cwd.path(), Some(global.path())).unwrap(),
            Some(explicit)
        );
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let cwd = TempDir::new().unwrap();
        let missing = cwd.path().join("missing.toml");

        let err = Config::locate(Some(&missing), cwd.path(), None).unwrap_err();
        assert!(err.to_string().contains("Configuration file not found"));
    }

    #[test]
    fn from_file_reports_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.toml");
        fs::write(&path, "categories = 3\n").unwrap();

        let err = Config::from_file(&path).unwrap_err();
        assert!(format!("{:#}", err).contains("bad.toml"));
    }
}
