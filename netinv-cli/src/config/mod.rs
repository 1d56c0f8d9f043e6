//! Application configuration and database access
//!
//! Settings come from a TOML file (`~/.config/netinv/config.toml` unless
//! `--config` is given), then `NETINV_DATABASE`, then command-line flags.

pub mod repository;

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use sqlx::sqlite::SqliteConnectOptions;

use crate::workbook::{ColumnKey, HeaderSchema};

const APP_DIR: &str = "netinv";
const CONFIG_FILE: &str = "config.toml";
const DATABASE_FILE: &str = "inventory.db";
pub const DATABASE_ENV: &str = "NETINV_DATABASE";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub database: DatabaseConfig,
    pub import: ImportConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// SQLite file; defaults to `<data dir>/netinv/inventory.db`
    pub path: Option<PathBuf>,
}

/// Header detection tuning for inventory imports
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImportConfig {
    pub header_scan_rows: usize,
    pub min_header_matches: usize,
    /// Extra header keywords keyed by column (`s_no`, `location`, `interface`,
    /// `ip_address`, `description`, `status`)
    pub synonyms: HashMap<String, Vec<String>>,
}

impl Default for ImportConfig {
    fn default() -> Self {
        let schema = HeaderSchema::default();
        ImportConfig {
            header_scan_rows: schema.scan_rows,
            min_header_matches: schema.min_matches,
            synonyms: HashMap::new(),
        }
    }
}

impl ImportConfig {
    /// Build the header schema, ignoring synonyms for unknown columns
    pub fn header_schema(&self) -> HeaderSchema {
        let mut schema = HeaderSchema {
            scan_rows: self.header_scan_rows,
            min_matches: self.min_header_matches,
            ..HeaderSchema::default()
        };

        for (column, keywords) in &self.synonyms {
            match ColumnKey::from_config_name(column) {
                Some(key) => {
                    for keyword in keywords {
                        schema.add_synonym(key, keyword);
                    }
                }
                None => log::warn!("Ignoring synonyms for unknown column '{}'", column),
            }
        }

        schema
    }
}

impl Config {
    /// Load from an explicit path, or the default location when it exists
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => match default_config_path() {
                Some(p) if p.exists() => p,
                _ => {
                    log::debug!("No config file found, using defaults");
                    return Ok(Config::default());
                }
            },
        };

        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config = Config::parse(&content)
            .with_context(|| format!("Invalid config file: {}", path.display()))?;

        log::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse TOML")
    }

    /// Database path: override, then `NETINV_DATABASE`, then config, then default
    pub fn database_path(&self, override_path: Option<&Path>) -> PathBuf {
        if let Some(path) = override_path {
            return path.to_path_buf();
        }
        if let Ok(path) = std::env::var(DATABASE_ENV) {
            if !path.trim().is_empty() {
                return PathBuf::from(path);
            }
        }
        self.database
            .path
            .clone()
            .unwrap_or_else(default_database_path)
    }
}

fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join(APP_DIR).join(CONFIG_FILE))
}

fn default_database_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
        .join(DATABASE_FILE)
}

/// Open (creating if needed) the inventory database and apply migrations
pub async fn connect(path: &Path) -> Result<SqlitePool> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create database directory: {}", parent.display())
            })?;
        }
    }

    let options = SqliteConnectOptions::new()
        .filename(path)
        .create_if_missing(true)
        .foreign_keys(true);

    let pool = SqlitePool::connect_with(options)
        .await
        .with_context(|| format!("Failed to open database: {}", path.display()))?;

    migrate(&pool).await?;
    log::debug!("Connected to database {}", path.display());
    Ok(pool)
}

pub async fn migrate(pool: &SqlitePool) -> Result<()> {
    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .context("Failed to run database migrations")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_file_content() {
        let config = Config::parse("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.import.header_schema(), HeaderSchema::default());
    }

    #[test]
    fn test_import_settings() {
        let config = Config::parse(
            r##"
            [database]
            path = "/tmp/inv.db"

            [import]
            header_scan_rows = 30
            min_header_matches = 4

            [import.synonyms]
            s_no = ["Sr. No", "#"]
            bogus = ["x"]
            "##,
        )
        .unwrap();

        assert_eq!(
            config.database_path(Some(Path::new("/other.db"))),
            PathBuf::from("/other.db")
        );

        let schema = config.import.header_schema();
        assert_eq!(schema.scan_rows, 30);
        assert_eq!(schema.min_matches, 4);
        let serial = schema
            .columns
            .iter()
            .find(|(k, _)| *k == ColumnKey::SerialNo)
            .unwrap();
        assert!(serial.1.contains(&"sr. no".to_string()));
        assert!(serial.1.contains(&"#".to_string()));
        assert!(serial.1.contains(&"s.no.".to_string()));
    }
}
