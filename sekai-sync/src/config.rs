//! Configuration for sekai-sync
//!
//! Loaded from `sekai-sync.toml`, located through
//! [`ConfigFileResolver`]: `--config` → `SEKAI_SYNC_CONFIG` →
//! `<config_dir>/sekai/sekai-sync.toml` → compiled defaults. Every field has a
//! default, so a partial file only overrides what it names.

use crate::error::SyncResult;
use sekai_common::config::{load_toml_or_default, ConfigFileResolver};
use sekai_common::Error;
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE_NAME: &str = "sekai-sync.toml";
pub const CONFIG_ENV_VAR: &str = "SEKAI_SYNC_CONFIG";

/// Listing API settings
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SourceConfig {
    pub base_url: String,
    /// Uploader id owning the season
    pub mid: String,
    pub season_id: String,
    pub page_size: u32,
    /// Minimum delay between page requests
    pub politeness_ms: u64,
    pub timeout_secs: u64,
    pub connect_timeout_secs: u64,
    /// None uses the standard Sekai user-agent
    pub user_agent: Option<String>,
    pub referer: String,
    pub web_location: String,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.bilibili.com/x/polymer/web-space/seasons_archives_list"
                .to_string(),
            mid: "13148307".to_string(),
            season_id: "1547037".to_string(),
            page_size: 30,
            politeness_ms: 1000,
            timeout_secs: 15,
            connect_timeout_secs: 5,
            user_agent: None,
            referer: "https://space.bilibili.com/".to_string(),
            web_location: "333.1387".to_string(),
        }
    }
}

/// Input and output file locations
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct PathsConfig {
    /// Catalog JSON written by the store
    pub output: PathBuf,
    /// Wiki metadata export
    pub metadata: PathBuf,
    /// Optional manual alias file
    pub overrides: PathBuf,
    /// Optional reference table overrides (TOML)
    pub reference_tables: Option<PathBuf>,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            output: PathBuf::from("./public/database.json"),
            metadata: PathBuf::from("./data/songs_meta.json"),
            overrides: PathBuf::from("./data/manual_ids.json"),
            reference_tables: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default tracing directive when RUST_LOG is unset
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SyncConfig {
    pub source: SourceConfig,
    pub paths: PathsConfig,
    pub logging: LoggingConfig,
}

impl SyncConfig {
    /// Config file to use: CLI → environment → user config dir
    pub fn resolve_path(cli_path: Option<PathBuf>) -> Option<PathBuf> {
        ConfigFileResolver::new(CONFIG_FILE_NAME, CONFIG_ENV_VAR)
            .with_cli_override(cli_path)
            .resolve()
    }

    /// Load and validate; `None` or a missing file yields the defaults
    pub fn load_from(path: Option<&Path>) -> SyncResult<Self> {
        let config: Self = load_toml_or_default(path)?;
        config.validate()?;
        Ok(config)
    }

    /// Resolve the config file and load it
    pub fn load(cli_path: Option<PathBuf>) -> SyncResult<Self> {
        Self::load_from(Self::resolve_path(cli_path).as_deref())
    }

    pub fn validate(&self) -> SyncResult<()> {
        if self.source.page_size == 0 {
            return Err(Error::Config("source.page_size must be greater than 0".to_string()).into());
        }
        if self.source.mid.trim().is_empty() || self.source.season_id.trim().is_empty() {
            return Err(Error::Config("source.mid and source.season_id are required".to_string()).into());
        }
        if self.source.base_url.trim().is_empty() {
            return Err(Error::Config("source.base_url is required".to_string()).into());
        }
        Ok(())
    }

    pub fn user_agent(&self) -> String {
        self.source
            .user_agent
            .clone()
            .filter(|ua| !ua.trim().is_empty())
            .unwrap_or_else(sekai_common::config::get_user_agent)
    }
}
