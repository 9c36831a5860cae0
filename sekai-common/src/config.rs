//! Configuration loading and file helpers
//!
//! Config file resolution follows this priority order:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable
//! 3. User config directory (`<config_dir>/sekai/<file_name>`)
//! 4. None, callers fall back to compiled defaults

use crate::{Error, Result};
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Directory name under the platform config dir
const CONFIG_DIR_NAME: &str = "sekai";

/// Resolves which configuration file a tool should read
#[derive(Debug, Clone)]
pub struct ConfigFileResolver {
    file_name: String,
    env_var_name: String,
    cli_override: Option<PathBuf>,
}

impl ConfigFileResolver {
    /// Create resolver for `file_name`, overridable through `env_var_name`
    pub fn new(file_name: impl Into<String>, env_var_name: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            env_var_name: env_var_name.into(),
            cli_override: None,
        }
    }

    /// Set the command-line override (highest priority)
    pub fn with_cli_override(mut self, path: Option<PathBuf>) -> Self {
        self.cli_override = path;
        self
    }

    /// Resolve the config file path
    ///
    /// CLI and environment paths are returned even if they do not exist so the
    /// loader can report them; the user config dir path only when present.
    pub fn resolve(&self) -> Option<PathBuf> {
        if let Some(path) = &self.cli_override {
            debug!(path = %path.display(), "Config path from command line");
            return Some(path.clone());
        }

        if let Ok(path) = std::env::var(&self.env_var_name) {
            if !path.trim().is_empty() {
                debug!(path = %path, env = %self.env_var_name, "Config path from environment");
                return Some(PathBuf::from(path));
            }
        }

        let user_config = self.default_path()?;
        if user_config.exists() {
            debug!(path = %user_config.display(), "Config path from user config dir");
            Some(user_config)
        } else {
            None
        }
    }

    /// Platform default location for this config file
    pub fn default_path(&self) -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(CONFIG_DIR_NAME).join(&self.file_name))
    }
}

/// Load a TOML config, falling back to defaults when the file is absent
///
/// A missing file is not fatal: log a warning and use `T::default()`.
/// A file that exists but does not parse is a configuration error.
pub fn load_toml_or_default<T>(path: Option<&Path>) -> Result<T>
where
    T: DeserializeOwned + Default,
{
    let Some(path) = path else {
        info!("No config file found, using compiled defaults");
        return Ok(T::default());
    };

    if !path.exists() {
        warn!(path = %path.display(), "Config file not found, using compiled defaults");
        return Ok(T::default());
    }

    let content = std::fs::read_to_string(path)
        .map_err(|e| Error::Config(format!("Read {} failed: {}", path.display(), e)))?;
    let config = toml::from_str(&content)
        .map_err(|e| Error::Config(format!("Parse {} failed: {}", path.display(), e)))?;

    info!(path = %path.display(), "Loaded config file");
    Ok(config)
}

/// Read and decode a JSON file
///
/// Returns `Error::NotFound` when the file does not exist so callers can tell
/// an absent optional input apart from a corrupt one.
pub fn load_json_file<T: DeserializeOwned>(path: &Path) -> Result<T> {
    if !path.exists() {
        return Err(Error::NotFound(path.display().to_string()));
    }
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

/// Write `contents` to `target` atomically (temp file + rename)
///
/// Parent directories are created when missing. Readers never observe a
/// partially written file.
pub fn write_atomic(target: &Path, contents: &[u8]) -> Result<()> {
    if let Some(parent) = target.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let file_name = target
        .file_name()
        .ok_or_else(|| Error::InvalidInput(format!("Not a file path: {}", target.display())))?;
    let mut temp_name = file_name.to_os_string();
    temp_name.push(".tmp");
    let temp_path = target.with_file_name(temp_name);

    std::fs::write(&temp_path, contents)?;
    if let Err(e) = std::fs::rename(&temp_path, target) {
        let _ = std::fs::remove_file(&temp_path);
        return Err(e.into());
    }

    debug!(path = %target.display(), bytes = contents.len(), "Wrote file atomically");
    Ok(())
}

/// Standard user-agent for outgoing HTTP requests
pub fn get_user_agent() -> String {
    format!("SekaiCatalog/{}", env!("CARGO_PKG_VERSION"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_agent_format() {
        let ua = get_user_agent();
        assert!(ua.starts_with("SekaiCatalog/"));
    }

    #[test]
    fn test_default_path_ends_with_file_name() {
        let resolver = ConfigFileResolver::new("sekai-sync.toml", "SEKAI_TEST_UNUSED_VAR");
        if let Some(path) = resolver.default_path() {
            assert!(path.ends_with("sekai/sekai-sync.toml"));
        }
    }
}
