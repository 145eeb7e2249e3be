//! Client configuration and store factory.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::http::{HttpStudentStore, DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS};

/// Environment variable that overrides `base_url` from any config file.
pub const BASE_URL_ENV: &str = "CLASSBOOK_BASE_URL";

/// Top-level classbook configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassbookConfig {
    /// Endpoint root for all four store operations.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}
fn default_timeout() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Default for ClassbookConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
        }
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
/// Substituted values are not expanded again.
fn resolve_env_vars(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(start) = rest.find("${") {
        let Some(end) = rest[start..].find('}') else {
            break;
        };
        let var_name = &rest[start + 2..start + end];
        result.push_str(&rest[..start]);
        result.push_str(&std::env::var(var_name).unwrap_or_default());
        rest = &rest[start + end + 1..];
    }
    result.push_str(rest);
    result
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `classbook.toml` in the current directory
/// 2. `~/.config/classbook/config.toml`
///
/// `CLASSBOOK_BASE_URL` overrides whatever the file says.
pub fn load_config() -> Result<ClassbookConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<ClassbookConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("classbook.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            toml::from_str::<ClassbookConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => ClassbookConfig::default(),
    };

    Ok(apply_overrides(config, std::env::var(BASE_URL_ENV).ok()))
}

fn apply_overrides(mut config: ClassbookConfig, base_url_env: Option<String>) -> ClassbookConfig {
    if let Some(url) = base_url_env.filter(|u| !u.trim().is_empty()) {
        config.base_url = url;
    }
    config.base_url = resolve_env_vars(&config.base_url);
    config
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("classbook"))
}

/// Create an HTTP store from configuration.
pub fn create_store(config: &ClassbookConfig) -> Result<HttpStudentStore> {
    anyhow::ensure!(config.timeout_secs >= 1, "timeout_secs must be at least 1");
    HttpStudentStore::with_timeout(&config.base_url, config.timeout_secs)
        .with_context(|| format!("failed to create store for {}", config.base_url))
}
