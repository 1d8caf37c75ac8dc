//! Connection settings and credential lookup.
//!
//! The token is taken from the first non-blank source among the `--token`
//! flag, the `GITHUB_TOKEN` environment variable and the `oauth_token` entry
//! of the config file (`~/.config/ghkw/config.toml`, or `config.toml` inside
//! `$GHKW_CONFIG_DIR`).

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::error::SearchError;

/// Default GitHub REST endpoint.
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Environment variable holding the GitHub token.
pub const TOKEN_ENV: &str = "GITHUB_TOKEN";

/// Environment variable overriding the config directory.
pub const CONFIG_DIR_ENV: &str = "GHKW_CONFIG_DIR";

/// Settings for the HTTP search client.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Base URL of the GitHub REST API, without a trailing slash.
    pub api_url: String,
    pub user_agent: String,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            user_agent: format!("ghkw/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl SearchConfig {
    pub fn validate(&self) -> Result<(), SearchError> {
        if !(self.api_url.starts_with("http://") || self.api_url.starts_with("https://")) {
            return Err(SearchError::Config(format!(
                "api url must start with http:// or https://, got '{}'",
                self.api_url
            )));
        }
        if self.user_agent.trim().is_empty() {
            return Err(SearchError::Config("user agent must not be empty".into()));
        }
        Ok(())
    }
}

/// Contents of the config file.
#[derive(Debug, Default, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub github: GitHubSection,
}

#[derive(Debug, Default, Deserialize)]
pub struct GitHubSection {
    pub oauth_token: Option<String>,
    pub api_url: Option<String>,
}

impl ConfigFile {
    /// Read and parse `path`. A missing file is an empty config.
    pub fn load(path: &Path) -> Result<Self, SearchError> {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No config file at {}", path.display());
                return Ok(Self::default());
            }
            Err(e) => {
                return Err(SearchError::Config(format!(
                    "cannot read {}: {}",
                    path.display(),
                    e
                )));
            }
        };
        toml::from_str(&text)
            .map_err(|e| SearchError::Config(format!("invalid {}: {}", path.display(), e)))
    }
}

/// Directory holding `config.toml`.
pub fn config_dir() -> Option<PathBuf> {
    if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV) {
        return Some(PathBuf::from(dir));
    }
    dirs::home_dir().map(|home| home.join(".config").join("ghkw"))
}

/// Path of the config file, if a home directory can be found.
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("config.toml"))
}

/// First non-blank token among the flag, the environment and the file.
pub fn resolve_token(
    flag: Option<&str>,
    env: Option<&str>,
    file: &ConfigFile,
) -> Result<String, SearchError> {
    [flag, env, file.github.oauth_token.as_deref()]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|t| !t.is_empty())
        .map(str::to_string)
        .ok_or(SearchError::MissingToken)
}
