use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::Deserialize;
use url::Url;

use crate::api::AuthToken;

pub const DEFAULT_API_URL: &str = "https://secondbrain-5u8x.onrender.com/";

pub const ENV_API_URL: &str = "CLOUDBRAIN_API_URL";
pub const ENV_TOKEN: &str = "CLOUDBRAIN_TOKEN";
pub const ENV_TIMEOUT_SECS: &str = "CLOUDBRAIN_TIMEOUT_SECS";

/// On-disk shape of `config.toml`. Every key is optional.
#[derive(Debug, Deserialize, Clone, Default)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    #[serde(default)]
    api_url: Option<String>,
    #[serde(default)]
    token: Option<String>,
    #[serde(default)]
    timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub api_url: Url,
    pub token: Option<AuthToken>,
    pub timeout_secs: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self { api_url: Url::parse(DEFAULT_API_URL).unwrap_or_else(|e| panic!("default api url: {e}")), token: None, timeout_secs: None }
    }
}

impl Config {
    /// Load from `path`, or from the platform config dir when `None`.
    /// A missing default file yields defaults; a missing explicit file is an error.
    /// Environment overrides are applied on top.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_with(path, default_config_path().as_deref(), |key| std::env::var(key).ok())
    }

    /// [`Config::load`] with the default location and environment supplied by the caller.
    pub fn load_with<F>(path: Option<&Path>, default_path: Option<&Path>, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = match (path, default_path) {
            (Some(p), _) => Self::from_file(p)?,
            (None, Some(p)) if p.exists() => Self::from_file(p)?,
            _ => Self::default(),
        };
        cfg.apply_env(lookup)?;
        Ok(cfg)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).with_context(|| format!("reading config: {}", path.display()))?;
        Self::from_toml_str(&text).with_context(|| format!("parsing config: {}", path.display()))
    }

    pub fn from_toml_str(text: &str) -> Result<Self> {
        let file: FileConfig = toml::from_str(text)?;
        let mut cfg = Self::default();
        if let Some(u) = file.api_url { cfg.set_api_url(&u)?; }
        cfg.token = file.token.filter(|t| !t.trim().is_empty()).map(AuthToken::new);
        cfg.timeout_secs = file.timeout_secs;
        Ok(cfg)
    }

    /// Override from environment-style lookups. An unparseable timeout is ignored.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(u) = lookup(ENV_API_URL).filter(|s| !s.trim().is_empty()) {
            self.set_api_url(&u).with_context(|| format!("{ENV_API_URL} is not a valid url"))?;
        }
        if let Some(t) = lookup(ENV_TOKEN).filter(|s| !s.trim().is_empty()) {
            self.token = Some(AuthToken::new(t));
        }
        if let Some(secs) = lookup(ENV_TIMEOUT_SECS).and_then(|s| s.trim().parse().ok()) {
            self.timeout_secs = Some(secs);
        }
        Ok(())
    }

    /// Parse and store the API base url. A trailing slash is added so that
    /// endpoint paths join beneath it rather than replacing its last segment.
    pub fn set_api_url(&mut self, raw: &str) -> Result<()> {
        let mut url = Url::parse(raw.trim()).with_context(|| format!("invalid api url: {raw}"))?;
        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }
        self.api_url = url;
        Ok(())
    }

    pub fn timeout(&self) -> Option<Duration> { self.timeout_secs.map(Duration::from_secs) }
}

pub fn default_config_path() -> Option<PathBuf> {
    ProjectDirs::from("dev", "cloudbrain", "cloudbrain").map(|p| p.config_dir().join("config.toml"))
}
