//! Client configuration
//!
//! Values come from (in the order callers usually layer them) the defaults,
//! a YAML file, environment variables, and builder methods.
//!
//! ```yaml
//! base_url: "https://www.notion.so/api/v3/"
//! page_limit: 50
//! max_rounds: 1000
//! timeout_secs: 30
//! ```

use crate::error::{NotionError, Result};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

/// Default API root for notion.so
pub const DEFAULT_BASE_URL: &str = "https://www.notion.so/api/v3/";
/// Blocks requested per `loadPageChunk` round
pub const DEFAULT_PAGE_LIMIT: u32 = 50;
/// Upper bound on pagination rounds for one page
pub const DEFAULT_MAX_ROUNDS: usize = 1000;
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    pub base_url: String,
    /// Session token sent as the `token` cookie; `None` for public pages
    pub token: Option<String>,
    pub page_limit: u32,
    pub max_rounds: usize,
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            token: None,
            page_limit: DEFAULT_PAGE_LIMIT,
            max_rounds: DEFAULT_MAX_ROUNDS,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: concat!("notion-reader/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// File shape: every key optional, missing keys keep their defaults.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    base_url: Option<String>,
    token: Option<String>,
    page_limit: Option<u32>,
    max_rounds: Option<usize>,
    timeout_secs: Option<u64>,
    user_agent: Option<String>,
}

impl ClientConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults overridden by `NOTION_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Self::default().merge_env(|key| std::env::var(key).ok())
    }

    /// Apply overrides from a variable lookup (the process environment in
    /// production, a map in tests).
    pub fn merge_env<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(token) = lookup("NOTION_TOKEN").filter(|t| !t.is_empty()) {
            self.token = Some(token);
        }
        if let Some(base_url) = lookup("NOTION_BASE_URL") {
            self = self.with_base_url(base_url);
        }
        if let Some(limit) = lookup("NOTION_PAGE_LIMIT") {
            self.page_limit = parse_number("NOTION_PAGE_LIMIT", &limit)?;
        }
        if let Some(rounds) = lookup("NOTION_MAX_ROUNDS") {
            self.max_rounds = parse_number("NOTION_MAX_ROUNDS", &rounds)?;
        }
        if let Some(secs) = lookup("NOTION_TIMEOUT_SECS") {
            self.timeout = Duration::from_secs(parse_number("NOTION_TIMEOUT_SECS", &secs)?);
        }
        self.validate()?;
        Ok(self)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            NotionError::config(format!("failed to read {}: {}", path.display(), e))
        })?;
        Self::from_yaml_str(&content)
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let file: ConfigFile = serde_yaml::from_str(yaml)
            .map_err(|e| NotionError::config(format!("invalid config YAML: {}", e)))?;

        let mut config = Self::default();
        if let Some(base_url) = file.base_url {
            config = config.with_base_url(base_url);
        }
        config.token = file.token.filter(|t| !t.is_empty());
        if let Some(limit) = file.page_limit {
            config.page_limit = limit;
        }
        if let Some(rounds) = file.max_rounds {
            config.max_rounds = rounds;
        }
        if let Some(secs) = file.timeout_secs {
            config.timeout = Duration::from_secs(secs);
        }
        if let Some(user_agent) = file.user_agent {
            config.user_agent = user_agent;
        }
        config.validate()?;
        Ok(config)
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Set the API root; a trailing `/` is added when missing.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        if !base_url.ends_with('/') {
            base_url.push('/');
        }
        self.base_url = base_url;
        self
    }

    pub fn with_page_limit(mut self, page_limit: u32) -> Self {
        self.page_limit = page_limit;
        self
    }

    pub fn with_max_rounds(mut self, max_rounds: usize) -> Self {
        self.max_rounds = max_rounds;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Check the base URL parses and the round limit allows at least one round.
    pub fn validate(&self) -> Result<()> {
        url::Url::parse(&self.base_url).map_err(|e| {
            NotionError::config(format!("invalid base_url '{}': {}", self.base_url, e))
        })?;
        if self.max_rounds == 0 {
            return Err(NotionError::config("max_rounds must be at least 1"));
        }
        Ok(())
    }
}

fn parse_number<T: std::str::FromStr>(key: &str, value: &str) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| NotionError::config(format!("{} must be a number, got '{}'", key, value)))
}
