//! Linker configuration.
//!
//! Configuration can be loaded from:
//! - TOML files (default: ~/.config/roster-link/linker.toml)
//! - Environment variables (ROSTER_* prefixed)
//!
//! # Example
//!
//! ```rust,no_run
//! use roster_link::config::LinkerConfig;
//!
//! // Load from default path or fall back to env vars
//! let config = LinkerConfig::load().expect("Failed to load config");
//!
//! // Or explicitly from a file
//! let config = LinkerConfig::from_file(std::path::Path::new("linker.toml")).expect("Failed to load");
//! ```
//!
//! ```toml
//! [linker]
//! base_url = "https://school.example"
//! id_prefix = "PDM"
//! allow_ambiguous_single_tokens = false
//! collections = ["students", "faculty"]
//! ```

use std::env;
use std::path::{Path, PathBuf};

use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use roster_core::defaults;

use crate::resolver::DefaultUrlResolver;
use crate::scanner::{validate_id_prefix, ScanOptions};

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

impl From<ConfigError> for roster_core::Error {
    fn from(e: ConfigError) -> Self {
        roster_core::Error::Config(e.to_string())
    }
}

/// Settings for a linking run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LinkerConfig {
    /// Base URL prepended to image routes.
    pub base_url: String,
    /// Route under the base URL that serves images.
    pub image_route: String,
    /// Prefix of structured IDs.
    pub id_prefix: String,
    /// Emit single-token matches that resolve to several people.
    pub allow_ambiguous_single_tokens: bool,
    /// Collections the linker may read records from.
    pub collections: Vec<String>,
    /// Maximum records considered per run.
    pub query_limit: usize,
    /// Sample size for `peek`.
    pub peek_limit: usize,
}

impl Default for LinkerConfig {
    fn default() -> Self {
        Self {
            base_url: defaults::BASE_URL.to_string(),
            image_route: defaults::IMAGE_ROUTE.to_string(),
            id_prefix: defaults::ID_PREFIX.to_string(),
            allow_ambiguous_single_tokens: defaults::ALLOW_AMBIGUOUS_SINGLE_TOKENS,
            collections: vec![defaults::COLLECTION.to_string()],
            query_limit: defaults::QUERY_LIMIT,
            peek_limit: defaults::PEEK_LIMIT,
        }
    }
}

impl LinkerConfig {
    /// Get the default config file path.
    ///
    /// Returns: ~/.config/roster-link/linker.toml
    pub fn default_config_path() -> PathBuf {
        let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from(".config"));
        path.push("roster-link");
        path.push("linker.toml");
        path
    }

    /// Load configuration from the default path, falling back to environment variables.
    pub fn load() -> ConfigResult<Self> {
        let path = Self::default_config_path();

        if path.exists() {
            info!("Loading linker config from: {}", path.display());
            Self::from_file(&path)
        } else {
            debug!(
                "Config file not found at {}, using environment variables",
                path.display()
            );
            let config = Self::from_env();
            config.validate()?;
            Ok(config)
        }
    }

    /// Load configuration from a TOML file.
    ///
    /// `${VAR}` placeholders are replaced from the environment before parsing.
    pub fn from_file(path: &Path) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from TOML text with a `[linker]` table.
    pub fn from_toml_str(content: &str) -> ConfigResult<Self> {
        let content = Self::substitute_env_vars(content);

        #[derive(Deserialize)]
        struct TomlRoot {
            #[serde(default)]
            linker: LinkerConfig,
        }

        let root: TomlRoot = toml::from_str(&content)?;
        root.linker.validate()?;
        Ok(root.linker)
    }

    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    ///
    /// Unset or unparsable values keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(base_url) = lookup("ROSTER_BASE_URL") {
            config.base_url = base_url;
        }
        if let Some(route) = lookup("ROSTER_IMAGE_ROUTE") {
            config.image_route = route;
        }
        if let Some(prefix) = lookup("ROSTER_ID_PREFIX") {
            config.id_prefix = prefix.trim().to_uppercase();
        }
        if let Some(allow) = lookup("ROSTER_ALLOW_AMBIGUOUS").and_then(|v| parse_bool(&v)) {
            config.allow_ambiguous_single_tokens = allow;
        }
        if let Some(collections) = lookup("ROSTER_COLLECTIONS") {
            config.collections = collections
                .split(',')
                .map(str::trim)
                .filter(|c| !c.is_empty())
                .map(String::from)
                .collect();
        }
        if let Some(limit) = lookup("ROSTER_QUERY_LIMIT").and_then(|v| v.parse().ok()) {
            config.query_limit = limit;
        }
        if let Some(limit) = lookup("ROSTER_PEEK_LIMIT").and_then(|v| v.parse().ok()) {
            config.peek_limit = limit;
        }

        config
    }

    /// Validate the configuration.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.base_url.is_empty() {
            return Err(ConfigError::Validation(
                "base_url cannot be empty".to_string(),
            ));
        }

        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(ConfigError::Validation(format!(
                "base_url must start with http:// or https://, got: {}",
                self.base_url
            )));
        }

        validate_id_prefix(&self.id_prefix).map_err(|e| ConfigError::Validation(e.to_string()))?;

        if self.collections.is_empty() {
            return Err(ConfigError::Validation(
                "at least one collection must be configured".to_string(),
            ));
        }

        if self.query_limit == 0 || self.query_limit > defaults::QUERY_LIMIT {
            return Err(ConfigError::Validation(format!(
                "query_limit must be between 1 and {}, got: {}",
                defaults::QUERY_LIMIT,
                self.query_limit
            )));
        }

        if self.peek_limit == 0 {
            return Err(ConfigError::Validation(
                "peek_limit must be positive".to_string(),
            ));
        }

        Ok(())
    }

    /// Scanner options described by this configuration.
    pub fn scan_options(&self) -> ScanOptions {
        ScanOptions::default()
            .with_id_prefix(self.id_prefix.clone())
            .with_ambiguous_single_tokens(self.allow_ambiguous_single_tokens)
    }

    /// Default URL strategy described by this configuration.
    pub fn url_resolver(&self) -> DefaultUrlResolver {
        DefaultUrlResolver::new(&self.base_url).with_image_route(&self.image_route)
    }

    /// Substitute environment variables in the format ${VAR_NAME}.
    fn substitute_env_vars(content: &str) -> String {
        let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}").expect("env var pattern is valid");
        re.replace_all(content, |caps: &Captures| {
            let var_name = &caps[1];
            env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        })
        .to_string()
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
