//! Application configuration
//!
//! Loaded from a TOML file; every section and field is optional:
//!
//! ```toml
//! [backend]
//! mode = "remote"              # or "local"
//! base_url = "http://localhost:5000/api"
//! timeout_secs = 30
//! data_file = "tasks.toml"
//!
//! [extractor]
//! kind = "rules"               # or "openai"
//! model = "gpt-4o-mini"
//! base_url = "https://api.openai.com"
//! api_key_env = "OPENAI_API_KEY"
//!
//! [display]
//! utc_offset_minutes = 60      # absent = system local zone
//!
//! [logging]
//! level = "info"
//! ```

use crate::extract::{OpenAiExtractor, OpenAiExtractorConfig, RuleExtractor, TaskExtractor};
use crate::visibility::DayBoundary;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

/// Config file looked up in the working directory when none is given
pub const DEFAULT_CONFIG_FILE: &str = "quadrant-tasks.toml";

/// Environment variable overriding `backend.base_url`
pub const BASE_URL_ENV: &str = "QUADRANT_TASKS_BASE_URL";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("extractor kind 'openai' needs an API key in ${0}")]
    MissingApiKey(String),

    #[error("display.utc_offset_minutes {0} is out of range")]
    InvalidOffset(i32),
}

/// Where tasks live
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendMode {
    /// The remote REST task service
    #[default]
    Remote,
    /// A TOML file on this machine
    Local,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    pub mode: BackendMode,
    pub base_url: String,
    pub timeout_secs: u64,
    pub data_file: PathBuf,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            mode: BackendMode::Remote,
            base_url: "http://localhost:5000/api".to_string(),
            timeout_secs: 30,
            data_file: PathBuf::from("tasks.toml"),
        }
    }
}

impl BackendConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Which extractor the local service uses for bulk add
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExtractorKind {
    #[default]
    Rules,
    OpenAi,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    pub kind: ExtractorKind,
    pub model: String,
    pub base_url: String,
    /// Name of the environment variable holding the API key
    pub api_key_env: String,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            kind: ExtractorKind::Rules,
            model: "gpt-4o-mini".to_string(),
            base_url: "https://api.openai.com".to_string(),
            api_key_env: "OPENAI_API_KEY".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Minutes east of UTC in which "today" is evaluated
    pub utc_offset_minutes: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub backend: BackendConfig,
    pub extractor: ExtractorConfig,
    pub display: DisplayConfig,
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Parse a config file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load the explicit file, else [`DEFAULT_CONFIG_FILE`] if present, else defaults
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::from_file(path),
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    Self::from_file(default_path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// Apply environment overrides through `lookup` (normally `std::env::var`)
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup(BASE_URL_ENV).filter(|u| !u.trim().is_empty()) {
            self.backend.base_url = url;
        }
    }

    /// Zone in which the visibility policy evaluates "today"
    pub fn day_boundary(&self) -> Result<DayBoundary, ConfigError> {
        match self.display.utc_offset_minutes {
            None => Ok(DayBoundary::Local),
            Some(minutes) => {
                DayBoundary::from_offset_minutes(minutes).ok_or(ConfigError::InvalidOffset(minutes))
            }
        }
    }

    /// Build the configured extractor
    ///
    /// The OpenAI key is read through `lookup` from the variable named by
    /// `extractor.api_key_env`.
    pub fn build_extractor(
        &self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Arc<dyn TaskExtractor>, ConfigError> {
        match self.extractor.kind {
            ExtractorKind::Rules => Ok(Arc::new(RuleExtractor::new())),
            ExtractorKind::OpenAi => {
                let key = lookup(&self.extractor.api_key_env)
                    .filter(|k| !k.trim().is_empty())
                    .ok_or_else(|| ConfigError::MissingApiKey(self.extractor.api_key_env.clone()))?;
                let config = OpenAiExtractorConfig::new(key, &self.extractor.model)
                    .with_base_url(&self.extractor.base_url);
                Ok(Arc::new(OpenAiExtractor::new(config)))
            }
        }
    }
}
