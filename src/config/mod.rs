//! Configuration layer: typed settings with layered precedence (file → env).

use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use config::{Config, Environment, File};
use serde::Deserialize;
use thiserror::Error;
use tracing::level_filters::LevelFilter;

use crate::domain::language::Language;

const DEFAULT_CONFIG_BASENAME: &str = "config/default";
const ENV_PREFIX: &str = "VETRINA";
const DEFAULT_VIEW_COUNT_TIMEOUT_SECS: u64 = 4;
const DEFAULT_LANGUAGE: &str = "en";
const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("configuration could not be loaded: {0}")]
    Load(#[from] config::ConfigError),
}

/// Root settings for the content layer.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Settings {
    pub provider: ProviderSettings,
    pub language: LanguageSettings,
    pub logging: LoggingSettings,
}

impl Settings {
    /// Layer an optional explicit file over `config/default.*`, then
    /// `VETRINA_`-prefixed environment variables over both.
    pub fn load(config_file: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder =
            Config::builder().add_source(File::with_name(DEFAULT_CONFIG_BASENAME).required(false));

        if let Some(path) = config_file {
            builder = builder.add_source(File::from(path));
        }

        let config = builder
            .add_source(Environment::with_prefix(ENV_PREFIX).separator("__"))
            .build()?;

        Ok(config.try_deserialize()?)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ProviderSettings {
    /// Base URL of the content provider's query API.
    pub base_url: String,
    /// Optional bearer token for authenticated datasets.
    pub api_token: Option<String>,
    /// Bound on the fire-and-forget view-count request.
    pub view_count_timeout_secs: u64,
}

impl ProviderSettings {
    pub fn view_count_timeout(&self) -> Duration {
        Duration::from_secs(self.view_count_timeout_secs)
    }
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            api_token: None,
            view_count_timeout_secs: DEFAULT_VIEW_COUNT_TIMEOUT_SECS,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LanguageSettings {
    pub default_language: String,
    pub fallback_language: String,
}

impl LanguageSettings {
    pub fn default_language(&self) -> Language {
        Language::new(&self.default_language)
    }

    pub fn fallback_language(&self) -> Language {
        Language::new(&self.fallback_language)
    }
}

impl Default for LanguageSettings {
    fn default() -> Self {
        Self {
            default_language: DEFAULT_LANGUAGE.to_owned(),
            fallback_language: DEFAULT_LANGUAGE.to_owned(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Json,
    Compact,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Base level directive (trace|debug|info|warn|error|off).
    pub level: String,
    pub format: LogFormat,
}

impl LoggingSettings {
    pub fn level_filter(&self) -> Option<LevelFilter> {
        LevelFilter::from_str(&self.level).ok()
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: DEFAULT_LOG_LEVEL.to_owned(),
            format: LogFormat::Compact,
        }
    }
}
