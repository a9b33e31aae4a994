//! Configuration layer: typed settings with layered precedence (file → env).

use std::{path::PathBuf, str::FromStr, time::Duration};

use config::{Config, Environment, File};
use serde::Deserialize;
use thiserror::Error;
use tracing::level_filters::LevelFilter;

const DEFAULT_CONFIG_BASENAME: &str = "config/default";
const LOCAL_CONFIG_BASENAME: &str = "marquee";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
const DEFAULT_RELEASE_FETCH_LIMIT: u32 = 500;
const DEFAULT_PREFERENCES_PATH: &str = "marquee-prefs.json";

/// Fully-resolved console settings after precedence resolution and validation.
#[derive(Debug, Clone)]
pub struct Settings {
    pub backend: BackendSettings,
    pub logging: LoggingSettings,
    pub preferences: PreferenceSettings,
}

#[derive(Debug, Clone)]
pub struct BackendSettings {
    pub base_url: String,
    pub api_token: Option<String>,
    pub request_timeout: Duration,
    /// The limit requested from the release endpoints, which are always
    /// fetched in bulk.
    pub release_fetch_limit: u32,
}

#[derive(Debug, Clone)]
pub struct LoggingSettings {
    pub level: LevelFilter,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Copy)]
pub enum LogFormat {
    Json,
    Compact,
}

#[derive(Debug, Clone)]
pub struct PreferenceSettings {
    pub path: PathBuf,
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to build configuration: {0}")]
    Build(#[from] config::ConfigError),
    #[error("invalid configuration for `{key}`: {reason}")]
    Invalid { key: &'static str, reason: String },
}

impl LoadError {
    fn invalid(key: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            key,
            reason: reason.into(),
        }
    }
}

/// Load settings using the configured precedence (file → environment).
pub fn load(config_file: Option<&std::path::Path>) -> Result<Settings, LoadError> {
    let mut builder = Config::builder()
        .add_source(File::with_name(DEFAULT_CONFIG_BASENAME).required(false))
        .add_source(File::with_name(LOCAL_CONFIG_BASENAME).required(false));

    if let Some(path) = config_file {
        builder = builder.add_source(File::from(path).required(true));
    }

    builder = builder.add_source(Environment::with_prefix("MARQUEE").separator("__"));

    let raw: RawSettings = builder.build()?.try_deserialize()?;
    Settings::from_raw(raw)
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawSettings {
    backend: RawBackendSettings,
    logging: RawLoggingSettings,
    preferences: RawPreferenceSettings,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawBackendSettings {
    base_url: Option<String>,
    api_token: Option<String>,
    request_timeout_seconds: Option<u64>,
    release_fetch_limit: Option<u32>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawLoggingSettings {
    level: Option<String>,
    json: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawPreferenceSettings {
    path: Option<PathBuf>,
}

impl Settings {
    fn from_raw(raw: RawSettings) -> Result<Self, LoadError> {
        let RawSettings {
            backend,
            logging,
            preferences,
        } = raw;

        Ok(Self {
            backend: build_backend_settings(backend)?,
            logging: build_logging_settings(logging)?,
            preferences: build_preference_settings(preferences),
        })
    }
}

fn build_backend_settings(backend: RawBackendSettings) -> Result<BackendSettings, LoadError> {
    let base_url = backend
        .base_url
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .ok_or_else(|| LoadError::invalid("backend.base_url", "value is required"))?;
    url::Url::parse(&base_url)
        .map_err(|err| LoadError::invalid("backend.base_url", format!("failed to parse: {err}")))?;

    let request_timeout = Duration::from_secs(
        backend
            .request_timeout_seconds
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS),
    );

    let release_fetch_limit = backend
        .release_fetch_limit
        .unwrap_or(DEFAULT_RELEASE_FETCH_LIMIT);
    if release_fetch_limit == 0 {
        return Err(LoadError::invalid(
            "backend.release_fetch_limit",
            "must be greater than zero",
        ));
    }

    Ok(BackendSettings {
        base_url,
        api_token: backend.api_token.filter(|token| !token.trim().is_empty()),
        request_timeout,
        release_fetch_limit,
    })
}

fn build_logging_settings(logging: RawLoggingSettings) -> Result<LoggingSettings, LoadError> {
    let level = match logging.level {
        Some(level) => LevelFilter::from_str(level.as_str()).map_err(|err| {
            LoadError::invalid("logging.level", format!("failed to parse: {err}"))
        })?,
        None => LevelFilter::INFO,
    };

    let format = if logging.json.unwrap_or(false) {
        LogFormat::Json
    } else {
        LogFormat::Compact
    };

    Ok(LoggingSettings { level, format })
}

fn build_preference_settings(preferences: RawPreferenceSettings) -> PreferenceSettings {
    PreferenceSettings {
        path: preferences
            .path
            .unwrap_or_else(|| PathBuf::from(DEFAULT_PREFERENCES_PATH)),
    }
}
