//! Configuration layer: typed settings with layered precedence
//! (defaults → file → environment).

use std::{path::Path, str::FromStr};

use config::{Config, Environment, File};
use serde::Deserialize;
use thiserror::Error;
use tracing::level_filters::LevelFilter;

use crate::domain::HostPlatform;

const LOCAL_CONFIG_BASENAME: &str = "markdown-surface";
const ENV_PREFIX: &str = "MARKDOWN_SURFACE";
pub const DESKTOP_INITIAL_POOL_SIZE: usize = 100;
pub const MOBILE_INITIAL_POOL_SIZE: usize = 10;
const MAX_INITIAL_POOL_SIZE: usize = 1024;

/// Fully-resolved settings after precedence resolution and validation.
#[derive(Debug, Clone, Default)]
pub struct Settings {
    pub logging: LoggingSettings,
    pub pool: PoolSettings,
}

#[derive(Debug, Clone)]
pub struct LoggingSettings {
    pub level: LevelFilter,
    pub format: LogFormat,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: LevelFilter::INFO,
            format: LogFormat::Compact,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub enum LogFormat {
    Json,
    Compact,
}

/// Surface pool sizing and reuse policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolSettings {
    /// Platform whose capability table and stylesheet variants apply.
    pub platform: HostPlatform,
    /// Surfaces created up front when the pool is built.
    pub initial_size: usize,
    /// Keep the applied-style identity when a surface is returned, so the next
    /// display with the same style skips the full document load.
    pub retain_document_across_reuse: bool,
}

impl PoolSettings {
    pub fn for_platform(platform: HostPlatform) -> Self {
        Self {
            platform,
            initial_size: default_initial_pool_size(platform),
            retain_document_across_reuse: true,
        }
    }
}

impl Default for PoolSettings {
    fn default() -> Self {
        Self::for_platform(HostPlatform::current())
    }
}

/// Resource-rich desktop hosts pre-warm far more surfaces than mobile ones.
pub fn default_initial_pool_size(platform: HostPlatform) -> usize {
    match platform {
        HostPlatform::Desktop => DESKTOP_INITIAL_POOL_SIZE,
        HostPlatform::Mobile => MOBILE_INITIAL_POOL_SIZE,
    }
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
///
/// `markdown-surface.{toml,json,yaml}` in the working directory is optional;
/// an explicit `config_file` must exist.
pub fn load(config_file: Option<&Path>) -> Result<Settings, LoadError> {
    let mut builder =
        Config::builder().add_source(File::with_name(LOCAL_CONFIG_BASENAME).required(false));

    if let Some(path) = config_file {
        builder = builder.add_source(File::from(path).required(true));
    }

    builder = builder.add_source(Environment::with_prefix(ENV_PREFIX).separator("__"));

    let raw: RawSettings = builder.build()?.try_deserialize()?;
    Settings::from_raw(raw)
}

impl Settings {
    fn from_raw(raw: RawSettings) -> Result<Self, LoadError> {
        let RawSettings { logging, pool } = raw;

        let logging = build_logging_settings(logging)?;
        let pool = build_pool_settings(pool)?;

        Ok(Self { logging, pool })
    }
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

fn build_pool_settings(pool: RawPoolSettings) -> Result<PoolSettings, LoadError> {
    let platform = match pool.platform {
        Some(value) => parse_platform(&value)
            .ok_or_else(|| LoadError::invalid("pool.platform", "expected `desktop` or `mobile`"))?,
        None => HostPlatform::current(),
    };

    let initial_size = pool
        .initial_size
        .unwrap_or_else(|| default_initial_pool_size(platform));
    if initial_size > MAX_INITIAL_POOL_SIZE {
        return Err(LoadError::invalid(
            "pool.initial_size",
            format!("must not exceed {MAX_INITIAL_POOL_SIZE}"),
        ));
    }

    Ok(PoolSettings {
        platform,
        initial_size,
        retain_document_across_reuse: pool.retain_document_across_reuse.unwrap_or(true),
    })
}

fn parse_platform(value: &str) -> Option<HostPlatform> {
    match value.trim().to_ascii_lowercase().as_str() {
        "desktop" => Some(HostPlatform::Desktop),
        "mobile" => Some(HostPlatform::Mobile),
        _ => None,
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawSettings {
    logging: RawLoggingSettings,
    pool: RawPoolSettings,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawLoggingSettings {
    level: Option<String>,
    json: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawPoolSettings {
    platform: Option<String>,
    initial_size: Option<usize>,
    retain_document_across_reuse: Option<bool>,
}
