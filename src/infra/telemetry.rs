use std::sync::Once;

use metrics::{Unit, describe_counter, describe_gauge};
use tracing::level_filters::LevelFilter;
use tracing_error::ErrorLayer;
use tracing_subscriber::{
    EnvFilter, fmt,
    layer::{Layer, SubscriberExt},
    util::SubscriberInitExt,
};

use crate::config::{LogFormat, LoggingSettings};

use super::error::InfraError;

static METRIC_DESCRIPTIONS: Once = Once::new();

const CRATE_TARGET: &str = env!("CARGO_CRATE_NAME");

pub const POOL_ACQUIRE_TOTAL: &str = "markdown_surface_pool_acquire_total";
pub const POOL_RELEASE_TOTAL: &str = "markdown_surface_pool_release_total";
pub const POOL_IDLE: &str = "markdown_surface_pool_idle";
pub const DOCUMENT_LOAD_TOTAL: &str = "markdown_surface_document_load_total";
pub const DOCUMENT_REUSE_TOTAL: &str = "markdown_surface_document_reuse_total";
pub const BRIDGE_DROPPED_TOTAL: &str = "markdown_surface_bridge_dropped_total";

/// Install a global tracing subscriber for hosts that do not bring their own.
pub fn init(logging: &LoggingSettings) -> Result<(), InfraError> {
    describe_metrics();

    let env_filter = env_filter(logging.level)?;

    let fmt_layer = match logging.format {
        LogFormat::Json => fmt::layer()
            .json()
            .with_current_span(true)
            .with_span_list(true)
            .with_target(true)
            .boxed(),
        LogFormat::Compact => fmt::layer().compact().with_target(true).boxed(),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(ErrorLayer::default())
        .with(fmt_layer)
        .try_init()
        .map_err(|err| {
            InfraError::telemetry(format!("failed to install tracing subscriber: {err}"))
        })
}

/// `RUST_LOG` wins when set. Otherwise the configured level applies to this
/// crate and other targets stay at `warn` or quieter.
fn env_filter(level: LevelFilter) -> Result<EnvFilter, InfraError> {
    if std::env::var_os(EnvFilter::DEFAULT_ENV).is_some() {
        return Ok(EnvFilter::builder()
            .with_default_directive(level.into())
            .from_env_lossy());
    }
    crate_filter(level)
}

fn crate_filter(level: LevelFilter) -> Result<EnvFilter, InfraError> {
    let directives = format!("{},{CRATE_TARGET}={level}", level.min(LevelFilter::WARN));
    EnvFilter::try_new(&directives).map_err(|err| {
        InfraError::telemetry(format!("invalid log directives `{directives}`: {err}"))
    })
}

/// Register descriptions for every metric the crate emits. Safe to call
/// repeatedly; only the first call has an effect.
pub fn describe_metrics() {
    METRIC_DESCRIPTIONS.call_once(|| {
        describe_counter!(
            POOL_ACQUIRE_TOTAL,
            Unit::Count,
            "Surfaces handed out by the pool, labelled by idle or fresh source."
        );
        describe_counter!(
            POOL_RELEASE_TOTAL,
            Unit::Count,
            "Surfaces reset and returned to the pool."
        );
        describe_gauge!(
            POOL_IDLE,
            Unit::Count,
            "Current number of idle surfaces held by the pool."
        );
        describe_counter!(
            DOCUMENT_LOAD_TOTAL,
            Unit::Count,
            "Full document loads (template, script and stylesheet)."
        );
        describe_counter!(
            DOCUMENT_REUSE_TOTAL,
            Unit::Count,
            "Display requests served by a content push into an already loaded document."
        );
        describe_counter!(
            BRIDGE_DROPPED_TOTAL,
            Unit::Count,
            "Inbound bridge messages dropped because their payload could not be decoded."
        );
    });
}
