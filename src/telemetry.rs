use crate::config::TelemetryConfig;
use tracing_subscriber::filter::ParseError;
use tracing_subscriber::prelude::*;
use tracing_subscriber::util::TryInitError;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Debug, thiserror::Error)]
pub enum TelemetryError {
    #[error("invalid log filter '{directive}'")]
    Filter {
        directive: String,
        #[source]
        source: ParseError,
    },
    #[error("tracing subscriber already installed")]
    AlreadyInstalled(#[source] TryInitError),
}

/// Directive in effect: a non-blank `RUST_LOG`, else the configured level.
fn directive(config: &TelemetryConfig) -> String {
    std::env::var(EnvFilter::DEFAULT_ENV)
        .ok()
        .filter(|value| !value.trim().is_empty())
        .unwrap_or_else(|| config.log_level.clone())
}

pub fn log_filter(config: &TelemetryConfig) -> Result<EnvFilter, TelemetryError> {
    let directive = directive(config);
    EnvFilter::try_new(&directive).map_err(|source| TelemetryError::Filter { directive, source })
}

/// Install the global subscriber. Board events go to stderr; stdout carries command output.
pub fn init(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    let events = fmt::layer()
        .compact()
        .with_target(false)
        .with_ansi(false)
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(log_filter(config)?)
        .with(events)
        .try_init()
        .map_err(TelemetryError::AlreadyInstalled)
}
