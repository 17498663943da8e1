//! Tracing subscriber wiring.
//!
//! Logs go to stderr so that stdout carries only command output. `RUST_LOG`
//! overrides the configured level when present.

use std::io::IsTerminal;

use anyhow::Context;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{LogFormat, Settings};

/// Installs the global subscriber. Calling it again keeps the first one.
pub fn init(settings: &Settings) -> anyhow::Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&settings.log_level)
            .with_context(|| format!("invalid log level '{}'", settings.log_level))?,
    };

    let registry = tracing_subscriber::registry().with(filter);
    let installed = match settings.log_format {
        LogFormat::Pretty => registry
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_ansi(std::io::stderr().is_terminal()),
            )
            .try_init(),
        LogFormat::Json => registry
            .with(
                fmt::layer()
                    .json()
                    .with_writer(std::io::stderr)
                    .with_current_span(false),
            )
            .try_init(),
    };

    if installed.is_err() {
        tracing::debug!("global tracing subscriber already initialized; keeping it");
    } else {
        tracing::debug!(
            log_level = %settings.log_level,
            log_format = ?settings.log_format,
            "logging initialized"
        );
    }
    Ok(())
}
