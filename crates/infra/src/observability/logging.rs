//! Tracing subscriber setup

use curricula_domain::{CurriculaError, LogFormat, LoggingConfig, Result};
use tracing_subscriber::EnvFilter;

/// Install the global `fmt` subscriber.
///
/// `RUST_LOG` overrides `config.level` when set. Output goes to stderr so
/// command output on stdout stays machine-readable. Calling this twice
/// returns `CurriculaError::Config`.
pub fn init_tracing(config: &LoggingConfig) -> Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => directive_filter(&config.level)?,
    };

    let builder =
        tracing_subscriber::fmt().with_env_filter(filter).with_target(true).with_writer(std::io::stderr);

    let installed = match config.format {
        LogFormat::Pretty => builder.try_init(),
        LogFormat::Json => builder.json().try_init(),
    };

    installed.map_err(|err| {
        CurriculaError::Config(format!("failed to install tracing subscriber: {err}"))
    })?;
    tracing::debug!(level = %config.level, format = %config.format, "Tracing initialised");
    Ok(())
}

fn directive_filter(level: &str) -> Result<EnvFilter> {
    EnvFilter::try_new(level)
        .map_err(|err| CurriculaError::Config(format!("invalid log filter '{level}': {err}")))
}
