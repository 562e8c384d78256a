//! Logging and tracing setup

use crate::config::LoggingConfig;
use crate::error::GatewayError;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize logging from config; `RUST_LOG` overrides the configured level
pub fn initialize_logging(config: &LoggingConfig) -> Result<(), GatewayError> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    let fmt_layer = match config.format.as_str() {
        "json" => fmt::layer()
            .json()
            .with_target(true)
            .with_thread_ids(true)
            .with_file(true)
            .with_line_number(true)
            .boxed(),
        "pretty" => fmt::layer()
            .pretty()
            .with_target(false)
            .with_thread_ids(true)
            .with_file(true)
            .with_line_number(true)
            .with_ansi(true)
            .boxed(),
        _ => fmt::layer().compact().with_target(false).with_ansi(true).boxed(),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| GatewayError::Logging { message: e.to_string() })
}
