use error_stack::{Result, ResultExt};
use std::io::IsTerminal;
use thiserror::Error;
use tracing::level_filters::LevelFilter;
use tracing::Subscriber;
use tracing_error::ErrorLayer;
use tracing_subscriber::fmt::time::ChronoUtc;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{layer::SubscriberExt, EnvFilter, Layer};

use crate::config::{self, LoggingStyle};

#[derive(Debug, Error)]
#[error("Failed to initialize tracing")]
pub struct TracingInitError;

pub fn init(config: &config::Logging) -> Result<(), TracingInitError> {
    let ansi = std::io::stderr().is_terminal();
    let console = console_layer(ansi, config.style, &config.targets);

    tracing_subscriber::registry()
        .with(ErrorLayer::default())
        .with(console)
        .try_init()
        .change_context(TracingInitError)
        .attach_printable("already initialized tracing")?;

    if std::env::var("RUST_LOG").is_ok() {
        tracing::warn!("`RUST_LOG` is ignored, please use `logging.targets` or `CHIRPER_LOGGING_TARGETS` instead");
    }

    Ok(())
}

/// Installs a subscriber that writes through the test writer so the
/// output of a failed test can be captured by `cargo test`.
#[cfg(test)]
pub fn init_for_tests() {
    let targets = std::env::var("CHIRPER_LOGGING_TARGETS").unwrap_or_default();
    let console = tracing_subscriber::fmt::layer()
        .with_test_writer()
        .with_filter(make_env_filter(&targets));

    // multiple tests may attempt to install it
    tracing_subscriber::registry()
        .with(ErrorLayer::default())
        .with(console)
        .try_init()
        .ok();
}

// Timestamps are always rendered in UTC.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3fZ";

fn console_layer<S>(ansi: bool, style: LoggingStyle, targets: &str) -> Box<dyn Layer<S> + Send + Sync>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    let filter = make_env_filter(targets);
    let layer = tracing_subscriber::fmt::layer()
        .with_ansi(ansi)
        .with_timer(ChronoUtc::new(TIMESTAMP_FORMAT.into()))
        .with_writer(std::io::stderr);

    match style {
        LoggingStyle::Compact => layer.compact().with_filter(filter).boxed(),
        LoggingStyle::Full => layer.with_filter(filter).boxed(),
        LoggingStyle::Pretty => layer.pretty().with_filter(filter).boxed(),
        LoggingStyle::Json => layer
            .json()
            .flatten_event(true)
            .with_span_list(true)
            .with_filter(filter)
            .boxed(),
    }
}

fn make_env_filter(targets: &str) -> EnvFilter {
    let default_level = if cfg!(debug_assertions) {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };

    EnvFilter::builder()
        .with_default_directive(default_level.into())
        .parse_lossy(targets)
}
