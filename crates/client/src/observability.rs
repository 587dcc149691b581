//! Logging subscriber initialisation.

use thiserror::Error;
use tracing_subscriber::{
    EnvFilter, Registry,
    layer::{Layer, SubscriberExt},
    util::SubscriberInitExt,
};

use crate::config::{LogFormat, LoggingConfig};

/// Crates whose logs are too chatty below `warn` for cart diagnostics.
const QUIET_TARGETS: [&str; 4] = ["hyper", "hyper_util", "reqwest", "rustls"];

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync + 'static>;

/// Errors raised while initialising logging.
#[derive(Debug, Error)]
pub enum LoggingError {
    /// Failed to initialise tracing subscriber.
    #[error("failed to initialise tracing subscriber: {0}")]
    TracingSubscriber(#[from] tracing_subscriber::util::TryInitError),
}

/// Install the global tracing subscriber.
///
/// `RUST_LOG` in the environment takes precedence over the configured level.
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed.
pub fn init_logging(config: &LoggingConfig) -> Result<(), LoggingError> {
    tracing_subscriber::registry()
        .with(fmt_layer(config.log_format))
        .with(env_filter(&config.log_level))
        .try_init()?;

    Ok(())
}

fn fmt_layer(format: LogFormat) -> BoxedLayer {
    let layer = tracing_subscriber::fmt::layer().with_target(true);

    match format {
        LogFormat::Compact => layer
            .compact()
            .with_file(true)
            .with_line_number(true)
            .boxed(),
        LogFormat::Json => layer.json().with_current_span(true).boxed(),
    }
}

fn env_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directives(level)))
}

fn directives(level: &str) -> String {
    QUIET_TARGETS
        .iter()
        .fold(level.to_string(), |directives, target| {
            format!("{directives},{target}=warn")
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transport_crates_are_capped_at_warn() {
        assert_eq!(
            directives("debug"),
            "debug,hyper=warn,hyper_util=warn,reqwest=warn,rustls=warn"
        );
    }

    #[test]
    fn second_initialisation_fails() {
        let config = LoggingConfig {
            log_level: "debug".to_string(),
            log_format: LogFormat::Json,
        };

        let first = init_logging(&config);
        let second = init_logging(&config);

        assert!(
            first.is_ok() || second.is_err(),
            "only one global subscriber may be installed"
        );
        assert!(second.is_err(), "re-initialisation must be rejected");
    }
}
