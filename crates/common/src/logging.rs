//! Tracing subscriber setup.
//!
//! Log lines go to stderr so that commands writing traces to stdout stay
//! pipeable.

use tracing_subscriber::{fmt, EnvFilter};

use crate::config::LoggingConfig;

/// Level used when `--verbose` is given.
pub const VERBOSE_LEVEL: &str = "debug";

/// The filter directive to use when `RUST_LOG` is unset.
pub fn default_directive(config: &LoggingConfig, verbose: bool) -> &str {
    if verbose {
        VERBOSE_LEVEL
    } else {
        config.level.as_str()
    }
}

/// Install the global subscriber.
///
/// `RUST_LOG` wins over both the configured level and `verbose`. A second
/// call leaves the first subscriber in place.
pub fn init_logging(config: &LoggingConfig, verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(config, verbose)));
    let builder = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    let installed = if config.json {
        builder.json().try_init()
    } else {
        builder.compact().with_target(verbose).try_init()
    };
    if let Err(err) = installed {
        tracing::debug!(error = %err, "Subscriber already installed");
    }
}
