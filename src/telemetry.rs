//! Tracing subscriber setup for the server binary.
//!
//! `RUST_LOG` takes precedence over the configured `server.log_level`.
//! Production emits newline-delimited JSON; other environments use the
//! compact human-readable format.

use std::error::Error;

use tracing_subscriber::EnvFilter;

use crate::config::ServerConfig;

/// Boxed error that can cross thread boundaries.
pub type TelemetryError = Box<dyn Error + Send + Sync>;

/// Install the global subscriber.
///
/// # Errors
/// - the log level is not a valid filter directive
/// - a global subscriber is already installed
pub fn init_tracing(server: &ServerConfig) -> Result<(), TelemetryError> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => env_filter(&server.log_level)?,
    };

    if server.is_production() {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .try_init()
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .try_init()
    }
}

fn env_filter(directives: &str) -> Result<EnvFilter, TelemetryError> {
    Ok(EnvFilter::try_new(directives)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_send_sync<T: Send + Sync>(_: &T) {}

    #[test]
    fn default_log_level_is_a_valid_filter() {
        assert!(env_filter(&ServerConfig::default().log_level).is_ok());
    }

    #[test]
    fn malformed_directive_is_rejected() {
        assert!(env_filter("ahp_ranker=[").is_err());
    }

    #[test]
    fn second_install_fails_with_thread_safe_error() {
        let server = ServerConfig::default();
        let _ = init_tracing(&server);

        let err = init_tracing(&server).unwrap_err();

        assert_send_sync(&err);
    }
}
