//! # Structured Logging
//!
//! Console logging through the tracing ecosystem. The level comes from
//! `RUST_LOG` when set, otherwise from the environment (`MATREQ_ENV` /
//! `APP_ENV`): `debug` for development and test, `info` for production.
//! Set `MATREQ_LOG_FORMAT=json` for one JSON object per line.
//!
//! The `log_enrichment!` and `log_order!` macros give pipeline events a
//! uniform shape: an `operation` name, arbitrary structured fields and a
//! timestamp.

use std::io::IsTerminal;
use std::sync::OnceLock;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::config::ConfigManager;

static LOGGER_INITIALIZED: OnceLock<()> = OnceLock::new();

/// Install the global subscriber. Safe to call more than once.
pub fn init_tracing() {
    LOGGER_INITIALIZED.get_or_init(|| {
        let environment = ConfigManager::detect_environment();
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(default_log_level(&environment)));
        let json = std::env::var("MATREQ_LOG_FORMAT")
            .map(|format| format.eq_ignore_ascii_case("json"))
            .unwrap_or(false);

        let layer = if json {
            fmt::layer()
                .json()
                .with_target(true)
                .with_current_span(true)
                .with_filter(filter)
                .boxed()
        } else {
            fmt::layer()
                .with_target(true)
                .with_level(true)
                .with_ansi(std::io::stdout().is_terminal())
                .with_filter(filter)
                .boxed()
        };

        // Another subscriber (test harness, embedding host) may already be set
        if tracing_subscriber::registry().with(layer).try_init().is_err() {
            tracing::debug!("Global tracing subscriber already initialized");
        }

        tracing::info!(environment = %environment, json = json, "Logging initialized");
    });
}

fn default_log_level(environment: &str) -> &'static str {
    match environment {
        "production" => "info",
        _ => "debug",
    }
}

/// Log an enrichment event
#[macro_export]
macro_rules! log_enrichment {
    ($level:ident, $operation:expr $(,)?) => {
        tracing::$level!(
            operation = %$operation,
            timestamp = %chrono::Utc::now().to_rfc3339(),
            "ENRICHMENT_{}", $operation
        );
    };
    ($level:ident, $operation:expr, $($key:ident: $value:expr),+ $(,)?) => {
        tracing::$level!(
            operation = %$operation,
            $($key = ?$value,)*
            timestamp = %chrono::Utc::now().to_rfc3339(),
            "ENRICHMENT_{}", $operation
        );
    };
}

/// Log an order-creation event
#[macro_export]
macro_rules! log_order {
    ($level:ident, $operation:expr $(,)?) => {
        tracing::$level!(
            operation = %$operation,
            timestamp = %chrono::Utc::now().to_rfc3339(),
            "ORDER_{}", $operation
        );
    };
    ($level:ident, $operation:expr, $($key:ident: $value:expr),+ $(,)?) => {
        tracing::$level!(
            operation = %$operation,
            $($key = ?$value,)*
            timestamp = %chrono::Utc::now().to_rfc3339(),
            "ORDER_{}", $operation
        );
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_mapping() {
        assert_eq!(default_log_level("production"), "info");
        assert_eq!(default_log_level("development"), "debug");
        assert_eq!(default_log_level("test"), "debug");
        assert_eq!(default_log_level("staging"), "debug");
    }

    #[test]
    fn test_init_is_idempotent() {
        init_tracing();
        init_tracing();
        log_enrichment!(info, "TEST", row_number: 1);
        log_order!(debug, "TEST");
    }
}
