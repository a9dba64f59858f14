// src/logging.rs

//! `tracing` subscriber setup for programs built on this crate.
//!
//! The library itself only emits events; installing a subscriber is left to
//! the binary (see `demos/pump_scenarios.rs`).

use crate::core::PumpqError;
use std::env;
use tracing_subscriber::EnvFilter;

/// How the global subscriber should behave.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    /// Explicit filter directives (e.g. `pumpq=debug`). When absent the
    /// filter comes from `RUST_LOG`, then from `default_directive`.
    pub directives: Option<String>,
    /// Fallback directive.
    pub default_directive: String,
    /// Colour output.
    pub ansi: bool,
    /// Print event targets (module paths).
    pub include_targets: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            directives: None,
            default_directive: "info".to_string(),
            ansi: true,
            include_targets: false,
        }
    }
}

impl LoggingConfig {
    /// Defaults overridden by `PUMPQ_LOG` (filter directives) and
    /// `PUMPQ_LOG_ANSI` (`true`/`1`/`yes` enables colour).
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(directives) = env::var("PUMPQ_LOG") {
            if !directives.trim().is_empty() {
                config.directives = Some(directives);
            }
        }
        if let Ok(ansi) = env::var("PUMPQ_LOG_ANSI") {
            config.ansi = ansi.eq_ignore_ascii_case("true") || ansi == "1" || ansi.eq_ignore_ascii_case("yes");
        }
        config
    }

    fn resolve_filter(&self) -> Result<EnvFilter, PumpqError> {
        if let Some(directives) = &self.directives {
            EnvFilter::try_new(directives).map_err(|err| PumpqError::Logging {
                message: format!("invalid tracing directive '{}': {}", directives, err),
            })
        } else {
            match EnvFilter::try_from_default_env() {
                Ok(filter) => Ok(filter),
                Err(_) => Ok(EnvFilter::new(self.default_directive.clone())),
            }
        }
    }
}

/// Installs a formatted subscriber as the process-wide default.
///
/// # Errors
/// Returns `PumpqError::Logging` if the directives do not parse or a global
/// subscriber is already installed.
pub fn init_tracing(config: &LoggingConfig) -> Result<(), PumpqError> {
    let filter = config.resolve_filter()?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(config.ansi)
        .with_target(config.include_targets)
        .try_init()
        .map_err(|err| PumpqError::Logging { message: err.to_string() })
}
