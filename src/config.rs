// src/config.rs

//! Harness configuration, with environment overrides.
//!
//! Recognized variables:
//! - `PUMPQ_BACKEND` - `register` (default) or `statevector`
//! - `PUMPQ_ALARM` - `parity` (default) or `demorgan`
//! - `PUMPQ_SHOTS` - shots per state-vector run (default 1024)
//! - `PUMPQ_SEED` - sampling seed for state-vector runs

use crate::circuits::pump::AlarmLogic;
use crate::core::PumpqError;
use crate::simulation::SimulatorConfig;
use std::env;
use std::fmt;
use std::str::FromStr;

/// Which execution path evaluates each scenario.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Backend {
    /// Classical bit register (`simulation::evaluate`).
    #[default]
    Register,
    /// Shot-sampled amplitude vector (`simulation::Simulator`).
    StateVector,
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Backend::Register => write!(f, "register"),
            Backend::StateVector => write!(f, "statevector"),
        }
    }
}

impl FromStr for Backend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "register" | "classical" => Ok(Backend::Register),
            "statevector" | "state-vector" | "sv" => Ok(Backend::StateVector),
            other => Err(format!("unknown backend '{}', expected 'register' or 'statevector'", other)),
        }
    }
}

/// Settings for a harness run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HarnessConfig {
    /// Evaluation path (`PUMPQ_BACKEND`).
    pub backend: Backend,
    /// Alarm construction (`PUMPQ_ALARM`).
    pub alarm: AlarmLogic,
    /// Shot count and seed for the state-vector backend (`PUMPQ_SHOTS`, `PUMPQ_SEED`).
    pub simulator: SimulatorConfig,
}

impl HarnessConfig {
    /// Defaults overridden by `PUMPQ_*` environment variables.
    ///
    /// # Errors
    /// Returns `PumpqError::InvalidConfig` for a variable that is set but
    /// does not parse.
    pub fn from_env() -> Result<Self, PumpqError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`HarnessConfig::from_env`] with a custom variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, PumpqError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(value) = non_empty(&lookup, "PUMPQ_BACKEND") {
            config.backend = parse_value("PUMPQ_BACKEND", &value)?;
        }
        if let Some(value) = non_empty(&lookup, "PUMPQ_ALARM") {
            config.alarm = parse_value("PUMPQ_ALARM", &value)?;
        }
        if let Some(value) = non_empty(&lookup, "PUMPQ_SHOTS") {
            config.simulator.shots = parse_value("PUMPQ_SHOTS", &value)?;
        }
        if let Some(value) = non_empty(&lookup, "PUMPQ_SEED") {
            config.simulator.seed = parse_value("PUMPQ_SEED", &value)?;
        }
        Ok(config)
    }
}

fn non_empty<F>(lookup: &F, key: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key).filter(|v| !v.trim().is_empty())
}

fn parse_value<T>(key: &str, value: &str) -> Result<T, PumpqError>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    value.trim().parse::<T>().map_err(|err| PumpqError::InvalidConfig {
        key: key.to_string(),
        value: value.to_string(),
        message: err.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_without_variables() -> Result<(), PumpqError> {
        let config = HarnessConfig::from_lookup(|_| None)?;
        assert_eq!(config, HarnessConfig::default());
        assert_eq!(config.backend, Backend::Register);
        assert_eq!(config.alarm, AlarmLogic::ParityCascade);
        assert_eq!(config.simulator.shots, 1024);
        Ok(())
    }

    #[test]
    fn test_overrides_are_applied() -> Result<(), PumpqError> {
        let config = HarnessConfig::from_lookup(lookup_from(&[
            ("PUMPQ_BACKEND", "statevector"),
            ("PUMPQ_ALARM", "demorgan"),
            ("PUMPQ_SHOTS", " 256 "),
            ("PUMPQ_SEED", "99"),
        ]))?;
        assert_eq!(config.backend, Backend::StateVector);
        assert_eq!(config.alarm, AlarmLogic::DeMorgan);
        assert_eq!(config.simulator.shots, 256);
        assert_eq!(config.simulator.seed, 99);
        Ok(())
    }

    #[test]
    fn test_blank_value_keeps_default() -> Result<(), PumpqError> {
        let config = HarnessConfig::from_lookup(lookup_from(&[("PUMPQ_SHOTS", "  ")]))?;
        assert_eq!(config.simulator.shots, 1024);
        Ok(())
    }

    #[test]
    fn test_malformed_value_is_reported() {
        let result = HarnessConfig::from_lookup(lookup_from(&[("PUMPQ_SHOTS", "many")]));
        match result {
            Err(PumpqError::InvalidConfig { key, value, .. }) => {
                assert_eq!(key, "PUMPQ_SHOTS");
                assert_eq!(value, "many");
            }
            other => panic!("expected InvalidConfig, got {:?}", other),
        }

        let result = HarnessConfig::from_lookup(lookup_from(&[("PUMPQ_BACKEND", "gpu")]));
        assert!(matches!(result, Err(PumpqError::InvalidConfig { .. })));
    }
}
