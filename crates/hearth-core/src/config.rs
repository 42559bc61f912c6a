//! Controller configuration.
//!
//! Defaults live here as constants so the other crates never duplicate them.
//! The environment can override the loop cadence and the power budget.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Default seconds between control-loop ticks.
pub const DEFAULT_TICK_SECS: u64 = 5;
/// Default household power budget in watts.
pub const DEFAULT_POWER_LIMIT_WATTS: u32 = 3500;
/// Number of samples retained per metric for trend estimation.
pub const TREND_WINDOW: usize = 20;
/// Lower bound of the comfort temperature band (°C).
pub const COMFORT_MIN: f64 = 20.0;
/// Upper bound of the comfort temperature band (°C).
pub const COMFORT_MAX: f64 = 24.0;

/// Environment variable names.
pub mod env_vars {
    pub const TICK_SECS: &str = "HEARTH_TICK_SECS";
    pub const POWER_LIMIT_WATTS: &str = "HEARTH_POWER_LIMIT_WATTS";
}

/// Runtime configuration for the control loop and policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControllerConfig {
    /// Seconds between ticks.
    pub tick_secs: u64,
    /// Household power budget in watts.
    pub power_limit_watts: u32,
}

impl ControllerConfig {
    /// Configuration with stock defaults.
    pub fn new() -> Self {
        Self {
            tick_secs: DEFAULT_TICK_SECS,
            power_limit_watts: DEFAULT_POWER_LIMIT_WATTS,
        }
    }

    /// Override the tick cadence.
    pub fn with_tick_secs(mut self, secs: u64) -> Self {
        self.tick_secs = secs;
        self
    }

    /// Override the power budget.
    pub fn with_power_limit_watts(mut self, watts: u32) -> Self {
        self.power_limit_watts = watts;
        self
    }

    /// Load defaults, then apply any environment overrides.
    ///
    /// Unset variables are skipped; set-but-unparsable values are a
    /// configuration error rather than a silent fallback.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::new();

        if let Some(secs) = read_env(env_vars::TICK_SECS)? {
            config.tick_secs = secs;
        }
        if let Some(watts) = read_env(env_vars::POWER_LIMIT_WATTS)? {
            config.power_limit_watts = watts;
        }

        Ok(config)
    }

    /// Tick cadence as a [`Duration`].
    pub fn tick_interval(&self) -> Duration {
        Duration::from_secs(self.tick_secs)
    }
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self::new()
    }
}

fn read_env<T: std::str::FromStr>(name: &str) -> Result<Option<T>> {
    match std::env::var(name) {
        Ok(raw) => raw
            .parse()
            .map(Some)
            .map_err(|_| Error::Config(format!("invalid value for {}: {:?}", name, raw))),
        Err(_) => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ControllerConfig::new();
        assert_eq!(config.tick_secs, DEFAULT_TICK_SECS);
        assert_eq!(config.power_limit_watts, DEFAULT_POWER_LIMIT_WATTS);
        assert_eq!(config.tick_interval(), Duration::from_secs(5));
    }

    #[test]
    fn test_builder_overrides() {
        let config = ControllerConfig::new()
            .with_tick_secs(1)
            .with_power_limit_watts(2000);
        assert_eq!(config.tick_secs, 1);
        assert_eq!(config.power_limit_watts, 2000);
    }

    #[test]
    fn test_env_overrides() {
        // Env vars are process-global; keep both cases in one test to avoid
        // interleaving with parallel test threads reading the same keys.
        std::env::set_var(env_vars::TICK_SECS, "2");
        std::env::set_var(env_vars::POWER_LIMIT_WATTS, "4000");
        let config = ControllerConfig::from_env().unwrap();
        assert_eq!(config.tick_secs, 2);
        assert_eq!(config.power_limit_watts, 4000);

        std::env::set_var(env_vars::TICK_SECS, "not-a-number");
        assert!(ControllerConfig::from_env().is_err());

        std::env::remove_var(env_vars::TICK_SECS);
        std::env::remove_var(env_vars::POWER_LIMIT_WATTS);
        let config = ControllerConfig::from_env().unwrap();
        assert_eq!(config.tick_secs, DEFAULT_TICK_SECS);
    }
}
