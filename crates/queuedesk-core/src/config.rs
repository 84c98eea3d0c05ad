//! Desk configuration.
//!
//! Every section has defaults matching a typical service window, so an empty
//! config file (or none at all) yields a working desk.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Top-level configuration for one service desk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeskConfig {
    pub service_time: ServiceTimeConfig,
    pub arrivals: ArrivalConfig,

    /// How often the refresh loop publishes a fresh status snapshot.
    pub refresh_interval_ms: u64,
}

impl Default for DeskConfig {
    fn default() -> Self {
        Self {
            service_time: ServiceTimeConfig::default(),
            arrivals: ArrivalConfig::default(),
            refresh_interval_ms: 1000,
        }
    }
}

impl DeskConfig {
    /// Check every section, returning the first problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.service_time.validate()?;
        self.arrivals.validate()?;
        if self.refresh_interval_ms == 0 {
            return Err(ConfigError::ZeroRefreshInterval);
        }
        Ok(())
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_millis(self.refresh_interval_ms)
    }
}

/// Range from which a ticket's planned service duration is drawn.
///
/// Durations are `min_secs + k * step_secs` for a uniformly chosen `k`,
/// never exceeding `max_secs`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceTimeConfig {
    pub min_secs: u64,
    pub max_secs: u64,
    pub step_secs: u64,
}

impl Default for ServiceTimeConfig {
    fn default() -> Self {
        Self {
            min_secs: 180,
            max_secs: 480,
            step_secs: 60,
        }
    }
}

impl ServiceTimeConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.step_secs == 0 {
            return Err(ConfigError::ZeroServiceTimeStep);
        }
        if self.min_secs > self.max_secs {
            return Err(ConfigError::EmptyServiceTimeRange {
                min: self.min_secs,
                max: self.max_secs,
            });
        }
        Ok(())
    }

    /// Number of distinct durations the range can produce.
    pub fn steps(&self) -> u64 {
        (self.max_secs - self.min_secs) / self.step_secs + 1
    }
}

/// Simulated client arrivals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArrivalConfig {
    pub enabled: bool,

    /// Chance that a client arrives on each simulation round.
    pub probability: f64,

    /// Bounds (inclusive) of the random pause between rounds.
    pub min_interval_secs: u64,
    pub max_interval_secs: u64,
}

impl Default for ArrivalConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            probability: 0.3,
            min_interval_secs: 5,
            max_interval_secs: 15,
        }
    }
}

impl ArrivalConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.probability) {
            return Err(ConfigError::InvalidArrivalProbability(self.probability));
        }
        if self.min_interval_secs > self.max_interval_secs {
            return Err(ConfigError::EmptyArrivalInterval {
                min: self.min_interval_secs,
                max: self.max_interval_secs,
            });
        }
        Ok(())
    }
}
