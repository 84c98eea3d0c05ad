//! ServiceTimeSource port - planned service duration for new tickets.

use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::ServiceTimeConfig;
use crate::error::ConfigError;

/// Supplies the planned duration of each newly issued ticket.
///
/// Called exactly once per ticket, at issuance.
pub trait ServiceTimeSource: Send {
    fn next_duration(&mut self) -> Duration;
}

/// Uniformly random durations on a stepped range.
///
/// With the default config this yields whole minutes from 3 to 8.
pub struct RandomServiceTime {
    rng: StdRng,
    min_secs: u64,
    step_secs: u64,
    steps: u64,
}

impl RandomServiceTime {
    pub fn from_config(config: &ServiceTimeConfig) -> Result<Self, ConfigError> {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Same as [`from_config`](Self::from_config) but reproducible.
    pub fn seeded(config: &ServiceTimeConfig, seed: u64) -> Result<Self, ConfigError> {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: &ServiceTimeConfig, rng: StdRng) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            rng,
            min_secs: config.min_secs,
            step_secs: config.step_secs,
            steps: config.steps(),
        })
    }
}

impl ServiceTimeSource for RandomServiceTime {
    fn next_duration(&mut self) -> Duration {
        let k = self.rng.gen_range(0..self.steps);
        Duration::from_secs(self.min_secs + k * self.step_secs)
    }
}

/// Always the same duration.
#[derive(Debug, Clone, Copy)]
pub struct FixedServiceTime(pub Duration);

impl ServiceTimeSource for FixedServiceTime {
    fn next_duration(&mut self) -> Duration {
        self.0
    }
}
