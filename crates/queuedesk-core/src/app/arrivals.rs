//! Randomized client arrivals.

use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::ArrivalConfig;
use crate::error::ConfigError;

/// Each round a client arrives with a fixed probability; rounds are separated
/// by a random pause.
pub struct ArrivalSimulator {
    rng: StdRng,
    probability: f64,
    min_interval_secs: u64,
    max_interval_secs: u64,
}

impl ArrivalSimulator {
    pub fn from_config(config: &ArrivalConfig) -> Result<Self, ConfigError> {
        Self::with_rng(config, StdRng::from_entropy())
    }

    pub fn seeded(config: &ArrivalConfig, seed: u64) -> Result<Self, ConfigError> {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: &ArrivalConfig, rng: StdRng) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            rng,
            probability: config.probability,
            min_interval_secs: config.min_interval_secs,
            max_interval_secs: config.max_interval_secs,
        })
    }

    /// Roll for this round.
    pub fn should_arrive(&mut self) -> bool {
        self.rng.gen_bool(self.probability)
    }

    /// Pause before the next round.
    pub fn next_interval(&mut self) -> Duration {
        Duration::from_secs(
            self.rng
                .gen_range(self.min_interval_secs..=self.max_interval_secs),
        )
    }
}
