use thiserror::Error;

/// Rejected desk configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("service time range is empty: min_secs={min} > max_secs={max}")]
    EmptyServiceTimeRange { min: u64, max: u64 },

    #[error("service time step must be greater than zero")]
    ZeroServiceTimeStep,

    #[error("arrival probability must be within [0, 1], got {0}")]
    InvalidArrivalProbability(f64),

    #[error("arrival interval range is empty: min_interval_secs={min} > max_interval_secs={max}")]
    EmptyArrivalInterval { min: u64, max: u64 },

    #[error("refresh interval must be greater than zero")]
    ZeroRefreshInterval,
}
