//! queuedesk-core
//!
//! Core building blocks for a single-counter service queue.
//!
//! # Modules
//! - **domain**: tickets, lifecycle states, operation outcomes and snapshots
//! - **ports**: abstractions over time and randomness (`Clock`, `ServiceTimeSource`)
//! - **queue**: the `QueueManager` state machine and its shared, lockable wrapper
//! - **app**: timer-driven loops (refresh ticker, arrival simulation)
//! - **config**: desk configuration and validation

pub mod app;
pub mod config;
pub mod domain;
pub mod error;
pub mod observability;
pub mod ports;
pub mod queue;

pub use config::DeskConfig;
pub use error::ConfigError;
