//! Ports: seams for the things a test needs to control.
//!
//! The queue manager reads time and randomness only through these traits, so
//! a test can pin the clock and the planned durations and assert exact values.

pub mod clock;
pub mod service_time;

pub use self::clock::{Clock, FixedClock, SystemClock};
pub use self::service_time::{FixedServiceTime, RandomServiceTime, ServiceTimeSource};
