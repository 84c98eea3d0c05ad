//! App - timer-driven collaborators of the desk.
//!
//! The desk never calls out; these loops call in.
//! - **ArrivalSimulator**: decides when simulated clients show up
//! - **DeskDriver**: runs the arrival loop and the refresh ticker as tokio tasks

pub mod arrivals;
pub mod driver;

pub use self::arrivals::ArrivalSimulator;
pub use self::driver::DeskDriver;
