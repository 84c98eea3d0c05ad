//! Tickets handed to arriving clients.

use std::fmt;
use std::time::Duration;

use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};

/// Sequential ticket number, starting at 1.
///
/// Displayed zero-padded to four digits, the way it is called at the counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TicketNumber(u64);

impl TicketNumber {
    pub const FIRST: TicketNumber = TicketNumber(1);

    pub fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn get(self) -> u64 {
        self.0
    }

    /// The number issued right after this one.
    pub fn succ(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for TicketNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}", self.0)
    }
}

/// One client's queue record.
///
/// Fields are private: the queue manager is the only place a ticket changes,
/// callers receive clones.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ticket {
    number: TicketNumber,
    arrival_time: DateTime<Utc>,
    planned_duration: Duration,
    served: bool,
}

impl Ticket {
    pub(crate) fn new(
        number: TicketNumber,
        arrival_time: DateTime<Utc>,
        planned_duration: Duration,
    ) -> Self {
        Self {
            number,
            arrival_time,
            planned_duration,
            served: false,
        }
    }

    pub fn number(&self) -> TicketNumber {
        self.number
    }

    pub fn arrival_time(&self) -> DateTime<Utc> {
        self.arrival_time
    }

    pub fn planned_duration(&self) -> Duration {
        self.planned_duration
    }

    pub fn served(&self) -> bool {
        self.served
    }

    pub(crate) fn mark_served(&mut self) {
        self.served = true;
    }
}

impl fmt::Display for Ticket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Ticket: {} - Arrival: {}",
            self.number,
            self.arrival_time.with_timezone(&Local).format("%H:%M:%S")
        )
    }
}
