//! Read-only views of the desk, shaped for display.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ticket::{Ticket, TicketNumber};
use crate::observability::DeskCounts;

/// A row of the waiting list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WaitingEntry {
    pub number: TicketNumber,
    pub arrival_time: DateTime<Utc>,
}

impl From<&Ticket> for WaitingEntry {
    fn from(ticket: &Ticket) -> Self {
        Self {
            number: ticket.number(),
            arrival_time: ticket.arrival_time(),
        }
    }
}

/// A row of the service history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub number: TicketNumber,
    pub arrival_time: DateTime<Utc>,
    pub served: bool,
}

impl From<&Ticket> for HistoryEntry {
    fn from(ticket: &Ticket) -> Self {
        Self {
            number: ticket.number(),
            arrival_time: ticket.arrival_time(),
            served: ticket.served(),
        }
    }
}

/// The client at the counter, with remaining time computed at snapshot time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InService {
    pub ticket: Ticket,
    pub started_at: DateTime<Utc>,
    pub remaining: Duration,
}

/// Everything a display needs in one snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeskStatus {
    pub current: Option<InService>,
    pub waiting: Vec<WaitingEntry>,
    pub history: Vec<HistoryEntry>,
    pub counts: DeskCounts,
}

impl DeskStatus {
    /// Remaining time of the current service, zero when idle.
    pub fn remaining(&self) -> Duration {
        self.current
            .as_ref()
            .map_or(Duration::ZERO, |current| current.remaining)
    }

    pub fn is_idle(&self) -> bool {
        self.current.is_none() && self.waiting.is_empty()
    }
}
