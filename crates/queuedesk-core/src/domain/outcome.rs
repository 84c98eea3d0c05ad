//! Results of the mutating desk operations.
//!
//! None of these are errors: a busy counter or an empty queue are ordinary
//! states the caller branches on. A variant that reports "no progress" always
//! means nothing changed.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::ticket::{Ticket, TicketNumber};

/// Outcome of asking the desk to call the next client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Admission {
    /// The head of the waiting list is now in service.
    Admitted(Ticket),

    /// Another client is already at the counter.
    Busy { current: TicketNumber },

    /// Nobody is waiting.
    Empty,
}

impl Admission {
    pub fn ticket(&self) -> Option<&Ticket> {
        match self {
            Admission::Admitted(ticket) => Some(ticket),
            Admission::Busy { .. } | Admission::Empty => None,
        }
    }

    pub fn is_admitted(&self) -> bool {
        matches!(self, Admission::Admitted(_))
    }
}

/// A finished service: the ticket as recorded in history plus how long it took.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletedService {
    pub elapsed: Duration,
    pub ticket: Ticket,
}

/// Outcome of finishing the current service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Finalization {
    Completed(CompletedService),

    /// No client was at the counter.
    NothingInService,
}

impl Finalization {
    pub fn completed(&self) -> Option<&CompletedService> {
        match self {
            Finalization::Completed(done) => Some(done),
            Finalization::NothingInService => None,
        }
    }
}
