//! Ticket lifecycle.

use serde::{Deserialize, Serialize};

/// Where a ticket is in its lifecycle.
///
/// State transitions (strictly linear):
/// - Waiting -> InService -> Completed
///
/// A ticket is `Waiting` from the moment it is issued. There is no way back
/// to `Waiting` once admitted, and `Completed` is only reached through
/// finalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TicketState {
    /// Issued and queued for service.
    Waiting,

    /// Currently at the counter.
    InService,

    /// Service finished and recorded in history.
    Completed,
}

impl TicketState {
    /// Is this a terminal state (no further transitions)?
    pub fn is_terminal(self) -> bool {
        matches!(self, TicketState::Completed)
    }

    /// The only state this one may move to, if any.
    pub fn next(self) -> Option<TicketState> {
        match self {
            TicketState::Waiting => Some(TicketState::InService),
            TicketState::InService => Some(TicketState::Completed),
            TicketState::Completed => None,
        }
    }
}
