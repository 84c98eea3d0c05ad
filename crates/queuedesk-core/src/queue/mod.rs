//! Queue module: the single-counter state machine and its shared handle.

mod manager;
mod shared;

pub use manager::QueueManager;
pub use shared::SharedDesk;

use std::time::Duration;

use async_trait::async_trait;

use crate::domain::{
    Admission, DeskStatus, Finalization, HistoryEntry, Ticket, TicketNumber, TicketState,
    WaitingEntry,
};

/// Service desk port (interface).
///
/// This is what the operator session, the arrival simulation and the refresh
/// ticker talk to. Each call is atomic with respect to every other call: two
/// concurrent `admit_next` calls can never both admit, and a `finalize_current`
/// never interleaves with an admission of the same slot.
#[async_trait]
pub trait ServiceDesk: Send + Sync {
    /// Issue a ticket to a new client.
    async fn enqueue(&self) -> Ticket;

    /// Call the next client, unless the counter is busy or nobody waits.
    async fn admit_next(&self) -> Admission;

    /// Time left of the current client's planned service.
    async fn remaining_time(&self) -> Duration;

    /// Finish the current service.
    async fn finalize_current(&self) -> Finalization;

    async fn is_idle(&self) -> bool;

    async fn waiting(&self) -> Vec<WaitingEntry>;

    async fn history(&self) -> Vec<HistoryEntry>;

    async fn status_of(&self, number: TicketNumber) -> Option<TicketState>;

    /// Observability hook: one consistent snapshot of the whole desk.
    async fn status(&self) -> DeskStatus;
}
