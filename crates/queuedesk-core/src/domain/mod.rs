//! Domain model (ticket numbers, tickets, lifecycle, outcomes, views).

pub mod outcome;
pub mod state;
pub mod ticket;
pub mod view;

pub use outcome::{Admission, CompletedService, Finalization};
pub use state::TicketState;
pub use ticket::{Ticket, TicketNumber};
pub use view::{DeskStatus, HistoryEntry, InService, WaitingEntry};
