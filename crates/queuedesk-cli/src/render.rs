//! Operator-facing text for desk outcomes and snapshots.

use std::fmt::Write;

use chrono::{DateTime, Local, Utc};
use queuedesk_core::domain::{
    Admission, DeskStatus, Finalization, HistoryEntry, Ticket, WaitingEntry,
};

pub fn clock_time(at: DateTime<Utc>) -> String {
    at.with_timezone(&Local).format("%H:%M:%S").to_string()
}

pub fn issued(ticket: &Ticket) -> String {
    format!("Issued {ticket}")
}

pub fn admission(outcome: &Admission) -> String {
    match outcome {
        Admission::Admitted(ticket) => format!("Now serving: ticket {}", ticket.number()),
        Admission::Busy { .. } => "A client is already being served!".to_string(),
        Admission::Empty => "No clients in the queue!".to_string(),
    }
}

pub fn finalization(outcome: &Finalization) -> String {
    match outcome {
        Finalization::Completed(done) => format!(
            "Service for ticket {} finished in {} seconds.",
            done.ticket.number(),
            done.elapsed.as_secs()
        ),
        Finalization::NothingInService => "No client in service to finalize!".to_string(),
    }
}

pub fn status(status: &DeskStatus) -> String {
    let serving = match &status.current {
        Some(current) => format!("Serving: ticket {}", current.ticket.number()),
        None => "No client in service".to_string(),
    };
    let mut out = format!(
        "{serving}\nRemaining time: {} seconds\nWaiting: {}  Completed: {}",
        status.remaining().as_secs(),
        status.counts.waiting,
        status.counts.completed
    );
    if status.is_idle() {
        out.push_str("\nThe queue is empty.");
    }
    out
}

pub fn waiting(entries: &[WaitingEntry]) -> String {
    if entries.is_empty() {
        return "The queue is empty.".to_string();
    }
    let mut out = String::from("Ticket  Arrival");
    for entry in entries {
        let _ = write!(
            out,
            "\n{:<6}  {}",
            entry.number.to_string(),
            clock_time(entry.arrival_time)
        );
    }
    out
}

pub fn history(entries: &[HistoryEntry]) -> String {
    if entries.is_empty() {
        return "No services completed yet.".to_string();
    }
    let mut out = String::from("Ticket  Arrival   Served");
    for entry in entries {
        let _ = write!(
            out,
            "\n{:<6}  {}  {}",
            entry.number.to_string(),
            clock_time(entry.arrival_time),
            if entry.served { "Yes" } else { "No" }
        );
    }
    out
}
