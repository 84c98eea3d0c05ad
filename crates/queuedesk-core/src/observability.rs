use serde::{Deserialize, Serialize};

/// Ticket totals by lifecycle state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeskCounts {
    pub issued: u64,
    pub waiting: usize,
    pub in_service: usize,
    pub completed: usize,
}
