//! Lock-guarded queue manager shared between tasks.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::{QueueManager, ServiceDesk};
use crate::domain::{
    Admission, DeskStatus, Finalization, HistoryEntry, Ticket, TicketNumber, TicketState,
    WaitingEntry,
};

/// Cloneable handle to one desk.
///
/// Every operation takes the lock exactly once and never awaits while
/// holding it, so each call is a single critical section.
#[derive(Clone)]
pub struct SharedDesk {
    state: Arc<Mutex<QueueManager>>,
}

impl SharedDesk {
    pub fn new(manager: QueueManager) -> Self {
        Self {
            state: Arc::new(Mutex::new(manager)),
        }
    }
}

#[async_trait]
impl ServiceDesk for SharedDesk {
    async fn enqueue(&self) -> Ticket {
        self.state.lock().await.enqueue()
    }

    async fn admit_next(&self) -> Admission {
        self.state.lock().await.admit_next()
    }

    async fn remaining_time(&self) -> Duration {
        self.state.lock().await.remaining_time()
    }

    async fn finalize_current(&self) -> Finalization {
        self.state.lock().await.finalize_current()
    }

    async fn is_idle(&self) -> bool {
        self.state.lock().await.is_idle()
    }

    async fn waiting(&self) -> Vec<WaitingEntry> {
        self.state.lock().await.waiting()
    }

    async fn history(&self) -> Vec<HistoryEntry> {
        self.state.lock().await.history()
    }

    async fn status_of(&self, number: TicketNumber) -> Option<TicketState> {
        self.state.lock().await.status_of(number)
    }

    async fn status(&self) -> DeskStatus {
        self.state.lock().await.status()
    }
}
