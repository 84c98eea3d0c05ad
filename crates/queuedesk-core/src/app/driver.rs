use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info};

use crate::app::ArrivalSimulator;
use crate::domain::DeskStatus;
use crate::queue::ServiceDesk;

/// Background loops around one desk.
/// - the refresh loop publishes a fresh `DeskStatus` every tick
/// - the arrival loop (optional) issues tickets for simulated clients
/// - `shutdown_and_join()` stops both and waits for them
pub struct DeskDriver {
    shutdown_tx: watch::Sender<bool>,
    status_rx: watch::Receiver<DeskStatus>,
    joins: Vec<JoinHandle<()>>,
}

impl DeskDriver {
    /// Spawn the refresh loop, plus the arrival loop when `arrivals` is given.
    pub fn spawn(
        desk: Arc<dyn ServiceDesk>,
        refresh_interval: Duration,
        arrivals: Option<ArrivalSimulator>,
    ) -> Self {
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let (status_tx, status_rx) = watch::channel(DeskStatus::default());

        let mut joins = Vec::with_capacity(2);
        joins.push(tokio::spawn(refresh_loop(
            Arc::clone(&desk),
            refresh_interval,
            status_tx,
            shutdown_rx.clone(),
        )));
        if let Some(simulator) = arrivals {
            joins.push(tokio::spawn(arrival_loop(desk, simulator, shutdown_rx)));
        }

        Self {
            shutdown_tx,
            status_rx,
            joins,
        }
    }

    /// Latest snapshot published by the refresh loop.
    pub fn latest(&self) -> DeskStatus {
        self.status_rx.borrow().clone()
    }

    /// Receiver that is notified on every refresh.
    pub fn subscribe(&self) -> watch::Receiver<DeskStatus> {
        self.status_rx.clone()
    }

    /// Ask both loops to stop after their current step.
    pub fn request_shutdown(&self) {
        // receivers may already be gone
        let _ = self.shutdown_tx.send(true);
    }

    pub async fn shutdown_and_join(self) {
        self.request_shutdown();
        for join in self.joins {
            let _ = join.await;
        }
    }
}

async fn refresh_loop(
    desk: Arc<dyn ServiceDesk>,
    every: Duration,
    status_tx: watch::Sender<DeskStatus>,
    mut shutdown_rx: watch::Receiver<bool>,
) {
    let mut ticker = tokio::time::interval(every);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        // shutdown が来ていたら抜ける
        if *shutdown_rx.borrow() {
            break;
        }

        tokio::select! {
            changed = shutdown_rx.changed() => {
                // driver が shutdown せずに drop された
                if changed.is_err() {
                    break;
                }
                continue;
            }
            _ = ticker.tick() => {}
        }

        let status = desk.status().await;
        debug!(
            remaining_secs = status.remaining().as_secs(),
            waiting = status.counts.waiting,
            "refresh"
        );
        status_tx.send_replace(status);
    }
}

async fn arrival_loop(
    desk: Arc<dyn ServiceDesk>,
    mut simulator: ArrivalSimulator,
    mut shutdown_rx: watch::Receiver<bool>,
) {
    loop {
        if *shutdown_rx.borrow() {
            break;
        }

        if simulator.should_arrive() {
            let ticket = desk.enqueue().await;
            info!(ticket = %ticket.number(), "simulated client arrived");
        }

        // 次の到着判定まで待つ (shutdown と競合させる)
        let wait = simulator.next_interval();
        tokio::select! {
            changed = shutdown_rx.changed() => {
                if changed.is_err() {
                    break;
                }
            }
            _ = tokio::time::sleep(wait) => {}
        }
    }
}
