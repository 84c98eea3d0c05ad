//! The desk's state machine.

use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use crate::domain::{
    Admission, CompletedService, DeskStatus, Finalization, HistoryEntry, InService, Ticket,
    TicketNumber, TicketState, WaitingEntry,
};
use crate::observability::DeskCounts;
use crate::ports::{Clock, ServiceTimeSource};

/// The ticket at the counter and when its service began.
#[derive(Debug, Clone)]
struct Serving {
    ticket: Ticket,
    started_at: DateTime<Utc>,
}

/// Single-counter queue: issues tickets, serves one client at a time and
/// keeps the history of finished services.
///
/// Design:
/// - `waiting` is FIFO; admission always takes the oldest ticket.
/// - `serving` is an `Option`: at most one ticket at the counter.
/// - `history` is append-only and only `finalize_current` writes to it.
/// - All time comes from the injected `Clock`; nothing here is cached.
pub struct QueueManager {
    waiting: VecDeque<Ticket>,
    serving: Option<Serving>,
    next_number: TicketNumber,
    history: Vec<Ticket>,

    clock: Arc<dyn Clock>,
    service_time: Box<dyn ServiceTimeSource>,
}

impl QueueManager {
    pub fn new(clock: Arc<dyn Clock>, service_time: Box<dyn ServiceTimeSource>) -> Self {
        Self {
            waiting: VecDeque::new(),
            serving: None,
            next_number: TicketNumber::FIRST,
            history: Vec::new(),
            clock,
            service_time,
        }
    }

    /// Issue a ticket to a new client and put it at the back of the line.
    pub fn enqueue(&mut self) -> Ticket {
        let number = self.next_number;
        self.next_number = number.succ();

        let ticket = Ticket::new(number, self.clock.now(), self.service_time.next_duration());
        info!(
            ticket = %number,
            planned_secs = ticket.planned_duration().as_secs(),
            waiting = self.waiting.len() + 1,
            "ticket issued"
        );
        self.waiting.push_back(ticket.clone());
        ticket
    }

    /// Call the next client to the counter.
    ///
    /// Does nothing when a client is already being served or nobody waits;
    /// the returned variant says which.
    pub fn admit_next(&mut self) -> Admission {
        if let Some(serving) = &self.serving {
            debug!(current = %serving.ticket.number(), "admit refused: counter busy");
            return Admission::Busy {
                current: serving.ticket.number(),
            };
        }

        let Some(ticket) = self.waiting.pop_front() else {
            debug!("admit refused: queue empty");
            return Admission::Empty;
        };

        let started_at = self.clock.now();
        info!(
            ticket = %ticket.number(),
            waiting = self.waiting.len(),
            "ticket admitted"
        );
        self.serving = Some(Serving {
            ticket: ticket.clone(),
            started_at,
        });
        Admission::Admitted(ticket)
    }

    /// Time left of the current client's planned service, zero when idle or
    /// once the planned time has passed.
    pub fn remaining_time(&self) -> Duration {
        self.serving
            .as_ref()
            .map_or(Duration::ZERO, |serving| self.remaining_for(serving))
    }

    /// Finish the current service and record it in history.
    pub fn finalize_current(&mut self) -> Finalization {
        let Some(Serving {
            mut ticket,
            started_at,
        }) = self.serving.take()
        else {
            debug!("finalize refused: nothing in service");
            return Finalization::NothingInService;
        };

        let elapsed = self.elapsed_since(started_at);
        ticket.mark_served();
        self.history.push(ticket.clone());
        info!(
            ticket = %ticket.number(),
            elapsed_secs = elapsed.as_secs(),
            completed = self.history.len(),
            "service finished"
        );
        Finalization::Completed(CompletedService { elapsed, ticket })
    }

    /// No one waiting and no one at the counter.
    pub fn is_idle(&self) -> bool {
        self.waiting.is_empty() && self.serving.is_none()
    }

    /// Waiting list in service order.
    pub fn waiting(&self) -> Vec<WaitingEntry> {
        self.waiting.iter().map(WaitingEntry::from).collect()
    }

    /// Finished services in completion order.
    pub fn history(&self) -> Vec<HistoryEntry> {
        self.history.iter().map(HistoryEntry::from).collect()
    }

    pub fn current(&self) -> Option<InService> {
        self.serving.as_ref().map(|serving| InService {
            ticket: serving.ticket.clone(),
            started_at: serving.started_at,
            remaining: self.remaining_for(serving),
        })
    }

    /// Lifecycle state of an issued ticket, `None` if the number was never issued.
    pub fn status_of(&self, number: TicketNumber) -> Option<TicketState> {
        if number >= self.next_number || number < TicketNumber::FIRST {
            return None;
        }
        if self
            .serving
            .as_ref()
            .is_some_and(|serving| serving.ticket.number() == number)
        {
            return Some(TicketState::InService);
        }
        if self.waiting.iter().any(|ticket| ticket.number() == number) {
            return Some(TicketState::Waiting);
        }
        // 発行済みで waiting でも serving でもない => 完了済み
        Some(TicketState::Completed)
    }

    pub fn counts(&self) -> DeskCounts {
        DeskCounts {
            issued: self.next_number.get() - 1,
            waiting: self.waiting.len(),
            in_service: usize::from(self.serving.is_some()),
            completed: self.history.len(),
        }
    }

    pub fn status(&self) -> DeskStatus {
        DeskStatus {
            current: self.current(),
            waiting: self.waiting(),
            history: self.history(),
            counts: self.counts(),
        }
    }

    fn remaining_for(&self, serving: &Serving) -> Duration {
        serving
            .ticket
            .planned_duration()
            .saturating_sub(self.elapsed_since(serving.started_at))
    }

    /// Time since `start`; a clock reading earlier than `start` counts as zero.
    fn elapsed_since(&self, start: DateTime<Utc>) -> Duration {
        (self.clock.now() - start).to_std().unwrap_or(Duration::ZERO)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::{FixedClock, FixedServiceTime};
    use chrono::{TimeDelta, TimeZone};
    use rstest::rstest;

    const PLANNED: Duration = Duration::from_secs(300);

    fn start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap()
    }

    fn manager() -> (QueueManager, FixedClock) {
        let clock = FixedClock::new(start());
        let manager = QueueManager::new(
            Arc::new(clock.clone()),
            Box::new(FixedServiceTime(PLANNED)),
        );
        (manager, clock)
    }

    /// Hands out a scripted list of durations, then repeats the last one.
    struct ScriptedServiceTime(VecDeque<Duration>);

    impl ServiceTimeSource for ScriptedServiceTime {
        fn next_duration(&mut self) -> Duration {
            if self.0.len() > 1 {
                self.0.pop_front().unwrap()
            } else {
                self.0[0]
            }
        }
    }

    fn numbers(entries: &[WaitingEntry]) -> Vec<u64> {
        entries.iter().map(|e| e.number.get()).collect()
    }

    #[test]
    fn enqueue_issues_sequential_numbers_starting_at_one() {
        let (mut desk, _) = manager();
        for i in 1..=25 {
            let ticket = desk.enqueue();
            assert_eq!(ticket.number().get(), i);
            assert!(!ticket.served());
            assert_eq!(ticket.planned_duration(), PLANNED);
        }
        assert_eq!(desk.counts().issued, 25);
    }

    #[test]
    fn enqueue_stamps_arrival_from_clock() {
        let (mut desk, clock) = manager();
        let first = desk.enqueue();
        clock.advance(TimeDelta::seconds(42));
        let second = desk.enqueue();

        assert_eq!(first.arrival_time(), start());
        assert_eq!(second.arrival_time(), start() + TimeDelta::seconds(42));
        assert_eq!(
            desk.waiting(),
            vec![WaitingEntry::from(&first), WaitingEntry::from(&second)]
        );
    }

    #[test]
    fn numbers_are_never_reused_after_service() {
        let (mut desk, _) = manager();
        desk.enqueue();
        desk.admit_next();
        desk.finalize_current();
        assert!(desk.is_idle());

        assert_eq!(desk.enqueue().number().get(), 2);
    }

    #[test]
    fn admission_follows_arrival_order_across_interleaving() {
        let (mut desk, _) = manager();
        desk.enqueue();
        desk.enqueue();

        let mut admitted = Vec::new();
        let first = desk.admit_next();
        admitted.push(first.ticket().unwrap().number().get());

        desk.enqueue();
        desk.finalize_current();
        desk.enqueue();

        while let Admission::Admitted(ticket) = desk.admit_next() {
            admitted.push(ticket.number().get());
            desk.finalize_current();
        }

        assert_eq!(admitted, vec![1, 2, 3, 4]);
    }

    #[test]
    fn admit_while_serving_is_busy_and_changes_nothing() {
        let (mut desk, _) = manager();
        desk.enqueue();
        desk.enqueue();
        assert!(desk.admit_next().is_admitted());

        let before = desk.status();
        let outcome = desk.admit_next();

        assert_eq!(
            outcome,
            Admission::Busy {
                current: TicketNumber::new(1)
            }
        );
        assert_eq!(desk.status(), before);
        assert_eq!(desk.counts().in_service, 1);
    }

    #[test]
    fn admit_with_empty_queue_reports_empty() {
        let (mut desk, _) = manager();
        assert_eq!(desk.admit_next(), Admission::Empty);
        assert!(desk.current().is_none());
        assert!(desk.is_idle());
    }

    #[test]
    fn busy_and_empty_are_distinguishable() {
        let (mut desk, _) = manager();
        desk.enqueue();
        desk.admit_next();
        // queue は空だが窓口は使用中: Busy が優先
        assert!(matches!(desk.admit_next(), Admission::Busy { .. }));
        desk.finalize_current();
        assert_eq!(desk.admit_next(), Admission::Empty);
    }

    #[test]
    fn remaining_time_is_zero_when_idle() {
        let (mut desk, _) = manager();
        assert_eq!(desk.remaining_time(), Duration::ZERO);
        desk.enqueue();
        // Waiting is not serving.
        assert_eq!(desk.remaining_time(), Duration::ZERO);
    }

    #[test]
    fn remaining_time_counts_down_and_clamps_at_zero() {
        let (mut desk, clock) = manager();
        desk.enqueue();
        desk.admit_next();
        assert_eq!(desk.remaining_time(), PLANNED);

        let mut previous = desk.remaining_time();
        for _ in 0..12 {
            clock.advance(TimeDelta::seconds(30));
            let remaining = desk.remaining_time();
            assert!(remaining <= previous);
            previous = remaining;
        }
        // 360s elapsed against 300s planned.
        assert_eq!(previous, Duration::ZERO);
    }

    #[rstest]
    #[case::just_admitted(0, 300)]
    #[case::midway(120, 180)]
    #[case::exactly_due(300, 0)]
    #[case::overdue(1_000, 0)]
    fn remaining_time_at(#[case] elapsed_secs: i64, #[case] expected_secs: u64) {
        let (mut desk, clock) = manager();
        desk.enqueue();
        desk.admit_next();
        clock.advance(TimeDelta::seconds(elapsed_secs));
        assert_eq!(desk.remaining_time(), Duration::from_secs(expected_secs));
    }

    #[test]
    fn clock_going_backwards_does_not_inflate_remaining_time() {
        let (mut desk, clock) = manager();
        desk.enqueue();
        desk.admit_next();
        clock.advance(TimeDelta::seconds(-60));
        assert_eq!(desk.remaining_time(), PLANNED);
    }

    #[test]
    fn overdue_ticket_stays_in_service() {
        let (mut desk, clock) = manager();
        desk.enqueue();
        desk.admit_next();
        clock.advance(TimeDelta::hours(2));

        assert_eq!(desk.remaining_time(), Duration::ZERO);
        assert_eq!(desk.status_of(TicketNumber::new(1)), Some(TicketState::InService));
        assert!(desk.history().is_empty());
    }

    #[test]
    fn finalize_records_elapsed_and_marks_served() {
        let (mut desk, clock) = manager();
        desk.enqueue();
        desk.admit_next();
        clock.advance(TimeDelta::seconds(75));

        let done = desk.finalize_current();
        let done = done.completed().unwrap();
        assert_eq!(done.elapsed, Duration::from_secs(75));
        assert_eq!(done.ticket.number(), TicketNumber::new(1));
        assert!(done.ticket.served());

        assert!(desk.current().is_none());
        assert_eq!(desk.remaining_time(), Duration::ZERO);
        assert_eq!(desk.history().len(), 1);
    }

    #[test]
    fn finalize_with_nothing_in_service_changes_nothing() {
        let (mut desk, _) = manager();
        desk.enqueue();
        let before = desk.status();

        assert_eq!(desk.finalize_current(), Finalization::NothingInService);
        assert_eq!(desk.status(), before);
    }

    #[test]
    fn history_is_in_completion_order_and_all_served() {
        let (mut desk, clock) = manager();
        for _ in 0..5 {
            desk.enqueue();
        }
        for n in 1..=5 {
            desk.admit_next();
            clock.advance(TimeDelta::seconds(10));
            desk.finalize_current();
            assert_eq!(desk.history().len(), n);
        }

        let history = desk.history();
        let order: Vec<u64> = history.iter().map(|e| e.number.get()).collect();
        assert_eq!(order, vec![1, 2, 3, 4, 5]);
        assert!(history.iter().all(|e| e.served));
    }

    #[test]
    fn queries_do_not_mutate() {
        let (mut desk, _) = manager();
        desk.enqueue();
        desk.enqueue();
        desk.admit_next();
        let before = desk.status();

        for _ in 0..10 {
            desk.remaining_time();
            desk.is_idle();
            desk.waiting();
            desk.history();
            desk.current();
            desk.counts();
            desk.status_of(TicketNumber::new(2));
        }

        assert_eq!(desk.status(), before);
    }

    #[test]
    fn status_of_follows_the_lifecycle() {
        let (mut desk, _) = manager();
        let n = TicketNumber::new(1);
        assert_eq!(desk.status_of(n), None);

        desk.enqueue();
        assert_eq!(desk.status_of(n), Some(TicketState::Waiting));

        desk.admit_next();
        assert_eq!(desk.status_of(n), Some(TicketState::InService));

        desk.finalize_current();
        assert_eq!(desk.status_of(n), Some(TicketState::Completed));

        assert_eq!(desk.status_of(TicketNumber::new(0)), None);
        assert_eq!(desk.status_of(TicketNumber::new(2)), None);
    }

    #[test]
    fn planned_duration_is_fixed_at_issuance() {
        let clock = FixedClock::new(start());
        let durations = [60, 120, 180].map(Duration::from_secs);
        let mut desk = QueueManager::new(
            Arc::new(clock.clone()),
            Box::new(ScriptedServiceTime(durations.into_iter().collect())),
        );

        let issued: Vec<Duration> = (0..3).map(|_| desk.enqueue().planned_duration()).collect();
        assert_eq!(issued, durations);

        let admitted = desk.admit_next();
        assert_eq!(admitted.ticket().unwrap().planned_duration(), durations[0]);
        assert_eq!(desk.remaining_time(), durations[0]);
    }

    #[test]
    fn end_to_end_two_clients() {
        let (mut desk, clock) = manager();

        assert_eq!(desk.enqueue().number().get(), 1);
        assert_eq!(desk.enqueue().number().get(), 2);

        let first = desk.admit_next();
        assert_eq!(first.ticket().unwrap().number().get(), 1);
        assert_eq!(numbers(&desk.waiting()), vec![2]);

        assert!(matches!(desk.admit_next(), Admission::Busy { .. }));

        clock.advance(TimeDelta::seconds(200));
        let done = desk.finalize_current();
        let done = done.completed().unwrap();
        assert_eq!(done.ticket.number().get(), 1);
        assert_eq!(done.elapsed, Duration::from_secs(200));
        assert_eq!(desk.history().len(), 1);

        let second = desk.admit_next();
        assert_eq!(second.ticket().unwrap().number().get(), 2);

        let done = desk.finalize_current();
        assert_eq!(done.completed().unwrap().ticket.number().get(), 2);

        let order: Vec<u64> = desk.history().iter().map(|e| e.number.get()).collect();
        assert_eq!(order, vec![1, 2]);
        assert!(desk.is_idle());
    }
}
