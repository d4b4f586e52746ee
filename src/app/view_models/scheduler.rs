//! # Scheduler
//!
//! Virtual clock driving every deferred callback of the app: transition
//! finalisation, post-render rebinding, the announcement tick, notification
//! expiry and search debouncing.
//!
//! Tasks are ordered by due time, then by insertion order. Nothing runs at
//! scheduling time; a task with zero delay runs on the next tick.

use std::collections::BTreeMap;
use std::time::Duration;

use super::transition::TransitionToken;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeferredTask {
    /// Collapse the dual-pane container of transition `token`
    FinalizeTransition { token: TransitionToken },
    /// Re-attach live validation on the auth page
    RebindAuth,
    ShowAnnouncement,
    RemoveNotification { id: u64 },
    /// Compute suggestions for the input as of `generation`
    SearchDebounce { generation: u64 },
}

#[derive(Debug, Default)]
pub struct Scheduler {
    now: Duration,
    sequence: u64,
    queue: BTreeMap<(Duration, u64), DeferredTask>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now(&self) -> Duration {
        self.now
    }

    /// Queue `task` to run `delay` from now; returns its due time
    pub fn schedule(&mut self, delay: Duration, task: DeferredTask) -> Duration {
        let due = self.now + delay;
        self.sequence += 1;
        self.queue.insert((due, self.sequence), task);
        tracing::trace!("scheduled {:?} at {:?}", task, due);
        due
    }

    /// Move the clock forward without running anything
    pub fn advance(&mut self, elapsed: Duration) {
        self.now += elapsed;
    }

    /// Move the clock to `instant` unless it is already past it
    pub fn advance_to(&mut self, instant: Duration) {
        self.now = self.now.max(instant);
    }

    /// Remove and return the earliest task due at or before the current time
    pub fn pop_due(&mut self) -> Option<DeferredTask> {
        self.pop_due_by(self.now)
    }

    /// Remove the earliest task due at or before `deadline` and move the
    /// clock to its due time, so work it schedules is timed from there
    pub fn pop_due_by(&mut self, deadline: Duration) -> Option<DeferredTask> {
        let key = *self.queue.keys().next()?;
        if key.0 > deadline {
            return None;
        }
        self.now = self.now.max(key.0);
        self.queue.remove(&key)
    }

    /// Due time of the earliest queued task
    pub fn next_due(&self) -> Option<Duration> {
        self.queue.keys().next().map(|(due, _)| *due)
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    pub fn is_idle(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn has_pending(&self, task: &DeferredTask) -> bool {
        self.queue.values().any(|t| t == task)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_delay_tasks_should_wait_for_pop() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule(Duration::ZERO, DeferredTask::ShowAnnouncement);
        assert_eq!(scheduler.pending(), 1);
        assert_eq!(scheduler.pop_due(), Some(DeferredTask::ShowAnnouncement));
        assert!(scheduler.is_idle());
    }

    #[test]
    fn tasks_should_fire_in_due_then_insertion_order() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule(Duration::from_millis(10), DeferredTask::RebindAuth);
        scheduler.schedule(Duration::from_millis(5), DeferredTask::RemoveNotification { id: 1 });
        scheduler.schedule(Duration::from_millis(5), DeferredTask::RemoveNotification { id: 2 });

        scheduler.advance(Duration::from_millis(10));
        let fired: Vec<_> = std::iter::from_fn(|| scheduler.pop_due()).collect();
        assert_eq!(
            fired,
            vec![
                DeferredTask::RemoveNotification { id: 1 },
                DeferredTask::RemoveNotification { id: 2 },
                DeferredTask::RebindAuth,
            ]
        );
    }

    #[test]
    fn pop_due_should_leave_future_tasks() {
        let mut scheduler = Scheduler::new();
        let due = scheduler.schedule(Duration::from_millis(500), DeferredTask::RebindAuth);
        scheduler.advance(Duration::from_millis(499));
        assert_eq!(scheduler.pop_due(), None);
        assert_eq!(scheduler.next_due(), Some(due));

        scheduler.advance(Duration::from_millis(1));
        assert_eq!(scheduler.pop_due(), Some(DeferredTask::RebindAuth));
    }

    #[test]
    fn pop_due_by_should_step_clock_to_each_task() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule(Duration::from_millis(500), DeferredTask::RebindAuth);
        let deadline = Duration::from_millis(600);

        assert_eq!(scheduler.pop_due_by(deadline), Some(DeferredTask::RebindAuth));
        assert_eq!(scheduler.now(), Duration::from_millis(500));
        // follow-up work lands inside the same window
        scheduler.schedule(Duration::from_millis(10), DeferredTask::ShowAnnouncement);
        assert_eq!(
            scheduler.pop_due_by(deadline),
            Some(DeferredTask::ShowAnnouncement)
        );
        assert_eq!(scheduler.pop_due_by(deadline), None);

        scheduler.advance_to(deadline);
        assert_eq!(scheduler.now(), deadline);
    }
}
