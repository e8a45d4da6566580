//! Injectable timing: schedule-after and cancel capabilities.
//!
//! The core never talks to wall-clock timers directly. Delayed completions
//! are scheduled as [`Task`]s through a [`Scheduler`], and the host feeds
//! fired tasks back into the state machine. Tests drive a [`TimerQueue`]
//! with virtual time instead of waiting on real delays.

use std::time::Duration;

use crate::models::PickDirection;

/// Work item delivered when a timer fires.
///
/// Deferred completions carry their payload, so a task scheduled with a
/// value always completes with that value, regardless of state changes
/// during the wait.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Task {
    /// Per-second run clock tick.
    Tick,
    /// A spin's animation delay elapsed; the wheel lands on `entry`.
    FinishSpin { entry: String },
    /// A roster-editor column transfer's delay elapsed.
    ApplyPick {
        entry: String,
        direction: PickDirection,
    },
}

/// Handle to a scheduled timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(u64);

/// Scheduling capabilities the core requires from its host.
pub trait Scheduler {
    /// Deliver `task` once, `delay` from now.
    fn schedule_once(&mut self, delay: Duration, task: Task) -> TimerId;

    /// Deliver `task` every `period` until cancelled.
    fn schedule_repeating(&mut self, period: Duration, task: Task) -> TimerId;

    /// Cancel a scheduled timer. Unknown ids are ignored.
    fn cancel(&mut self, id: TimerId);
}

#[derive(Debug)]
struct TimerEntry {
    id: TimerId,
    due_ms: u64,
    period_ms: Option<u64>,
    task: Task,
}

/// Deterministic scheduler driven by advancing virtual time.
///
/// Both the test double and the production driver: a host maps real elapsed
/// time onto [`TimerQueue::advance`] and dispatches the returned tasks.
#[derive(Debug, Default)]
pub struct TimerQueue {
    now_ms: u64,
    next_id: u64,
    timers: Vec<TimerEntry>,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time.
    pub fn now(&self) -> Duration {
        Duration::from_millis(self.now_ms)
    }

    /// Number of timers currently armed.
    pub fn active_timers(&self) -> usize {
        self.timers.len()
    }

    /// Advance virtual time by `by`, returning every task that came due, in
    /// firing order. Repeating timers re-arm and may fire multiple times.
    pub fn advance(&mut self, by: Duration) -> Vec<Task> {
        let target = self.now_ms + by.as_millis() as u64;
        let mut fired = Vec::new();

        loop {
            let Some(idx) = self
                .timers
                .iter()
                .enumerate()
                .filter(|(_, t)| t.due_ms <= target)
                .min_by_key(|(_, t)| (t.due_ms, t.id.0))
                .map(|(idx, _)| idx)
            else {
                break;
            };

            fired.push(self.timers[idx].task.clone());
            match self.timers[idx].period_ms {
                Some(period) => self.timers[idx].due_ms += period,
                None => {
                    self.timers.swap_remove(idx);
                }
            }
        }

        self.now_ms = target;
        fired
    }

    fn insert(&mut self, due_ms: u64, period_ms: Option<u64>, task: Task) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.timers.push(TimerEntry {
            id,
            due_ms,
            period_ms,
            task,
        });
        id
    }
}

impl Scheduler for TimerQueue {
    fn schedule_once(&mut self, delay: Duration, task: Task) -> TimerId {
        self.insert(self.now_ms + delay.as_millis() as u64, None, task)
    }

    fn schedule_repeating(&mut self, period: Duration, task: Task) -> TimerId {
        // A zero period would never stop firing within a single advance.
        let period_ms = (period.as_millis() as u64).max(1);
        self.insert(self.now_ms + period_ms, Some(period_ms), task)
    }

    fn cancel(&mut self, id: TimerId) {
        self.timers.retain(|t| t.id != id);
    }
}
