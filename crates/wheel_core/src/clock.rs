//! Countdown and overtime timing for a run.

use std::time::Duration;

use crate::models::{today_key, CountdownColor, DailyStatsRecord, RunState};
use crate::timing::{Scheduler, Task, TimerId};

/// Default run length: fifteen minutes.
pub const INITIAL_DURATION_MS: u64 = 15 * 60 * 1000;

/// Runs shorter than this are discarded from statistics.
pub const MIN_DURATION_MS: u64 = 300_000;

/// Tick period.
pub const TICK_MS: u64 = 1000;

/// Overtime after which the remaining-time display goes away.
pub const OVERTIME_HIDE_MS: u64 = 60_000;

/// Display-only side effects surfaced by the clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockSignal {
    /// Overtime reached one minute; hide the remaining-time display.
    HideCountdown,
}

/// Drives the per-run countdown, overtime, and end-of-run statistics.
///
/// Owns at most one repeating tick timer, armed on start and cancelled
/// exactly once on the transition back to [`RunState::Idle`].
#[derive(Debug)]
pub struct RunClock {
    state: RunState,
    initial_duration_ms: u64,
    remaining_ms: u64,
    overtime_ms: u64,
    tick_timer: Option<TimerId>,
}

impl RunClock {
    pub fn new() -> Self {
        Self::with_duration(INITIAL_DURATION_MS)
    }

    pub fn with_duration(initial_duration_ms: u64) -> Self {
        Self {
            state: RunState::Idle,
            initial_duration_ms,
            remaining_ms: initial_duration_ms,
            overtime_ms: 0,
            tick_timer: None,
        }
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state != RunState::Idle
    }

    pub fn remaining_ms(&self) -> u64 {
        self.remaining_ms
    }

    pub fn overtime_ms(&self) -> u64 {
        self.overtime_ms
    }

    /// Start the countdown. Idempotent while running: a re-entrant start
    /// must not reset the remaining time or arm a second tick timer.
    pub fn start(&mut self, scheduler: &mut dyn Scheduler) {
        if self.state != RunState::Idle {
            return;
        }
        self.state = RunState::CountingDown;
        self.remaining_ms = self.initial_duration_ms;
        self.overtime_ms = 0;
        self.tick_timer =
            Some(scheduler.schedule_repeating(Duration::from_millis(TICK_MS), Task::Tick));
        tracing::info!(duration_ms = self.initial_duration_ms, "run clock started");
    }

    /// Apply one elapsed second.
    ///
    /// Reaching zero transitions to overtime with the overtime counter still
    /// at zero at that instant; it only accumulates on subsequent ticks.
    pub fn tick(&mut self) -> Option<ClockSignal> {
        match self.state {
            RunState::Idle => None,
            RunState::CountingDown => {
                self.remaining_ms = self.remaining_ms.saturating_sub(TICK_MS);
                if self.remaining_ms == 0 {
                    self.state = RunState::Overtime;
                    tracing::info!("countdown reached zero, entering overtime");
                }
                None
            }
            RunState::Overtime => {
                self.overtime_ms += TICK_MS;
                if self.overtime_ms == OVERTIME_HIDE_MS {
                    Some(ClockSignal::HideCountdown)
                } else {
                    None
                }
            }
        }
    }

    /// End the run and reset to idle.
    ///
    /// Produces a stats record keyed by the current UTC calendar day when
    /// the counted duration (time spent before hitting zero) meets the
    /// minimum; shorter runs are discarded, not recorded as zero.
    pub fn end(
        &mut self,
        scheduler: &mut dyn Scheduler,
        selected: Option<&str>,
        participant_count: usize,
    ) -> Option<(String, DailyStatsRecord)> {
        let counted_ms = self.initial_duration_ms - self.remaining_ms;
        let total_ms = counted_ms + self.overtime_ms;

        let record = if counted_ms >= MIN_DURATION_MS {
            Some((
                today_key(),
                DailyStatsRecord {
                    total_duration_ms: total_ms,
                    overtime_ms: self.overtime_ms,
                    last_selected: selected.map(str::to_string),
                    participant_count,
                },
            ))
        } else {
            tracing::info!(counted_ms, "run shorter than minimum, not recorded");
            None
        };

        self.reset(scheduler);
        record
    }

    /// Return to idle from any state, cancelling the tick timer if armed.
    pub fn reset(&mut self, scheduler: &mut dyn Scheduler) {
        if let Some(id) = self.tick_timer.take() {
            scheduler.cancel(id);
        }
        self.state = RunState::Idle;
        self.remaining_ms = self.initial_duration_ms;
        self.overtime_ms = 0;
    }

    /// Derived display classification of the remaining-time readout.
    pub fn color(&self) -> CountdownColor {
        if self.overtime_ms >= OVERTIME_HIDE_MS {
            CountdownColor::Hidden
        } else if self.remaining_ms == 0 {
            CountdownColor::RedFinished
        } else if self.remaining_ms < 5 * 60 * 1000 {
            CountdownColor::Red
        } else if self.remaining_ms <= 10 * 60 * 1000 {
            CountdownColor::Orange
        } else {
            CountdownColor::Green
        }
    }
}

impl Default for RunClock {
    fn default() -> Self {
        Self::new()
    }
}
