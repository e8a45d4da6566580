//! Facade composing the selector, run clock, and roster editor.
//!
//! The presentation layer calls operations here and re-renders from the read
//! accessors. Persisted fields are loaded once at construction and written
//! back on every mutation; fired timer tasks come back in through
//! [`WheelApp::handle_task`].

use rand::Rng;

use crate::clock::{ClockSignal, RunClock};
use crate::editor::RosterEditor;
use crate::models::{
    CountdownColor, DailyStats, DailyStatsRecord, PickDirection, PrimaryAction, RunState,
    Selection,
};
use crate::selector::{RosterSelector, SpinOutcome};
use crate::store::{base_roster, WheelStore};
use crate::timing::{Scheduler, Task};

/// State changes surfaced to the presentation layer when timer tasks fire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WheelEvent {
    /// A spin's delay elapsed and the wheel landed on this entry.
    SpinResolved(String),
    /// Overtime passed one minute; the countdown display goes away.
    CountdownHidden,
    /// A pending editor column transfer was applied.
    PickApplied {
        entry: String,
        direction: PickDirection,
    },
}

/// The widget core: one instance per session.
pub struct WheelApp {
    store: WheelStore,
    selector: RosterSelector,
    clock: RunClock,
    editor: RosterEditor,
}

impl WheelApp {
    /// Restore session state from the store (built-in defaults where absent).
    pub fn new(store: WheelStore) -> Self {
        let candidates = store.load_candidates();
        let default_roster = store.load_default_roster();
        let selected = store.load_selection();
        let auto_remove = store.load_auto_remove();
        Self {
            selector: RosterSelector::new(candidates, default_roster, selected, auto_remove),
            clock: RunClock::new(),
            editor: RosterEditor::new(),
            store,
        }
    }

    /// App backed by memory only (tests, ephemeral sessions).
    pub fn in_memory() -> Self {
        Self::new(WheelStore::in_memory())
    }

    /// Start a spin. The chosen entry arrives later as
    /// [`WheelEvent::SpinResolved`]; the first resolution of a run also
    /// starts the clock.
    pub fn spin<R: Rng>(&mut self, rng: &mut R, scheduler: &mut dyn Scheduler) -> bool {
        let outcome = self.selector.spin(rng, scheduler);
        if outcome != SpinOutcome::Ignored {
            // Auto-remove may have evicted, and the selection cleared --
            // even when eviction emptied the wheel and no spin follows
            self.store.save_candidates(self.selector.candidates());
            self.store.save_selection(self.selector.selected());
        }
        outcome == SpinOutcome::Started
    }

    /// Route a fired timer task back into the state machine.
    pub fn handle_task(&mut self, task: Task, scheduler: &mut dyn Scheduler) -> Option<WheelEvent> {
        match task {
            Task::Tick => self.clock.tick().map(|signal| match signal {
                ClockSignal::HideCountdown => WheelEvent::CountdownHidden,
            }),
            Task::FinishSpin { entry } => {
                self.selector.finish_spin(entry.clone());
                self.store.save_selection(self.selector.selected());
                self.clock.start(scheduler);
                Some(WheelEvent::SpinResolved(entry))
            }
            Task::ApplyPick { entry, direction } => {
                self.editor.apply_pick(&entry, direction);
                Some(WheelEvent::PickApplied { entry, direction })
            }
        }
    }

    /// Manually remove the current pick (auto-remove off only).
    pub fn remove_selected(&mut self) -> bool {
        if !self.selector.remove_selected() {
            return false;
        }
        self.store.save_candidates(self.selector.candidates());
        self.store.save_selection(self.selector.selected());
        true
    }

    pub fn toggle_auto_remove(&mut self) -> bool {
        let auto_remove = self.selector.toggle_auto_remove();
        self.store.save_auto_remove(auto_remove);
        auto_remove
    }

    /// End the run: record statistics when long enough (overwriting any
    /// earlier record for the day), clear the pick, and take the last
    /// selected entry off the wheel.
    pub fn end_run(&mut self, scheduler: &mut dyn Scheduler) -> Option<DailyStatsRecord> {
        let last = self.selector.selected().picked().map(str::to_string);
        let participants = self.selector.default_roster().len();

        let recorded = self
            .clock
            .end(scheduler, last.as_deref(), participants)
            .map(|(day, record)| {
                let mut stats = self.store.load_daily_stats();
                stats.insert(day, record.clone());
                self.store.save_daily_stats(&stats);
                record
            });

        if let Some(name) = &last {
            self.selector.evict(name);
        }
        self.selector.clear_selection();
        self.store.save_candidates(self.selector.candidates());
        self.store.save_selection(self.selector.selected());

        recorded
    }

    /// Open the roster-reset editor seeded from the default roster.
    pub fn open_roster_editor(&mut self) {
        self.editor.open(self.selector.default_roster());
    }

    /// Schedule an editor column transfer.
    pub fn pick(&mut self, entry: &str, direction: PickDirection, scheduler: &mut dyn Scheduler) {
        self.editor.pick(entry, direction, scheduler);
    }

    /// Materialize the pending selection as the new roster and prompt for
    /// the first spin. Refused (returns `false`) when nothing is selected.
    pub fn confirm_roster(&mut self, scheduler: &mut dyn Scheduler) -> bool {
        let Some(roster) = self.editor.confirm() else {
            return false;
        };
        self.selector.reset_to(roster);
        self.clock.reset(scheduler);
        self.store.save_candidates(self.selector.candidates());
        self.store.save_default_roster(self.selector.default_roster());
        self.store.save_selection(self.selector.selected());
        true
    }

    pub fn cancel_roster_editor(&mut self) {
        self.editor.cancel();
    }

    pub fn is_editing(&self) -> bool {
        self.editor.is_open()
    }

    /// Included column of the editor modal, in materialization order.
    pub fn editor_included(&self) -> Vec<String> {
        self.editor.included()
    }

    /// Available column: base-roster members not currently included.
    pub fn editor_available(&self) -> Vec<String> {
        base_roster()
            .into_iter()
            .filter(|name| !self.editor.is_included(name))
            .collect()
    }

    pub fn candidates(&self) -> &[String] {
        self.selector.candidates()
    }

    pub fn default_roster(&self) -> &[String] {
        self.selector.default_roster()
    }

    pub fn selection(&self) -> &Selection {
        self.selector.selected()
    }

    pub fn auto_remove(&self) -> bool {
        self.selector.auto_remove()
    }

    pub fn is_spinning(&self) -> bool {
        self.selector.is_spinning()
    }

    pub fn run_state(&self) -> RunState {
        self.clock.state()
    }

    pub fn remaining_ms(&self) -> u64 {
        self.clock.remaining_ms()
    }

    pub fn overtime_ms(&self) -> u64 {
        self.clock.overtime_ms()
    }

    pub fn countdown_color(&self) -> CountdownColor {
        self.clock.color()
    }

    pub fn daily_stats(&self) -> DailyStats {
        self.store.load_daily_stats()
    }

    /// Which primary action the UI should offer right now.
    pub fn primary_action(&self) -> PrimaryAction {
        PrimaryAction::for_count(self.selector.candidates().len())
    }
}
