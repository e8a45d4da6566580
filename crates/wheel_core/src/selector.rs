//! Roster selection: the spin operation and removal policies.

use std::time::Duration;

use rand::Rng;

use crate::models::Selection;
use crate::timing::{Scheduler, Task};

/// Wheel animation length. The chosen entry is not observable before the
/// scheduled [`Task::FinishSpin`] fires.
pub const SPIN_DELAY_MS: u64 = 3000;

/// Outcome of a spin attempt.
///
/// Auto-remove eviction happens before the wheel chooses, so an attempt can
/// mutate the rosters even when no spin gets scheduled; callers persisting
/// on mutation need that case kept apart from a plain refusal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpinOutcome {
    /// A spin was scheduled; [`Task::FinishSpin`] will follow.
    Started,
    /// Eviction emptied the candidate list; no spin, but state changed.
    Emptied,
    /// Empty list or a spin already in flight; nothing changed.
    Ignored,
}

/// Owns the candidate list, the current pick, and the auto-remove policy.
#[derive(Debug)]
pub struct RosterSelector {
    candidates: Vec<String>,
    default_roster: Vec<String>,
    selected: Selection,
    auto_remove: bool,
    spinning: bool,
}

impl RosterSelector {
    pub fn new(
        candidates: Vec<String>,
        default_roster: Vec<String>,
        selected: Selection,
        auto_remove: bool,
    ) -> Self {
        Self {
            candidates,
            default_roster,
            selected,
            auto_remove,
            spinning: false,
        }
    }

    pub fn candidates(&self) -> &[String] {
        &self.candidates
    }

    pub fn default_roster(&self) -> &[String] {
        &self.default_roster
    }

    pub fn selected(&self) -> &Selection {
        &self.selected
    }

    pub fn auto_remove(&self) -> bool {
        self.auto_remove
    }

    pub fn is_spinning(&self) -> bool {
        self.spinning
    }

    /// Start a spin. Refused on an empty candidate list or while another
    /// spin is in flight.
    ///
    /// With auto-remove on, an active pick is evicted before the wheel
    /// chooses. The chosen entry rides in the scheduled task and becomes the
    /// selection when [`RosterSelector::finish_spin`] applies it.
    pub fn spin<R: Rng>(&mut self, rng: &mut R, scheduler: &mut dyn Scheduler) -> SpinOutcome {
        if self.candidates.is_empty() || self.spinning {
            return SpinOutcome::Ignored;
        }
        self.spinning = true;

        if self.auto_remove {
            if let Selection::Picked(prev) = self.selected.clone() {
                remove_first(&mut self.candidates, &prev);
            }
        }
        self.selected = Selection::Empty;

        if self.candidates.is_empty() {
            // Auto-remove evicted the only entry; nothing left to land on.
            self.spinning = false;
            return SpinOutcome::Emptied;
        }

        let index = rng.gen_range(0..self.candidates.len());
        let entry = self.candidates[index].clone();
        tracing::debug!(%entry, "spin scheduled");
        scheduler.schedule_once(
            Duration::from_millis(SPIN_DELAY_MS),
            Task::FinishSpin { entry },
        );
        SpinOutcome::Started
    }

    /// Apply a fired [`Task::FinishSpin`]: the wheel has landed.
    pub fn finish_spin(&mut self, entry: String) {
        tracing::info!(%entry, "wheel landed");
        self.selected = Selection::Picked(entry);
        self.spinning = false;
    }

    /// Manually remove the current pick. Only meaningful with auto-remove
    /// off; with it on, eviction happens at the next spin instead.
    pub fn remove_selected(&mut self) -> bool {
        if self.auto_remove {
            return false;
        }
        let Selection::Picked(name) = self.selected.clone() else {
            return false;
        };
        remove_first(&mut self.candidates, &name);
        self.selected = Selection::Empty;
        true
    }

    /// Remove the first candidate matching `entry` by value.
    pub fn evict(&mut self, entry: &str) -> bool {
        remove_first(&mut self.candidates, entry)
    }

    pub fn clear_selection(&mut self) {
        self.selected = Selection::Empty;
    }

    /// Replace both rosters wholesale and prompt for the first spin.
    ///
    /// A still-pending spin is not cancelled; if one fires later it
    /// overwrites the prompt, matching the widget this replaces.
    pub fn reset_to(&mut self, entries: Vec<String>) {
        self.candidates = entries.clone();
        self.default_roster = entries;
        self.selected = Selection::Prompt;
        self.spinning = false;
    }

    pub fn toggle_auto_remove(&mut self) -> bool {
        self.auto_remove = !self.auto_remove;
        self.auto_remove
    }
}

/// Removes the first value match only. Duplicate names are legal and keep
/// their later occurrences.
fn remove_first(list: &mut Vec<String>, value: &str) -> bool {
    match list.iter().position(|e| e == value) {
        Some(pos) => {
            list.remove(pos);
            true
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timing::TimerQueue;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn selector(candidates: &[&str]) -> RosterSelector {
        RosterSelector::new(names(candidates), names(candidates), Selection::Empty, true)
    }

    fn rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    fn spin_and_resolve(sel: &mut RosterSelector, queue: &mut TimerQueue) -> Option<String> {
        if sel.spin(&mut rng(), queue) != SpinOutcome::Started {
            return None;
        }
        let mut landed = None;
        for task in queue.advance(Duration::from_millis(SPIN_DELAY_MS)) {
            if let Task::FinishSpin { entry } = task {
                sel.finish_spin(entry.clone());
                landed = Some(entry);
            }
        }
        landed
    }

    #[test]
    fn spin_resolves_to_a_candidate() {
        let mut sel = selector(&["A", "B", "C"]);
        let mut queue = TimerQueue::new();

        let landed = spin_and_resolve(&mut sel, &mut queue).unwrap();
        assert!(sel.candidates().contains(&landed));
        assert_eq!(sel.selected(), &Selection::Picked(landed));
        assert!(!sel.is_spinning());
    }

    #[test]
    fn spin_on_empty_is_a_noop() {
        let mut sel = selector(&[]);
        let mut queue = TimerQueue::new();

        assert_eq!(sel.spin(&mut rng(), &mut queue), SpinOutcome::Ignored);
        assert_eq!(sel.selected(), &Selection::Empty);
        assert_eq!(queue.active_timers(), 0);
    }

    #[test]
    fn concurrent_spin_is_a_noop() {
        let mut sel = selector(&["A", "B"]);
        let mut queue = TimerQueue::new();

        assert_eq!(sel.spin(&mut rng(), &mut queue), SpinOutcome::Started);
        assert_eq!(sel.spin(&mut rng(), &mut queue), SpinOutcome::Ignored);
        assert_eq!(queue.active_timers(), 1);
    }

    #[test]
    fn entry_not_observable_before_delay() {
        let mut sel = selector(&["A", "B"]);
        let mut queue = TimerQueue::new();

        sel.spin(&mut rng(), &mut queue);
        assert_eq!(sel.selected(), &Selection::Empty);

        assert!(queue
            .advance(Duration::from_millis(SPIN_DELAY_MS - 1))
            .is_empty());
        assert_eq!(sel.selected(), &Selection::Empty);
    }

    #[test]
    fn auto_remove_evicts_previous_pick_before_choosing() {
        let mut sel = selector(&["A", "B", "C"]);
        let mut queue = TimerQueue::new();
        sel.finish_spin("B".to_string());

        let landed = spin_and_resolve(&mut sel, &mut queue).unwrap();
        assert_eq!(sel.candidates(), &names(&["A", "C"])[..]);
        assert_ne!(landed, "B");
    }

    #[test]
    fn auto_remove_off_keeps_previous_pick_in_list() {
        let mut sel = selector(&["A", "B", "C"]);
        sel.toggle_auto_remove();
        sel.finish_spin("B".to_string());

        let mut queue = TimerQueue::new();
        sel.spin(&mut rng(), &mut queue);
        assert_eq!(sel.candidates().len(), 3);
    }

    #[test]
    fn spin_aborts_when_eviction_empties_the_list() {
        let mut sel = selector(&["A"]);
        sel.finish_spin("A".to_string());

        let mut queue = TimerQueue::new();
        assert_eq!(sel.spin(&mut rng(), &mut queue), SpinOutcome::Emptied);
        assert!(!sel.is_spinning());
        assert!(sel.candidates().is_empty());
        assert_eq!(queue.active_timers(), 0);
    }

    #[test]
    fn remove_selected_requires_auto_remove_off() {
        let mut sel = selector(&["A", "B"]);
        sel.finish_spin("A".to_string());

        // Auto-remove on: manual removal is always a no-op
        assert!(!sel.remove_selected());
        assert_eq!(sel.candidates().len(), 2);

        sel.toggle_auto_remove();
        assert!(sel.remove_selected());
        assert_eq!(sel.candidates(), &names(&["B"])[..]);
        assert_eq!(sel.selected(), &Selection::Empty);
    }

    #[test]
    fn remove_selected_without_pick_is_a_noop() {
        let mut sel = selector(&["A"]);
        sel.toggle_auto_remove();
        assert!(!sel.remove_selected());
    }

    #[test]
    fn duplicate_names_remove_first_match_only() {
        let mut sel = RosterSelector::new(
            names(&["A", "B", "A"]),
            names(&["A", "B", "A"]),
            Selection::Empty,
            false,
        );
        sel.finish_spin("A".to_string());
        sel.remove_selected();
        assert_eq!(sel.candidates(), &names(&["B", "A"])[..]);
    }

    #[test]
    fn reset_to_is_idempotent() {
        let mut sel = selector(&["A", "B"]);
        sel.finish_spin("A".to_string());

        sel.reset_to(names(&["X", "Y"]));
        let after_first = (
            sel.candidates().to_vec(),
            sel.default_roster().to_vec(),
            sel.selected().clone(),
        );

        sel.reset_to(names(&["X", "Y"]));
        assert_eq!(sel.candidates(), &after_first.0[..]);
        assert_eq!(sel.default_roster(), &after_first.1[..]);
        assert_eq!(sel.selected(), &after_first.2);
        assert_eq!(sel.selected(), &Selection::Prompt);
    }
}
