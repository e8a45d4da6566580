//! Roster-reset editing session.
//!
//! Builds the pending selection a fresh roster is materialized from. Nothing
//! here is persisted; the session lives only between open and confirm/cancel.

use std::collections::HashSet;
use std::time::Duration;

use crate::models::PickDirection;
use crate::timing::{Scheduler, Task};

/// Column-transfer animation length. The set mutation is applied only when
/// the scheduled [`Task::ApplyPick`] fires.
pub const PICK_DELAY_MS: u64 = 300;

/// Pending roster selection for a reset.
///
/// The pool records materialization order: entries keep the order the
/// session was opened with, and entries included for the first time append
/// at the end. Confirm filters the pool by the selection set, so the result
/// is deterministic regardless of set iteration order.
#[derive(Debug, Default)]
pub struct RosterEditor {
    pool: Vec<String>,
    selection: HashSet<String>,
    open: bool,
}

impl RosterEditor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Begin a session seeded with every entry of the default roster.
    pub fn open(&mut self, default_roster: &[String]) {
        self.pool = default_roster.to_vec();
        self.selection = default_roster.iter().cloned().collect();
        self.open = true;
    }

    /// Schedule a column transfer. The mutation lands after the delay via
    /// [`RosterEditor::apply_pick`]; a second pick on the same entry during
    /// the pending transfer is the caller's to avoid.
    pub fn pick(&mut self, entry: &str, direction: PickDirection, scheduler: &mut dyn Scheduler) {
        if !self.open {
            return;
        }
        scheduler.schedule_once(
            Duration::from_millis(PICK_DELAY_MS),
            Task::ApplyPick {
                entry: entry.to_string(),
                direction,
            },
        );
    }

    /// Apply a fired [`Task::ApplyPick`].
    pub fn apply_pick(&mut self, entry: &str, direction: PickDirection) {
        if !self.open {
            return;
        }
        match direction {
            PickDirection::Include => {
                if !self.pool.iter().any(|e| e == entry) {
                    self.pool.push(entry.to_string());
                }
                self.selection.insert(entry.to_string());
            }
            PickDirection::Exclude => {
                self.selection.remove(entry);
            }
        }
    }

    pub fn is_included(&self, entry: &str) -> bool {
        self.selection.contains(entry)
    }

    /// Included entries in materialization order.
    pub fn included(&self) -> Vec<String> {
        self.pool
            .iter()
            .filter(|e| self.selection.contains(*e))
            .cloned()
            .collect()
    }

    /// Materialize the selection as the new roster. `None` (and the session
    /// stays open) when nothing is selected; confirmation is disabled
    /// downstream in that case.
    pub fn confirm(&mut self) -> Option<Vec<String>> {
        if self.selection.is_empty() {
            return None;
        }
        let roster = self.included();
        self.close();
        Some(roster)
    }

    /// Discard the session without touching any roster.
    pub fn cancel(&mut self) {
        self.close();
    }

    fn close(&mut self) {
        self.pool.clear();
        self.selection.clear();
        self.open = false;
    }
}
