//! Typed facade over the persisted wheel fields.
//!
//! Every persisted field has an explicit load/save pair. Loads fall back to
//! built-in defaults when a value is absent or malformed; the state machine
//! never sees a persistence error.

use crate::models::{DailyStats, Selection};

use super::kv::{KvStore, MemoryStore};

// Persistence keys, unchanged from the original widget's localStorage names.
const KEY_CANDIDATES: &str = "wheelItems";
const KEY_DEFAULT_ROSTER: &str = "defaultItems";
const KEY_SELECTED: &str = "selectedItem";
const KEY_AUTO_REMOVE: &str = "autoRemove";
const KEY_DAILY_STATS: &str = "dailyStats";

const BASE_ROSTER: [&str; 10] = [
    "Denis", "Jakob", "Frank", "Ahmet", "Arpitha", "Rick", "Henning", "Ivo", "Markus", "Jens",
];

/// The built-in roster used when nothing is persisted. Also the pool the
/// roster editor lets excluded members be re-added from.
pub fn base_roster() -> Vec<String> {
    BASE_ROSTER.iter().map(|s| s.to_string()).collect()
}

/// Owns all persisted fields of the wheel over any [`KvStore`].
pub struct WheelStore {
    kv: Box<dyn KvStore>,
}

impl WheelStore {
    pub fn new(kv: Box<dyn KvStore>) -> Self {
        Self { kv }
    }

    /// Store backed by memory only (tests, ephemeral sessions).
    pub fn in_memory() -> Self {
        Self::new(Box::new(MemoryStore::new()))
    }

    /// Current candidates. Falls back to the persisted default roster, then
    /// to the built-in base roster.
    pub fn load_candidates(&self) -> Vec<String> {
        self.load_roster(KEY_CANDIDATES)
            .unwrap_or_else(|| self.load_default_roster())
    }

    pub fn save_candidates(&mut self, candidates: &[String]) {
        self.save_roster(KEY_CANDIDATES, candidates);
    }

    /// The roster a reset seeds from.
    pub fn load_default_roster(&self) -> Vec<String> {
        self.load_roster(KEY_DEFAULT_ROSTER).unwrap_or_else(base_roster)
    }

    pub fn save_default_roster(&mut self, roster: &[String]) {
        self.save_roster(KEY_DEFAULT_ROSTER, roster);
    }

    pub fn load_selection(&self) -> Selection {
        match self.kv.get(KEY_SELECTED) {
            Some(raw) => Selection::decode(&raw),
            None => Selection::Empty,
        }
    }

    pub fn save_selection(&mut self, selection: &Selection) {
        self.kv.set(KEY_SELECTED, &selection.encode());
    }

    /// Absent defaults to `true`; anything other than `"false"` reads as on.
    pub fn load_auto_remove(&self) -> bool {
        self.kv.get(KEY_AUTO_REMOVE).as_deref() != Some("false")
    }

    pub fn save_auto_remove(&mut self, auto_remove: bool) {
        self.kv
            .set(KEY_AUTO_REMOVE, if auto_remove { "true" } else { "false" });
    }

    pub fn load_daily_stats(&self) -> DailyStats {
        let Some(raw) = self.kv.get(KEY_DAILY_STATS) else {
            return DailyStats::new();
        };
        match serde_json::from_str(&raw) {
            Ok(stats) => stats,
            Err(e) => {
                tracing::warn!("Malformed {} value, starting fresh: {}", KEY_DAILY_STATS, e);
                DailyStats::new()
            }
        }
    }

    pub fn save_daily_stats(&mut self, stats: &DailyStats) {
        match serde_json::to_string(stats) {
            Ok(json) => self.kv.set(KEY_DAILY_STATS, &json),
            Err(e) => tracing::warn!("Failed to serialize {}: {}", KEY_DAILY_STATS, e),
        }
    }

    fn load_roster(&self, key: &str) -> Option<Vec<String>> {
        let raw = self.kv.get(key)?;
        match serde_json::from_str(&raw) {
            Ok(roster) => Some(roster),
            Err(e) => {
                tracing::warn!("Malformed {} value, using default: {}", key, e);
                None
            }
        }
    }

    fn save_roster(&mut self, key: &str, roster: &[String]) {
        match serde_json::to_string(roster) {
            Ok(json) => self.kv.set(key, &json),
            Err(e) => tracing::warn!("Failed to serialize {}: {}", key, e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DailyStatsRecord;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn empty_store_yields_defaults() {
        let store = WheelStore::in_memory();
        assert_eq!(store.load_candidates(), base_roster());
        assert_eq!(store.load_default_roster(), base_roster());
        assert_eq!(store.load_selection(), Selection::Empty);
        assert!(store.load_auto_remove());
        assert!(store.load_daily_stats().is_empty());
    }

    #[test]
    fn candidates_fall_back_to_saved_default_roster() {
        let mut store = WheelStore::in_memory();
        store.save_default_roster(&names(&["A", "B"]));
        assert_eq!(store.load_candidates(), names(&["A", "B"]));
    }

    #[test]
    fn roster_roundtrip() {
        let mut store = WheelStore::in_memory();
        store.save_candidates(&names(&["Frank", "Ivo"]));
        assert_eq!(store.load_candidates(), names(&["Frank", "Ivo"]));
    }

    #[test]
    fn selection_roundtrip_preserves_prompt() {
        let mut store = WheelStore::in_memory();
        store.save_selection(&Selection::Prompt);
        assert_eq!(store.load_selection(), Selection::Prompt);

        store.save_selection(&Selection::Empty);
        assert_eq!(store.load_selection(), Selection::Empty);
    }

    #[test]
    fn auto_remove_only_false_turns_it_off() {
        let mut store = WheelStore::in_memory();
        store.save_auto_remove(false);
        assert!(!store.load_auto_remove());
        store.save_auto_remove(true);
        assert!(store.load_auto_remove());
    }

    #[test]
    fn malformed_roster_falls_back() {
        let mut kv = MemoryStore::new();
        kv.set(KEY_CANDIDATES, "not json");
        let store = WheelStore::new(Box::new(kv));
        assert_eq!(store.load_candidates(), base_roster());
    }

    #[test]
    fn malformed_stats_fall_back() {
        let mut kv = MemoryStore::new();
        kv.set(KEY_DAILY_STATS, "[1,2,3]");
        let store = WheelStore::new(Box::new(kv));
        assert!(store.load_daily_stats().is_empty());
    }

    #[test]
    fn stats_roundtrip() {
        let mut store = WheelStore::in_memory();
        let mut stats = DailyStats::new();
        stats.insert(
            "2026-08-25".to_string(),
            DailyStatsRecord {
                total_duration_ms: 600_000,
                overtime_ms: 60_000,
                last_selected: Some("Rick".to_string()),
                participant_count: 10,
            },
        );
        store.save_daily_stats(&stats);
        assert_eq!(store.load_daily_stats(), stats);
    }
}
