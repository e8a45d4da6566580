//! Per-day run statistics.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Summary of one day's run.
///
/// Serialized field names match the persisted `dailyStats` format of the
/// original widget, so existing stored stats keep loading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyStatsRecord {
    /// Counted duration plus overtime, in milliseconds.
    #[serde(rename = "totalDuration")]
    pub total_duration_ms: u64,

    /// Overtime portion, in milliseconds.
    #[serde(rename = "overtime")]
    pub overtime_ms: u64,

    /// The entry selected when the run ended, if any.
    #[serde(rename = "last")]
    pub last_selected: Option<String>,

    /// Roster size for the run (the default roster, not the remainder).
    #[serde(rename = "participants")]
    pub participant_count: usize,
}

/// Statistics keyed by calendar day (`YYYY-MM-DD`).
///
/// A second run on the same day overwrites that day's record.
pub type DailyStats = BTreeMap<String, DailyStatsRecord>;

/// `YYYY-MM-DD` key for a stats entry.
pub fn day_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Key for the current UTC calendar day (the original widget keys by the
/// ISO timestamp's date part, which is UTC).
pub fn today_key() -> String {
    day_key(chrono::Utc::now().date_naive())
}
