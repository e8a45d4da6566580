//! Data models for the Daily Wheel.
//!
//! This module contains the core data structures:
//! - Enums for the selection sentinel, run state, and display routing
//! - Daily statistics records and their persisted encoding

mod enums;
mod stats;

pub use enums::{
    CountdownColor, PickDirection, PrimaryAction, RunState, Selection, PROMPT_TEXT,
};
pub use stats::{day_key, today_key, DailyStats, DailyStatsRecord};
