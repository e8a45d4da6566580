//! Local persistence for the Daily Wheel.
//!
//! This module provides:
//! - `KvStore`: the synchronous string key-value interface the core persists
//!   through (the only persistence surface the core knows about)
//! - `MemoryStore`: in-memory store for tests and ephemeral sessions
//! - `JsonFileStore`: best-effort file-backed store with atomic writes
//! - `WheelStore`: typed per-field load/save facade over any `KvStore`

mod kv;
mod state;

pub use kv::{JsonFileStore, KvStore, MemoryStore, StoreError, StoreResult};
pub use state::{base_roster, WheelStore};
