//! Wheel Core - backend logic for the Daily Wheel picker
//!
//! This crate contains all business logic with zero UI dependencies:
//! roster selection, the run countdown clock, the roster-reset editor,
//! and local persistence. It can be used by a GUI shell or a CLI tool.

pub mod app;
pub mod clock;
pub mod editor;
pub mod logging;
pub mod models;
pub mod selector;
pub mod store;
pub mod timing;

pub use app::{WheelApp, WheelEvent};

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
