//! Button-edge controller
//!
//! Two independent edge-triggered handlers, one per button:
//!
//! - High priority: start/stop edge, then the overflow event
//! - Low priority: reset edge
//!
//! Handlers debounce the release with a bounded sampler instead of
//! spinning until the pin settles.

pub mod buttons;
pub mod debounce;

pub use buttons::{ButtonController, HighPriorityReport, LowPriorityReport};
pub use debounce::{wait_for_release, DebounceConfig, DebounceOutcome, Debouncer};
