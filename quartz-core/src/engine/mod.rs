//! Elapsed-time engine
//!
//! The engine owns the elapsed time and the running flag. [`Stopwatch`]
//! wraps it together with the overflow timer behind a critical-section
//! mutex so that every handler sees a consistent pair.

pub mod elapsed;
pub mod shared;

pub use elapsed::{ElapsedTimeEngine, RunState};
pub use shared::{Snapshot, Stopwatch};
