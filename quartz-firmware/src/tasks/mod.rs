//! Embassy async tasks
//!
//! Each button runs on its own interrupt executor so the two handlers
//! keep a fixed preemption order. The overflow poll shares the
//! start/stop executor. The display task runs in thread mode.

pub mod display;
pub mod overflow;
pub mod reset;
pub mod start_stop;

pub use display::{display_task, Lcd};
pub use overflow::overflow_task;
pub use reset::reset_task;
pub use start_stop::start_stop_task;

use quartz_core::Stopwatch;
use quartz_hal::embedded::EhDelay;
use quartz_hal_rp2040::PwmOverflowTimer;

/// Stopwatch shared by both button executors
pub type SharedStopwatch = Stopwatch<PwmOverflowTimer<'static>>;

/// Busy-wait delay on the embassy time driver
pub type FwDelay = EhDelay<embassy_time::Delay>;
