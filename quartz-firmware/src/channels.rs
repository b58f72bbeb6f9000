//! Inter-task communication
//!
//! Both button handlers publish the value to show; only the display task
//! touches the LCD. A signal keeps just the latest value, so a slow LCD
//! write never queues stale frames.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;

use quartz_core::ElapsedTime;

/// Latest elapsed time to render
pub static DISPLAY_VALUE: Signal<CriticalSectionRawMutex, ElapsedTime> = Signal::new();
