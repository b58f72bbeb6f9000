//! Stopwatch state shared between preemption levels
//!
//! The start/stop and overflow paths run at high priority, the reset path at
//! low priority. Every mutation of the engine and of the counter register
//! happens inside one critical section, so a reset can no longer be torn by
//! an overflow landing halfway through it.

use core::cell::RefCell;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;
use quartz_hal::OverflowTimer;

use super::elapsed::{ElapsedTimeEngine, RunState};
use crate::timebase::ElapsedTime;

/// Consistent view of the stopwatch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Snapshot {
    /// Accumulated time
    pub elapsed: ElapsedTime,
    /// Running flag
    pub state: RunState,
}

struct Inner<T> {
    engine: ElapsedTimeEngine,
    timer: T,
}

/// Engine and overflow timer behind a critical-section mutex
pub struct Stopwatch<T> {
    inner: Mutex<CriticalSectionRawMutex, RefCell<Inner<T>>>,
}

impl<T> Stopwatch<T> {
    /// Create a stopped stopwatch at zero
    pub const fn new(timer: T, interval: ElapsedTime) -> Self {
        Self {
            inner: Mutex::new(RefCell::new(Inner {
                engine: ElapsedTimeEngine::new(interval),
                timer,
            })),
        }
    }
}

impl<T: OverflowTimer> Stopwatch<T> {
    /// Start or stop the clock
    ///
    /// Starting clears a stale overflow flag before enabling overflow events,
    /// so the first increment comes from a real overflow.
    pub fn toggle(&self) -> RunState {
        self.inner.lock(|cell| {
            let mut inner = cell.borrow_mut();
            let Inner { engine, timer } = &mut *inner;

            if engine.is_running() {
                timer.disable_overflow();
            } else {
                timer.clear_overflow();
                timer.enable_overflow();
            }
            engine.toggle()
        })
    }

    /// Consume a pending overflow and advance
    ///
    /// Returns the new elapsed time if an enabled overflow was pending and
    /// the clock is running.
    pub fn service_overflow(&self) -> Option<ElapsedTime> {
        self.inner.lock(|cell| {
            let mut inner = cell.borrow_mut();
            let Inner { engine, timer } = &mut *inner;

            if !(timer.overflow_enabled() && timer.overflow_pending()) {
                return None;
            }
            timer.clear_overflow();
            engine.advance()
        })
    }

    /// Zero the elapsed time and the counter register
    ///
    /// A latched overflow is dropped too, so the next increment is a full
    /// interval after the reset.
    pub fn reset(&self) -> ElapsedTime {
        self.inner.lock(|cell| {
            let mut inner = cell.borrow_mut();
            inner.engine.reset();
            inner.timer.set_counter(0);
            inner.timer.clear_overflow();
            inner.engine.elapsed()
        })
    }

    /// Read elapsed time and running flag together
    pub fn snapshot(&self) -> Snapshot {
        self.inner.lock(|cell| {
            let inner = cell.borrow();
            Snapshot {
                elapsed: inner.engine.elapsed(),
                state: inner.engine.state(),
            }
        })
    }

    /// Run a closure against the timer inside the critical section
    pub fn with_timer<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        self.inner.lock(|cell| f(&mut cell.borrow_mut().timer))
    }
}
