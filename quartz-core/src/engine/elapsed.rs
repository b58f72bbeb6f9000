//! Pure elapsed-time accumulation
//!
//! No drift correction: accuracy is bounded by how well the interval
//! constant matches the real overflow period.

use crate::timebase::ElapsedTime;

/// Result of a start/stop toggle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RunState {
    /// Clock is accumulating
    Running,
    /// Clock is frozen
    Stopped,
}

impl RunState {
    /// Check if the clock is accumulating
    pub fn is_running(self) -> bool {
        self == RunState::Running
    }
}

/// Elapsed time plus the running flag that gates it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ElapsedTimeEngine {
    elapsed: ElapsedTime,
    running: bool,
    interval: ElapsedTime,
}

impl ElapsedTimeEngine {
    /// Create a stopped engine at zero
    pub const fn new(interval: ElapsedTime) -> Self {
        Self {
            elapsed: ElapsedTime::ZERO,
            running: false,
            interval,
        }
    }

    /// Accumulated time
    pub fn elapsed(&self) -> ElapsedTime {
        self.elapsed
    }

    /// Time added per overflow event
    pub fn interval(&self) -> ElapsedTime {
        self.interval
    }

    /// Check the running flag
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Current run state
    pub fn state(&self) -> RunState {
        if self.running {
            RunState::Running
        } else {
            RunState::Stopped
        }
    }

    /// Flip the running flag, returning the new state
    pub fn toggle(&mut self) -> RunState {
        self.running = !self.running;
        self.state()
    }

    /// Account for one overflow event
    ///
    /// Returns the new elapsed time, or `None` if the clock is stopped.
    pub fn advance(&mut self) -> Option<ElapsedTime> {
        if !self.running {
            return None;
        }
        self.elapsed = self.elapsed.saturating_add(self.interval);
        Some(self.elapsed)
    }

    /// Zero the elapsed time (running flag is untouched)
    pub fn reset(&mut self) {
        self.elapsed = ElapsedTime::ZERO;
    }
}
