//! Hardware counter with overflow event
//!
//! Models a fixed-width free-running counter that raises a flag every time
//! it wraps. The wrap period is the stopwatch's time quantum.

/// Free-running counter with an overflow flag
pub trait OverflowTimer {
    /// Read the current counter value
    fn counter(&self) -> u16;

    /// Overwrite the counter value
    ///
    /// Writing zero makes the next overflow exactly one full period away.
    fn set_counter(&mut self, value: u16);

    /// Allow overflow events to be delivered
    fn enable_overflow(&mut self);

    /// Stop delivering overflow events (the counter keeps running)
    fn disable_overflow(&mut self);

    /// Check whether overflow events are delivered
    fn overflow_enabled(&self) -> bool;

    /// Check the latched overflow flag
    fn overflow_pending(&self) -> bool;

    /// Clear the latched overflow flag
    fn clear_overflow(&mut self);
}
