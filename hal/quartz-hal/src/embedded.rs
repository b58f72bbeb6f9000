//! Adapter from `embedded-hal` 1.0
//!
//! Board crates usually already provide an `embedded-hal` delay. This
//! wrapper lifts it into the Quartz [`Delay`] trait.

use embedded_hal::delay::DelayNs;

use crate::delay::Delay;

/// `embedded-hal` delay as a Quartz [`Delay`]
pub struct EhDelay<D> {
    delay: D,
}

impl<D: DelayNs> EhDelay<D> {
    /// Wrap a delay provider
    pub fn new(delay: D) -> Self {
        Self { delay }
    }
}

impl<D: DelayNs> Delay for EhDelay<D> {
    fn delay_us(&mut self, us: u32) {
        self.delay.delay_us(us);
    }

    fn delay_ms(&mut self, ms: u32) {
        self.delay.delay_ms(ms);
    }
}
