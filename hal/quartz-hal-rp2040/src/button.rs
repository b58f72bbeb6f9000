//! Push buttons with a latched edge flag
//!
//! The RP2040 GPIO driver delivers edges as async events. A button task
//! awaits the configured edge and latches it, then hands the latch and
//! the raw pin to the service routine.

use embedded_hal_async::digital::Wait;
use quartz_hal::{Edge, EdgeInterrupt, LatchedEdge, Priority};

use crate::gpio::RpInput;

/// Button input plus its edge latch
pub struct Button<'d> {
    input: RpInput<'d>,
    latch: LatchedEdge,
}

impl<'d> Button<'d> {
    /// Create an enabled button that latches on `edge`
    pub fn new(input: RpInput<'d>, edge: Edge, priority: Priority) -> Self {
        let mut latch = LatchedEdge::new(edge, priority);
        latch.enable();
        Self { input, latch }
    }

    /// Wait for the configured edge and latch it
    pub async fn wait_for_edge(&mut self) {
        let edge = self.latch.edge();
        let pin = self.input.inner_mut();

        // Infallible on RP2040
        let _ = match edge {
            Edge::Falling => Wait::wait_for_falling_edge(pin).await,
            Edge::Rising => Wait::wait_for_rising_edge(pin).await,
        };
        self.latch.latch(edge);
    }

    /// Split into the edge flag and the raw level reader
    pub fn parts(&mut self) -> (&mut LatchedEdge, &RpInput<'d>) {
        (&mut self.latch, &self.input)
    }
}
