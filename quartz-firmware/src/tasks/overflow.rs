//! High-priority task: counter overflow
//!
//! Polls the PWM wrap flag. The poll interval is far shorter than one
//! overflow interval, so no wrap is missed.

use defmt::*;
use embassy_time::{Duration, Ticker};

use quartz_core::ButtonController;

use super::SharedStopwatch;
use crate::board::{DEBOUNCE, POLARITY};
use crate::channels::DISPLAY_VALUE;

/// Overflow flag poll interval in milliseconds
const POLL_INTERVAL_MS: u64 = 1;

#[embassy_executor::task]
pub async fn overflow_task(stopwatch: &'static SharedStopwatch) {
    info!("Overflow task started");

    let controller = ButtonController::new(stopwatch, DEBOUNCE, POLARITY);
    let mut ticker = Ticker::every(Duration::from_millis(POLL_INTERVAL_MS));

    loop {
        ticker.next().await;

        if let Some(elapsed) = controller.service_overflow() {
            trace!("Overflow: {} us", elapsed.as_micros());
            DISPLAY_VALUE.signal(elapsed);
        }
    }
}
