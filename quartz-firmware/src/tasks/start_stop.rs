//! High-priority task: start/stop button
//!
//! Waits only on the button edge, so the edge stays armed between presses.
//! The overflow flag is polled by [`super::overflow_task`] on the same
//! executor; tasks at one priority never preempt each other.

use defmt::*;
use embassy_time::Delay;

use quartz_core::{ButtonController, DebounceOutcome};
use quartz_hal_rp2040::Button;

use super::{FwDelay, SharedStopwatch};
use crate::board::{DEBOUNCE, POLARITY};
use crate::channels::DISPLAY_VALUE;

#[embassy_executor::task]
pub async fn start_stop_task(mut button: Button<'static>, stopwatch: &'static SharedStopwatch) {
    info!("Start/stop task started");

    let controller = ButtonController::new(stopwatch, DEBOUNCE, POLARITY);
    let mut delay = FwDelay::new(Delay);

    loop {
        button.wait_for_edge().await;

        let (edge, pin) = button.parts();
        let report = controller.service_high_priority(edge, pin, &mut delay);

        if let Some(state) = report.toggled {
            debug!("Start/stop: {}", state);
        }
        if report.debounce == Some(DebounceOutcome::TimedOut) {
            warn!("Start/stop button still pressed after debounce window");
        }
        if let Some(elapsed) = report.render {
            DISPLAY_VALUE.signal(elapsed);
        }
    }
}
