//! Low-priority task: reset button

use defmt::*;
use embassy_time::Delay;

use quartz_core::{ButtonController, DebounceOutcome};
use quartz_hal_rp2040::Button;

use super::{FwDelay, SharedStopwatch};
use crate::board::{DEBOUNCE, POLARITY};
use crate::channels::DISPLAY_VALUE;

#[embassy_executor::task]
pub async fn reset_task(mut button: Button<'static>, stopwatch: &'static SharedStopwatch) {
    info!("Reset task started");

    let controller = ButtonController::new(stopwatch, DEBOUNCE, POLARITY);
    let mut delay = FwDelay::new(Delay);

    loop {
        button.wait_for_edge().await;

        let (edge, pin) = button.parts();
        let report = controller.service_low_priority(edge, pin, &mut delay);

        if report.debounce == Some(DebounceOutcome::TimedOut) {
            warn!("Reset button still pressed after debounce window");
        }
        if let Some(elapsed) = report.render {
            debug!("Reset");
            DISPLAY_VALUE.signal(elapsed);
        }
    }
}
