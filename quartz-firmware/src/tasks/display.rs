//! Display task
//!
//! Sole owner of the LCD. Renders whatever value the stopwatch tasks last
//! published.

use defmt::*;

use quartz_core::render;
use quartz_drivers::lcd::FourBitBus;
use quartz_drivers::Hd44780;
use quartz_hal_rp2040::RpFlex;

use super::FwDelay;
use crate::channels::DISPLAY_VALUE;

/// LCD on the board's 4-wire bus
pub type Lcd = Hd44780<FourBitBus<RpFlex<'static>>, RpFlex<'static>, FwDelay>;

#[embassy_executor::task]
pub async fn display_task(mut lcd: Lcd) {
    info!("Display task started");

    loop {
        let elapsed = DISPLAY_VALUE.wait().await;
        render(&mut lcd, elapsed);
    }
}
