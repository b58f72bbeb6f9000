//! Board wiring
//!
//! Constants and the `take_board!` macro are generated by build.rs from
//! stopwatch.toml.

use embassy_rp::gpio::{AnyPin, Pull};
use embassy_rp::Peri;
use quartz_core::config::ButtonPolarity;
use quartz_drivers::lcd::Lines;
use quartz_hal::Edge;
use quartz_hal_rp2040::PwmOverflowTimer;

include!(concat!(env!("OUT_DIR"), "/board_config.rs"));

/// Peripherals claimed by the stopwatch
pub struct BoardPins {
    pub lcd_rs: Peri<'static, AnyPin>,
    pub lcd_rw: Peri<'static, AnyPin>,
    pub lcd_en: Peri<'static, AnyPin>,
    pub lcd_d4: Peri<'static, AnyPin>,
    pub lcd_d5: Peri<'static, AnyPin>,
    pub lcd_d6: Peri<'static, AnyPin>,
    pub lcd_d7: Peri<'static, AnyPin>,
    pub start_stop: Peri<'static, AnyPin>,
    pub reset: Peri<'static, AnyPin>,
    pub timer: PwmOverflowTimer<'static>,
}

/// Pull resistor that holds a button at its released level
pub const fn button_pull(polarity: ButtonPolarity) -> Pull {
    match polarity {
        ButtonPolarity::ActiveLow => Pull::Up,
        ButtonPolarity::ActiveHigh => Pull::Down,
    }
}

/// Edge produced by pressing a button
pub const fn press_edge(polarity: ButtonPolarity) -> Edge {
    match polarity {
        ButtonPolarity::ActiveLow => Edge::Falling,
        ButtonPolarity::ActiveHigh => Edge::Rising,
    }
}

/// Line count for the configured display
pub const fn lcd_lines() -> Lines {
    if LCD_GEOMETRY.rows > 1 {
        Lines::Two
    } else {
        Lines::One
    }
}
