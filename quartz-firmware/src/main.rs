//! Quartz - Stopwatch Firmware
//!
//! Two-button stopwatch on an RP2040 with an HD44780 character LCD.
//!
//! - Start/stop and the counter overflow run on the high-priority
//!   interrupt executor
//! - Reset runs on the low-priority interrupt executor
//! - The LCD is written from thread mode only

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::{InterruptExecutor, Spawner};
use embassy_rp::gpio::{AnyPin, Flex, Input};
use embassy_rp::interrupt;
use embassy_rp::interrupt::{InterruptExt, Priority as IrqPriority};
use embassy_rp::Peri;
use embassy_time::Delay;
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use quartz_core::{render, ElapsedTime, Stopwatch};
use quartz_drivers::lcd::{Control, FourBitBus, Font};
use quartz_drivers::Hd44780;
use quartz_hal::{ConfigurablePin, PinMode, Priority};
use quartz_hal_rp2040::{Button, RpFlex, RpInput};

#[macro_use]
mod board;
mod channels;
mod tasks;

use crate::board::{button_pull, lcd_lines, press_edge, LCD_GEOMETRY, POLARITY, TIMEBASE};
use crate::tasks::{FwDelay, SharedStopwatch};

static EXECUTOR_HIGH: InterruptExecutor = InterruptExecutor::new();
static EXECUTOR_LOW: InterruptExecutor = InterruptExecutor::new();

static STOPWATCH: StaticCell<SharedStopwatch> = StaticCell::new();

#[interrupt]
unsafe fn SWI_IRQ_1() {
    EXECUTOR_HIGH.on_interrupt()
}

#[interrupt]
unsafe fn SWI_IRQ_0() {
    EXECUTOR_LOW.on_interrupt()
}

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Quartz stopwatch starting...");

    let p = embassy_rp::init(Default::default());
    let pins = take_board!(p);

    // LCD lines as driven-low outputs; RW stays low (write only)
    let out = |pin: Peri<'static, AnyPin>| {
        let mut pin = RpFlex::new(Flex::new(pin));
        pin.set_mode(PinMode::Output);
        pin
    };
    let control = Control::new(out(pins.lcd_rs), out(pins.lcd_rw), out(pins.lcd_en));
    let bus = FourBitBus::new(
        out(pins.lcd_d4),
        out(pins.lcd_d5),
        out(pins.lcd_d6),
        out(pins.lcd_d7),
    );

    let mut lcd = Hd44780::new(bus, control, FwDelay::new(Delay), LCD_GEOMETRY);
    lcd.initialize(lcd_lines(), Font::FiveByEight);
    render(&mut lcd, ElapsedTime::ZERO);
    info!("LCD ready ({}x{})", LCD_GEOMETRY.cols, LCD_GEOMETRY.rows);

    let stopwatch: &'static SharedStopwatch =
        STOPWATCH.init(Stopwatch::new(pins.timer, TIMEBASE.interval()));
    info!("Overflow interval: {} us", TIMEBASE.interval_us());

    let pull = button_pull(POLARITY);
    let edge = press_edge(POLARITY);
    let start_stop = Button::new(
        RpInput::new(Input::new(pins.start_stop, pull)),
        edge,
        Priority::High,
    );
    let reset = Button::new(RpInput::new(Input::new(pins.reset, pull)), edge, Priority::Low);

    // Lower number = more urgent; thread mode sits below both
    interrupt::SWI_IRQ_1.set_priority(IrqPriority::P1);
    let high = EXECUTOR_HIGH.start(interrupt::SWI_IRQ_1);
    high.spawn(tasks::start_stop_task(start_stop, stopwatch)).unwrap();
    high.spawn(tasks::overflow_task(stopwatch)).unwrap();

    interrupt::SWI_IRQ_0.set_priority(IrqPriority::P3);
    let low = EXECUTOR_LOW.start(interrupt::SWI_IRQ_0);
    low.spawn(tasks::reset_task(reset, stopwatch)).unwrap();

    spawner.spawn(tasks::display_task(lcd)).unwrap();

    info!("All tasks spawned, stopwatch running");
}
