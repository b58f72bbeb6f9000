//! RP2040-specific HAL for the stopwatch firmware
//!
//! Implements the `quartz-hal` traits on top of `embassy-rp`:
//!
//! - GPIO wrappers (input, direction-switchable flex pin)
//! - PWM slice in free-running mode as the overflow timer
//! - Buttons with a software edge latch

#![no_std]

pub mod button;
pub mod gpio;
pub mod pwm_timer;

pub use button::Button;
pub use gpio::{RpFlex, RpInput};
pub use pwm_timer::PwmOverflowTimer;
