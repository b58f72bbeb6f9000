//! PWM slice as an overflow timer
//!
//! The slice free-runs with no output pins. Its wrap flag in the PWM
//! INTR register is the overflow flag. The "overflow enabled" bit is
//! kept in software because the handler polls the flag rather than
//! taking the PWM interrupt.

use core::cell::RefCell;

use embassy_rp::pwm::{Config as PwmConfig, Pwm, Slice};
use embassy_rp::Peri;
use fixed::FixedU16;
use quartz_hal::OverflowTimer;

/// Integer clock divider for a 131.072 ms wrap at 125 MHz
pub const DIVIDER: u8 = 250;

/// Free-running PWM counter
pub struct PwmOverflowTimer<'d> {
    /// The driver reads the wrap flag through `&mut`
    pwm: RefCell<Pwm<'d>>,
    enabled: bool,
}

impl<'d> PwmOverflowTimer<'d> {
    /// Take a slice and start it counting over the full 16-bit range
    pub fn new<T: Slice>(slice: Peri<'d, T>, divider: u8) -> Self {
        let mut config = PwmConfig::default();
        config.top = u16::MAX;
        config.divider = FixedU16::from_num(divider);
        config.enable = true;

        let mut pwm = Pwm::new_free(slice, config);
        pwm.clear_wrapped();

        Self {
            pwm: RefCell::new(pwm),
            enabled: false,
        }
    }
}

impl OverflowTimer for PwmOverflowTimer<'_> {
    fn counter(&self) -> u16 {
        self.pwm.borrow().counter()
    }

    fn set_counter(&mut self, value: u16) {
        self.pwm.get_mut().set_counter(value);
    }

    fn enable_overflow(&mut self) {
        self.enabled = true;
    }

    fn disable_overflow(&mut self) {
        self.enabled = false;
    }

    fn overflow_enabled(&self) -> bool {
        self.enabled
    }

    fn overflow_pending(&self) -> bool {
        self.pwm.borrow_mut().wrapped()
    }

    fn clear_overflow(&mut self) {
        self.pwm.get_mut().clear_wrapped();
    }
}
