//! GPIO wrappers
//!
//! Thin newtypes so `embassy-rp` pins satisfy the `quartz-hal` traits.

use embassy_rp::gpio::{Flex, Input, Level};
use quartz_hal::{ConfigurablePin, InputPin, OutputPin, PinMode};

/// Digital input
pub struct RpInput<'d>(Input<'d>);

impl<'d> RpInput<'d> {
    /// Wrap an input pin
    pub fn new(pin: Input<'d>) -> Self {
        Self(pin)
    }

    /// Underlying pin, for async edge waits
    pub fn inner_mut(&mut self) -> &mut Input<'d> {
        &mut self.0
    }
}

impl InputPin for RpInput<'_> {
    fn is_high(&self) -> bool {
        self.0.is_high()
    }
}

/// Pin whose direction can change at runtime
///
/// Used for the LCD lines, which the controller can also drive.
pub struct RpFlex<'d> {
    pin: Flex<'d>,
    mode: PinMode,
}

impl<'d> RpFlex<'d> {
    /// Wrap a flex pin, starting as an input
    pub fn new(mut pin: Flex<'d>) -> Self {
        pin.set_as_input();
        Self {
            pin,
            mode: PinMode::Input,
        }
    }
}

impl ConfigurablePin for RpFlex<'_> {
    fn set_mode(&mut self, mode: PinMode) {
        match mode {
            PinMode::Input => self.pin.set_as_input(),
            PinMode::Output => {
                // Drive low before enabling the output driver
                self.pin.set_level(Level::Low);
                self.pin.set_as_output();
            }
        }
        self.mode = mode;
    }

    fn mode(&self) -> PinMode {
        self.mode
    }
}

impl OutputPin for RpFlex<'_> {
    fn set_high(&mut self) {
        self.pin.set_high();
    }

    fn set_low(&mut self) {
        self.pin.set_low();
    }

    fn is_set_high(&self) -> bool {
        self.pin.is_set_high()
    }
}

impl InputPin for RpFlex<'_> {
    fn is_high(&self) -> bool {
        self.pin.is_high()
    }
}
