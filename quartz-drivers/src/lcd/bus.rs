//! LCD pin bundles
//!
//! The control lines (RS, RW, EN) are the same in both interface widths.
//! The data bus is either D4..D7 or D0..D7.

use quartz_hal::OutputPin;

use super::command::InterfaceWidth;

/// Register select, read/write and enable lines
pub struct Control<P> {
    /// Register select: low = instruction, high = data
    pub rs: P,
    /// Read/write: low = write (always driven low)
    pub rw: P,
    /// Enable strobe
    pub en: P,
}

impl<P: OutputPin> Control<P> {
    /// Bundle the control lines and drive them all low
    pub fn new(mut rs: P, mut rw: P, mut en: P) -> Self {
        rs.set_low();
        rw.set_low();
        en.set_low();
        Self { rs, rw, en }
    }
}

/// Parallel data lines
pub trait DataBus {
    /// Interface width this bus is wired for
    const WIDTH: InterfaceWidth;

    /// Drive the data lines
    ///
    /// On a 4-wire bus the low four bits of `value` go to D4..D7. On an
    /// 8-wire bus `value` goes to D0..D7.
    fn put(&mut self, value: u8);
}

fn drive<P: OutputPin>(pins: &mut [P], value: u8) {
    for (bit, pin) in pins.iter_mut().enumerate() {
        pin.set_state(value & (1 << bit) != 0);
    }
}

/// D4..D7
pub struct FourBitBus<P> {
    data: [P; 4],
}

impl<P: OutputPin> FourBitBus<P> {
    /// Create a bus from D4, D5, D6, D7, driven low
    pub fn new(d4: P, d5: P, d6: P, d7: P) -> Self {
        let mut bus = Self {
            data: [d4, d5, d6, d7],
        };
        bus.put(0);
        bus
    }
}

impl<P: OutputPin> DataBus for FourBitBus<P> {
    const WIDTH: InterfaceWidth = InterfaceWidth::Four;

    fn put(&mut self, value: u8) {
        drive(&mut self.data, value & 0x0F);
    }
}

/// D0..D7
pub struct EightBitBus<P> {
    data: [P; 8],
}

impl<P: OutputPin> EightBitBus<P> {
    /// Create a bus from D0..D7 (in order), driven low
    pub fn new(data: [P; 8]) -> Self {
        let mut bus = Self { data };
        bus.put(0);
        bus
    }
}

impl<P: OutputPin> DataBus for EightBitBus<P> {
    const WIDTH: InterfaceWidth = InterfaceWidth::Eight;

    fn put(&mut self, value: u8) {
        drive(&mut self.data, value);
    }
}
