//! Character LCD driver
//!
//! Bit-banged HD44780 protocol over plain GPIO. There is no busy-flag
//! read back: every command is followed by a fixed settle delay.

pub mod bus;
pub mod command;
pub mod hd44780;

pub use bus::{Control, DataBus, EightBitBus, FourBitBus};
pub use command::{
    DisplayControl, EntryDirection, EntryMode, Font, FunctionSet, InterfaceWidth, Lines,
    ShiftDirection, ShiftMode, ShiftTarget,
};
pub use hd44780::{Hd44780, LcdError, Register, Row};
