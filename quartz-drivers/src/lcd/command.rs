//! Instruction encoders
//!
//! Each instruction is an operation bit OR'd with option bits. The
//! encoders here only build the byte; the driver sends it and waits.

/// Function set instruction
pub const FUNCTION_SET: u8 = 0x20;
/// Clear display instruction
pub const CLEAR_DISPLAY: u8 = 0x01;
/// Entry mode set instruction
pub const ENTRY_MODE: u8 = 0x04;
/// Display on/off control instruction
pub const DISPLAY_CONTROL: u8 = 0x08;
/// Cursor or display shift instruction
pub const CURSOR_DISPLAY_SHIFT: u8 = 0x10;

/// DDRAM address of row 0, column 0
pub const ROW_0_BASE: u8 = 0x80;
/// DDRAM address of row 1, column 0
pub const ROW_1_BASE: u8 = 0xC0;

/// Enable pulse width, and recovery after it (µs)
pub const PULSE_DELAY_US: u32 = 5;
/// Settle time for every instruction except clear (µs)
pub const EXECUTION_DELAY_US: u32 = 50;
/// Settle time for clear (ms)
pub const CLEAR_DELAY_MS: u32 = 5;
/// Wait after power is applied (ms)
pub const POWER_ON_DELAY_MS: u32 = 50;
/// Priming nibble and the settle time after each write (µs)
pub const PRIMING: [(u8, u32); 3] = [(0x3, 4_500), (0x3, 150), (0x3, EXECUTION_DELAY_US)];

/// Data interface width
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InterfaceWidth {
    /// D4..D7 only, two transfers per byte
    Four,
    /// D0..D7, one transfer per byte
    Eight,
}

impl InterfaceWidth {
    const fn bits(self) -> u8 {
        match self {
            InterfaceWidth::Four => 0x00,
            InterfaceWidth::Eight => 0x10,
        }
    }
}

/// Number of display lines
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Lines {
    One,
    Two,
}

impl Lines {
    const fn bits(self) -> u8 {
        match self {
            Lines::One => 0x00,
            Lines::Two => 0x08,
        }
    }
}

/// Character font
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Font {
    FiveByEight,
    FiveByTen,
}

impl Font {
    const fn bits(self) -> u8 {
        match self {
            Font::FiveByEight => 0x00,
            Font::FiveByTen => 0x04,
        }
    }
}

/// Function set options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FunctionSet {
    pub width: InterfaceWidth,
    pub lines: Lines,
    pub font: Font,
}

impl FunctionSet {
    /// Encode the instruction byte
    pub const fn opcode(&self) -> u8 {
        FUNCTION_SET | self.width.bits() | self.lines.bits() | self.font.bits()
    }
}

/// Cursor direction after each character write
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EntryDirection {
    Decrement,
    Increment,
}

/// Whether the display shifts along with the cursor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ShiftMode {
    /// Only the cursor moves
    CursorOnly,
    /// The whole display shifts with the cursor
    AccompanyDisplay,
}

/// Entry mode options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EntryMode {
    pub direction: EntryDirection,
    pub shift: ShiftMode,
}

impl EntryMode {
    /// Encode the instruction byte
    pub const fn opcode(&self) -> u8 {
        let dir = match self.direction {
            EntryDirection::Decrement => 0x00,
            EntryDirection::Increment => 0x02,
        };
        let shift = match self.shift {
            ShiftMode::CursorOnly => 0x00,
            ShiftMode::AccompanyDisplay => 0x01,
        };
        ENTRY_MODE | dir | shift
    }
}

/// Display on/off control options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DisplayControl {
    pub display: bool,
    pub cursor: bool,
    pub blink: bool,
}

impl DisplayControl {
    /// Display on, cursor and blink off
    pub const ON: Self = Self {
        display: true,
        cursor: false,
        blink: false,
    };

    /// Encode the instruction byte
    pub const fn opcode(&self) -> u8 {
        let mut cmd = DISPLAY_CONTROL;
        if self.display {
            cmd |= 0x04;
        }
        if self.cursor {
            cmd |= 0x02;
        }
        if self.blink {
            cmd |= 0x01;
        }
        cmd
    }
}

/// What a shift instruction moves
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ShiftTarget {
    Cursor,
    Display,
}

/// Shift direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ShiftDirection {
    Left,
    Right,
}

/// Encode a cursor or display shift instruction
pub const fn shift_opcode(target: ShiftTarget, direction: ShiftDirection) -> u8 {
    let target = match target {
        ShiftTarget::Cursor => 0x00,
        ShiftTarget::Display => 0x08,
    };
    let direction = match direction {
        ShiftDirection::Left => 0x00,
        ShiftDirection::Right => 0x04,
    };
    CURSOR_DISPLAY_SHIFT | target | direction
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_function_set() {
        let fs = FunctionSet {
            width: InterfaceWidth::Four,
            lines: Lines::Two,
            font: Font::FiveByEight,
        };
        assert_eq!(fs.opcode(), 0x28);

        let fs = FunctionSet {
            width: InterfaceWidth::Eight,
            lines: Lines::One,
            font: Font::FiveByTen,
        };
        assert_eq!(fs.opcode(), 0x34);
    }

    #[test]
    fn test_entry_mode() {
        let em = EntryMode {
            direction: EntryDirection::Increment,
            shift: ShiftMode::CursorOnly,
        };
        assert_eq!(em.opcode(), 0x06);

        let em = EntryMode {
            direction: EntryDirection::Decrement,
            shift: ShiftMode::AccompanyDisplay,
        };
        assert_eq!(em.opcode(), 0x05);
    }

    #[test]
    fn test_display_control() {
        assert_eq!(DisplayControl::ON.opcode(), 0x0C);

        let all = DisplayControl {
            display: true,
            cursor: true,
            blink: true,
        };
        assert_eq!(all.opcode(), 0x0F);

        let off = DisplayControl {
            display: false,
            cursor: false,
            blink: false,
        };
        assert_eq!(off.opcode(), 0x08);
    }

    #[test]
    fn test_shift() {
        assert_eq!(shift_opcode(ShiftTarget::Cursor, ShiftDirection::Left), 0x10);
        assert_eq!(shift_opcode(ShiftTarget::Display, ShiftDirection::Right), 0x1C);
    }
}
