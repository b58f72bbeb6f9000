//! HD44780 protocol driver
//!
//! Framing for both interface widths, the power-on handshake and the
//! instruction set used by the stopwatch. Characters outside printable
//! ASCII are shown as `?`.

use quartz_core::config::DisplayGeometry;
use quartz_core::TextDisplay;
use quartz_hal::{Delay, OutputPin};

use super::bus::{Control, DataBus};
use super::command::{
    shift_opcode, DisplayControl, EntryDirection, EntryMode, Font, FunctionSet,
    InterfaceWidth, Lines, ShiftDirection, ShiftMode, ShiftTarget, CLEAR_DELAY_MS, CLEAR_DISPLAY,
    EXECUTION_DELAY_US, FUNCTION_SET, POWER_ON_DELAY_MS, PRIMING, PULSE_DELAY_US, ROW_0_BASE,
    ROW_1_BASE,
};

/// LCD driver errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LcdError {
    /// Row index other than 0 or 1
    InvalidRow(u8),
}

/// Target register of a transfer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Register {
    /// Instruction register (RS low)
    Instruction,
    /// Data register (RS high)
    Data,
}

/// Display row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Row {
    First,
    Second,
}

impl Row {
    /// DDRAM address of column 0
    pub const fn base(self) -> u8 {
        match self {
            Row::First => ROW_0_BASE,
            Row::Second => ROW_1_BASE,
        }
    }
}

impl TryFrom<u8> for Row {
    type Error = LcdError;

    fn try_from(row: u8) -> Result<Self, Self::Error> {
        match row {
            0 => Ok(Row::First),
            1 => Ok(Row::Second),
            _ => Err(LcdError::InvalidRow(row)),
        }
    }
}

/// HD44780-compatible character LCD
pub struct Hd44780<B, P, D> {
    bus: B,
    control: Control<P>,
    delay: D,
    geometry: DisplayGeometry,
    ready: bool,
}

impl<B, P, D> Hd44780<B, P, D>
where
    B: DataBus,
    P: OutputPin,
    D: Delay,
{
    /// Create a driver; call [`initialize`](Self::initialize) before writing
    pub fn new(bus: B, control: Control<P>, delay: D, geometry: DisplayGeometry) -> Self {
        Self {
            bus,
            control,
            delay,
            geometry,
            ready: false,
        }
    }

    /// Check whether the power-on handshake has completed
    pub fn is_ready(&self) -> bool {
        self.ready
    }

    /// Display geometry
    pub fn geometry(&self) -> DisplayGeometry {
        self.geometry
    }

    /// Give back the pins and delay
    pub fn release(self) -> (B, Control<P>, D) {
        (self.bus, self.control, self.delay)
    }

    /// Run the power-on handshake and set up the display
    ///
    /// Ends with the display on, cursor and blink off, and the cursor
    /// moving right after each character.
    pub fn initialize(&mut self, lines: Lines, font: Font) {
        self.delay.delay_ms(POWER_ON_DELAY_MS);

        for (nibble, settle_us) in PRIMING {
            self.write_nibble(Register::Instruction, nibble);
            self.delay.delay_us(settle_us);
        }

        // Interface width select; the controller is still in 8-bit mode here
        match B::WIDTH {
            InterfaceWidth::Four => self.write_nibble(Register::Instruction, FUNCTION_SET >> 4),
            InterfaceWidth::Eight => self.write_nibble(Register::Instruction, 0x3),
        }
        self.delay.delay_us(EXECUTION_DELAY_US);

        self.function_set(FunctionSet {
            width: B::WIDTH,
            lines,
            font,
        });
        self.clear();
        self.display_control(DisplayControl::ON);
        self.entry_mode(EntryMode {
            direction: EntryDirection::Increment,
            shift: ShiftMode::CursorOnly,
        });

        self.ready = true;
    }

    /// Send one enable-strobed transfer of `nibble` on D4..D7
    ///
    /// On an 8-wire bus the nibble goes out on D4..D7 with D0..D3 low.
    pub fn write_nibble(&mut self, register: Register, nibble: u8) {
        let value = match B::WIDTH {
            InterfaceWidth::Four => nibble & 0x0F,
            InterfaceWidth::Eight => (nibble & 0x0F) << 4,
        };
        self.strobe(register, value);
    }

    /// Send one byte: high nibble then low nibble, or one 8-wire transfer
    pub fn write_byte(&mut self, register: Register, byte: u8) {
        match B::WIDTH {
            InterfaceWidth::Four => {
                self.write_nibble(register, byte >> 4);
                self.write_nibble(register, byte & 0x0F);
            }
            InterfaceWidth::Eight => self.strobe(register, byte),
        }
    }

    /// Write one character at the cursor
    pub fn write_char(&mut self, ch: char) {
        let byte = if ch.is_ascii() && !ch.is_ascii_control() {
            ch as u8
        } else {
            b'?'
        };
        self.write_byte(Register::Data, byte);
        self.delay.delay_us(EXECUTION_DELAY_US);
    }

    /// Clear and write `text` across the rows
    ///
    /// The first `cols` characters go on row 0, the next `cols` on row 1.
    /// Anything past the display's capacity is dropped.
    pub fn write_str(&mut self, text: &str) {
        let cols = usize::from(self.geometry.cols);
        self.clear();

        let mut chars = text.chars();
        for ch in chars.by_ref().take(cols) {
            self.write_char(ch);
        }

        if self.geometry.rows < 2 {
            return;
        }

        self.set_cursor(Row::Second, 0);
        for ch in chars.take(cols) {
            self.write_char(ch);
        }
    }

    /// Move the cursor; `col` is not range checked
    pub fn set_cursor(&mut self, row: Row, col: u8) {
        self.command(row.base().wrapping_add(col));
    }

    /// Function set instruction
    pub fn function_set(&mut self, options: FunctionSet) {
        self.command(options.opcode());
    }

    /// Clear display and home the cursor
    pub fn clear(&mut self) {
        self.write_byte(Register::Instruction, CLEAR_DISPLAY);
        self.delay.delay_ms(CLEAR_DELAY_MS);
    }

    /// Entry mode instruction
    pub fn entry_mode(&mut self, options: EntryMode) {
        self.command(options.opcode());
    }

    /// Display on/off control instruction
    pub fn display_control(&mut self, options: DisplayControl) {
        self.command(options.opcode());
    }

    /// Cursor or display shift instruction
    pub fn shift(&mut self, target: ShiftTarget, direction: ShiftDirection) {
        self.command(shift_opcode(target, direction));
    }

    fn command(&mut self, opcode: u8) {
        self.write_byte(Register::Instruction, opcode);
        self.delay.delay_us(EXECUTION_DELAY_US);
    }

    fn strobe(&mut self, register: Register, value: u8) {
        self.control.en.set_low();
        self.control.rs.set_state(register == Register::Data);
        self.control.rw.set_low();
        self.bus.put(value);

        self.control.en.set_high();
        self.delay.delay_us(PULSE_DELAY_US);
        self.control.en.set_low();
        self.delay.delay_us(PULSE_DELAY_US);
    }
}

impl<B, P, D> TextDisplay for Hd44780<B, P, D>
where
    B: DataBus,
    P: OutputPin,
    D: Delay,
{
    fn show(&mut self, text: &str) {
        if self.ready {
            self.write_str(text);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lcd::bus::{EightBitBus, FourBitBus};
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::vec::Vec;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Line {
        Rs,
        Rw,
        En,
        D(u8),
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Event {
        Pin(Line, bool),
        DelayUs(u32),
    }

    type Log = Rc<RefCell<Vec<Event>>>;

    struct RecPin {
        line: Line,
        high: bool,
        log: Log,
    }

    impl OutputPin for RecPin {
        fn set_high(&mut self) {
            self.high = true;
            self.log.borrow_mut().push(Event::Pin(self.line, true));
        }

        fn set_low(&mut self) {
            self.high = false;
            self.log.borrow_mut().push(Event::Pin(self.line, false));
        }

        fn is_set_high(&self) -> bool {
            self.high
        }
    }

    struct RecDelay {
        log: Log,
    }

    impl Delay for RecDelay {
        fn delay_us(&mut self, us: u32) {
            self.log.borrow_mut().push(Event::DelayUs(us));
        }

        fn delay_ms(&mut self, ms: u32) {
            self.delay_us(ms * 1_000);
        }
    }

    fn pin(line: Line, log: &Log) -> RecPin {
        RecPin {
            line,
            high: false,
            log: log.clone(),
        }
    }

    fn control(log: &Log) -> Control<RecPin> {
        Control::new(pin(Line::Rs, log), pin(Line::Rw, log), pin(Line::En, log))
    }

    fn four_bit(geometry: DisplayGeometry) -> (Hd44780<FourBitBus<RecPin>, RecPin, RecDelay>, Log) {
        let log: Log = Rc::default();
        let bus = FourBitBus::new(
            pin(Line::D(4), &log),
            pin(Line::D(5), &log),
            pin(Line::D(6), &log),
            pin(Line::D(7), &log),
        );
        let lcd = Hd44780::new(bus, control(&log), RecDelay { log: log.clone() }, geometry);
        log.borrow_mut().clear();
        (lcd, log)
    }

    fn eight_bit() -> (Hd44780<EightBitBus<RecPin>, RecPin, RecDelay>, Log) {
        let log: Log = Rc::default();
        let bus = EightBitBus::new(core::array::from_fn(|i| pin(Line::D(i as u8), &log)));
        let lcd = Hd44780::new(
            bus,
            control(&log),
            RecDelay { log: log.clone() },
            DisplayGeometry::EIGHT_BY_TWO,
        );
        log.borrow_mut().clear();
        (lcd, log)
    }

    /// One enable strobe as the controller latches it
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    struct Latch {
        rs: bool,
        /// D0..D7 levels
        data: u8,
        /// Delay after the strobe's recovery time
        settle_us: u32,
    }

    /// Replay the log and return every latched transfer
    ///
    /// Also checks that RS, RW and data are stable while EN is high.
    fn latches(log: &Log) -> Vec<Latch> {
        let mut rs = false;
        let mut rw = false;
        let mut en = false;
        let mut data = 0u8;
        let mut out: Vec<Latch> = Vec::new();
        let mut after_strobe = false;

        for event in log.borrow().iter() {
            match *event {
                Event::Pin(Line::En, high) => {
                    if en && !high {
                        assert!(!rw, "RW must be low for writes");
                        out.push(Latch {
                            rs,
                            data,
                            settle_us: 0,
                        });
                        after_strobe = false;
                    }
                    en = high;
                }
                Event::Pin(line, high) => {
                    assert!(!en, "{:?} changed while EN was high", line);
                    match line {
                        Line::Rs => rs = high,
                        Line::Rw => rw = high,
                        Line::D(bit) => {
                            if high {
                                data |= 1 << bit;
                            } else {
                                data &= !(1 << bit);
                            }
                        }
                        Line::En => unreachable!(),
                    }
                }
                // Pulse width, not a settle time
                Event::DelayUs(_) if en => {}
                Event::DelayUs(us) => {
                    if let Some(last) = out.last_mut() {
                        // First delay after the strobe is the recovery time
                        if after_strobe {
                            last.settle_us += us;
                        }
                        after_strobe = true;
                    }
                }
            }
        }
        out
    }

    /// Combine 4-wire nibble latches into (rs, byte, settle) triples
    fn bytes(latches: &[Latch]) -> Vec<(bool, u8, u32)> {
        latches
            .chunks(2)
            .map(|pair| {
                assert_eq!(pair[0].rs, pair[1].rs);
                let byte = (pair[0].data & 0xF0) | (pair[1].data >> 4);
                (pair[0].rs, byte, pair[1].settle_us)
            })
            .collect()
    }

    fn text(bytes: &[(bool, u8, u32)]) -> std::string::String {
        bytes
            .iter()
            .filter(|(rs, _, _)| *rs)
            .map(|(_, b, _)| *b as char)
            .collect()
    }

    #[test]
    fn test_row_try_from() {
        assert_eq!(Row::try_from(0), Ok(Row::First));
        assert_eq!(Row::try_from(1), Ok(Row::Second));
        assert_eq!(Row::try_from(2), Err(LcdError::InvalidRow(2)));
    }

    #[test]
    fn test_nibble_framing() {
        let (mut lcd, log) = four_bit(DisplayGeometry::EIGHT_BY_TWO);
        lcd.write_nibble(Register::Data, 0b1010);

        let events = log.borrow().clone();
        let en_high = events
            .iter()
            .position(|e| *e == Event::Pin(Line::En, true))
            .unwrap();

        // EN low first, then RS, RW, D4..D7, then EN high
        assert_eq!(events[0], Event::Pin(Line::En, false));
        assert_eq!(events[1], Event::Pin(Line::Rs, true));
        assert_eq!(events[2], Event::Pin(Line::Rw, false));
        assert_eq!(en_high, 7);
        assert_eq!(events[8], Event::DelayUs(PULSE_DELAY_US));
        assert_eq!(events[9], Event::Pin(Line::En, false));
        assert_eq!(events[10], Event::DelayUs(PULSE_DELAY_US));

        let l = latches(&log);
        assert_eq!(l.len(), 1);
        assert!(l[0].rs);
        assert_eq!(l[0].data >> 4, 0b1010);
    }

    #[test]
    fn test_byte_is_high_nibble_first() {
        let (mut lcd, log) = four_bit(DisplayGeometry::EIGHT_BY_TWO);
        lcd.write_byte(Register::Instruction, 0xA5);

        let l = latches(&log);
        assert_eq!(l.len(), 2);
        assert_eq!(l[0].data >> 4, 0xA);
        assert_eq!(l[1].data >> 4, 0x5);
        assert!(!l[0].rs && !l[1].rs);
    }

    #[test]
    fn test_initialize_sequence_four_bit() {
        let (mut lcd, log) = four_bit(DisplayGeometry::EIGHT_BY_TWO);
        assert!(!lcd.is_ready());
        lcd.initialize(Lines::Two, Font::FiveByEight);
        assert!(lcd.is_ready());

        // Power-on wait comes before any strobe
        assert_eq!(log.borrow()[0], Event::DelayUs(POWER_ON_DELAY_MS * 1_000));

        let l = latches(&log);
        let priming: Vec<(u8, u32)> = l[..4].iter().map(|x| (x.data >> 4, x.settle_us)).collect();
        assert_eq!(priming, [(0x3, 4_500), (0x3, 150), (0x3, 50), (0x2, 50)]);

        let commands = bytes(&l[4..]);
        assert_eq!(
            commands,
            [
                (false, 0x28, EXECUTION_DELAY_US),
                (false, CLEAR_DISPLAY, CLEAR_DELAY_MS * 1_000),
                (false, 0x0C, EXECUTION_DELAY_US),
                (false, 0x06, EXECUTION_DELAY_US),
            ]
        );
    }

    #[test]
    fn test_initialize_sequence_eight_bit() {
        let (mut lcd, log) = eight_bit();
        lcd.initialize(Lines::Two, Font::FiveByEight);

        let l = latches(&log);
        let data: Vec<u8> = l.iter().map(|x| x.data).collect();
        assert_eq!(data, [0x30, 0x30, 0x30, 0x30, 0x38, 0x01, 0x0C, 0x06]);
    }

    #[test]
    fn test_clear_waits_longer_than_other_commands() {
        let (mut lcd, log) = four_bit(DisplayGeometry::EIGHT_BY_TWO);
        lcd.clear();
        lcd.display_control(DisplayControl::ON);
        lcd.shift(ShiftTarget::Display, ShiftDirection::Right);

        let b = bytes(&latches(&log));
        assert_eq!(b[0], (false, 0x01, 5_000));
        assert_eq!(b[1], (false, 0x0C, 50));
        assert_eq!(b[2], (false, 0x1C, 50));
        assert!(b[0].2 > b[1].2);
    }

    #[test]
    fn test_set_cursor_addresses() {
        let (mut lcd, log) = four_bit(DisplayGeometry::EIGHT_BY_TWO);
        lcd.set_cursor(Row::First, 3);
        lcd.set_cursor(Row::Second, 0);
        // No bounds check on the column
        lcd.set_cursor(Row::Second, 20);

        let b = bytes(&latches(&log));
        let addrs: Vec<u8> = b.iter().map(|x| x.1).collect();
        assert_eq!(addrs, [0x83, 0xC0, 0xD4]);
        assert!(b.iter().all(|x| x.2 == EXECUTION_DELAY_US));
    }

    #[test]
    fn test_write_str_splits_rows() {
        let (mut lcd, log) = four_bit(DisplayGeometry::EIGHT_BY_TWO);
        lcd.write_str("Timer: 0.00s");

        let b = bytes(&latches(&log));
        assert_eq!(b[0], (false, CLEAR_DISPLAY, 5_000));
        assert_eq!(text(&b[1..9]), "Timer: 0");
        assert_eq!(b[9], (false, 0xC0, EXECUTION_DELAY_US));
        assert_eq!(text(&b[10..]), ".00s");
        assert_eq!(b.len(), 14);
    }

    #[test]
    fn test_write_str_short_text_still_moves_cursor() {
        let (mut lcd, log) = four_bit(DisplayGeometry::EIGHT_BY_TWO);
        lcd.write_str("Hi");

        let b = bytes(&latches(&log));
        assert_eq!(text(&b), "Hi");
        assert_eq!(b.last().map(|x| x.1), Some(0xC0));
    }

    #[test]
    fn test_write_str_truncates_at_capacity() {
        let (mut lcd, log) = four_bit(DisplayGeometry::EIGHT_BY_TWO);
        lcd.write_str("0123456789ABCDEFGHIJ");

        let b = bytes(&latches(&log));
        assert_eq!(text(&b), "0123456789ABCDEF");
    }

    #[test]
    fn test_write_str_single_row() {
        let (mut lcd, log) = four_bit(DisplayGeometry { cols: 4, rows: 1 });
        lcd.write_str("abcdefgh");

        let b = bytes(&latches(&log));
        assert_eq!(text(&b), "abcd");
        assert!(b.iter().all(|x| x.1 != 0xC0 || x.0));
    }

    #[test]
    fn test_non_ascii_replaced() {
        let (mut lcd, log) = four_bit(DisplayGeometry::EIGHT_BY_TWO);
        lcd.write_char('µ');
        lcd.write_char('\n');
        lcd.write_char('s');

        assert_eq!(text(&bytes(&latches(&log))), "??s");
    }

    #[test]
    fn test_show_requires_initialize() {
        let (mut lcd, log) = four_bit(DisplayGeometry::EIGHT_BY_TWO);
        lcd.show("Timer: 0.00s");
        assert!(log.borrow().is_empty());

        lcd.initialize(Lines::Two, Font::FiveByEight);
        log.borrow_mut().clear();
        quartz_core::render(&mut lcd, quartz_core::ElapsedTime::from_micros(12_340_000));
        assert_eq!(text(&bytes(&latches(&log))), "Timer: 12.34s");
    }

    #[test]
    fn test_eight_bit_byte_is_single_strobe() {
        let (mut lcd, log) = eight_bit();
        lcd.write_byte(Register::Data, b'T');

        let l = latches(&log);
        assert_eq!(l.len(), 1);
        assert_eq!(l[0].data, b'T');
        assert!(l[0].rs);
    }
}
