//! Overflow interval and elapsed-time representation
//!
//! A hardware counter of `counter_bits` width, clocked at
//! `clock_hz / (cycles_per_tick * prescale)`, overflows once every
//! `cycles_per_tick * prescale * 2^counter_bits / clock_hz` seconds.
//! Elapsed time is kept in whole microseconds so that N overflows add up to
//! exactly N intervals.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::config::ConfigError;

const MICROS_PER_SECOND: u64 = 1_000_000;

/// Clock tree feeding the overflow counter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Timebase {
    /// Oscillator frequency in Hz
    pub clock_hz: u32,
    /// Oscillator cycles per counter input cycle (4 on PIC18 Fosc/4)
    pub cycles_per_tick: u32,
    /// Prescaler ratio (256 for 1:256)
    pub prescale: u32,
    /// Counter width in bits
    pub counter_bits: u8,
}

impl Timebase {
    /// 16 MHz PIC18 Timer0: Fosc/4, 1:256 prescale, 8-bit mode (16.384 ms)
    pub const PIC18_TIMER0: Self = Self {
        clock_hz: 16_000_000,
        cycles_per_tick: 4,
        prescale: 256,
        counter_bits: 8,
    };

    /// 125 MHz RP2040 PWM slice: integer divider 250, 16-bit wrap (131.072 ms)
    pub const RP2040_PWM: Self = Self {
        clock_hz: 125_000_000,
        cycles_per_tick: 1,
        prescale: 250,
        counter_bits: 16,
    };

    /// Oscillator cycles per counter overflow, scaled to microseconds
    ///
    /// `None` if the counter is wider than 32 bits or the product overflows.
    const fn scaled_period(&self) -> Option<u64> {
        if self.counter_bits > 32 {
            return None;
        }
        let cycles = match (self.cycles_per_tick as u64).checked_mul(self.prescale as u64) {
            Some(c) => c,
            None => return None,
        };
        let cycles = match cycles.checked_mul(1u64 << self.counter_bits) {
            Some(c) => c,
            None => return None,
        };
        cycles.checked_mul(MICROS_PER_SECOND)
    }

    /// Check whether the overflow interval is a whole number of microseconds
    pub const fn is_exact(&self) -> bool {
        if self.clock_hz == 0 {
            return false;
        }
        match self.scaled_period() {
            Some(scaled) => scaled % self.clock_hz as u64 == 0,
            None => false,
        }
    }

    /// Overflow interval in microseconds (truncated if not exact, zero if invalid)
    pub const fn interval_us(&self) -> u64 {
        if self.clock_hz == 0 {
            return 0;
        }
        match self.scaled_period() {
            Some(scaled) => scaled / self.clock_hz as u64,
            None => 0,
        }
    }

    /// Overflow interval as an elapsed-time quantum
    pub const fn interval(&self) -> ElapsedTime {
        ElapsedTime::from_micros(self.interval_us())
    }

    /// Check the timebase describes real hardware
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.clock_hz == 0 {
            return Err(ConfigError::ZeroClock);
        }
        if self.cycles_per_tick == 0 || self.prescale == 0 {
            return Err(ConfigError::ZeroPrescale);
        }
        if self.counter_bits == 0 || self.counter_bits > 32 {
            return Err(ConfigError::CounterWidth);
        }
        if !self.is_exact() {
            return Err(ConfigError::InexactInterval);
        }
        Ok(())
    }
}

impl Default for Timebase {
    fn default() -> Self {
        Self::PIC18_TIMER0
    }
}

/// Compile-time overflow interval for the reference board
pub const PIC18_INTERVAL: ElapsedTime = Timebase::PIC18_TIMER0.interval();

/// Compile-time overflow interval for the RP2040 board
pub const RP2040_INTERVAL: ElapsedTime = Timebase::RP2040_PWM.interval();

const _: () = assert!(Timebase::PIC18_TIMER0.is_exact());
const _: () = assert!(Timebase::RP2040_PWM.is_exact());

/// Elapsed stopwatch time with microsecond resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ElapsedTime(u64);

impl ElapsedTime {
    /// Zero elapsed time
    pub const ZERO: Self = Self(0);

    /// Create from microseconds
    pub const fn from_micros(us: u64) -> Self {
        Self(us)
    }

    /// Create from whole seconds
    pub const fn from_secs(secs: u64) -> Self {
        Self(secs.saturating_mul(MICROS_PER_SECOND))
    }

    /// Total microseconds
    pub const fn as_micros(&self) -> u64 {
        self.0
    }

    /// Total hundredths of a second, rounded half-up
    pub const fn centiseconds(&self) -> u64 {
        self.0.saturating_add(5_000) / 10_000
    }

    /// Seconds as a float (for logging only)
    pub fn as_secs_f32(&self) -> f32 {
        self.0 as f32 / MICROS_PER_SECOND as f32
    }

    /// Check whether no time has elapsed
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Add, clamping at the representable maximum
    pub const fn saturating_add(self, rhs: Self) -> Self {
        Self(self.0.saturating_add(rhs.0))
    }

    /// Multiply by a count of intervals, clamping at the maximum
    pub const fn saturating_mul(self, n: u64) -> Self {
        Self(self.0.saturating_mul(n))
    }
}
