//! Stopwatch configuration structures

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::controller::DebounceConfig;
use crate::timebase::Timebase;

/// Configuration validation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Oscillator frequency is zero
    ZeroClock,
    /// Prescaler or cycles-per-tick is zero
    ZeroPrescale,
    /// Counter width outside 1..=32 bits
    CounterWidth,
    /// Overflow interval is not a whole number of microseconds
    InexactInterval,
    /// Display has no rows or no columns
    EmptyDisplay,
    /// Display has more rows than the controller addresses
    TooManyRows,
    /// Debounce window is empty or shorter than the stability requirement
    DebounceWindow,
}

/// Which pin level means "pressed"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ButtonPolarity {
    /// Pressed pulls the pin low (pull-up wiring)
    #[default]
    ActiveLow,
    /// Pressed pulls the pin high (pull-down wiring)
    ActiveHigh,
}

impl ButtonPolarity {
    /// Check whether a raw pin level is the released level
    pub fn is_released(self, pin_high: bool) -> bool {
        match self {
            ButtonPolarity::ActiveLow => pin_high,
            ButtonPolarity::ActiveHigh => !pin_high,
        }
    }
}

/// Character display geometry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DisplayGeometry {
    /// Characters per row
    pub cols: u8,
    /// Number of rows (1 or 2)
    pub rows: u8,
}

impl DisplayGeometry {
    /// 16x1 module addressed as 8x2
    pub const EIGHT_BY_TWO: Self = Self { cols: 8, rows: 2 };

    /// Total characters the display shows at once
    pub const fn capacity(&self) -> usize {
        self.cols as usize * self.rows as usize
    }
}

impl Default for DisplayGeometry {
    fn default() -> Self {
        Self::EIGHT_BY_TWO
    }
}

/// Complete stopwatch configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct StopwatchConfig {
    /// Overflow counter clock tree
    pub timebase: Timebase,
    /// Button release debounce
    pub debounce: DebounceConfig,
    /// Display geometry
    pub display: DisplayGeometry,
    /// Button wiring
    pub polarity: ButtonPolarity,
}

impl StopwatchConfig {
    /// Validate every section, returning the first problem found
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.timebase.validate()?;
        self.debounce.validate()?;

        if self.display.cols == 0 || self.display.rows == 0 {
            return Err(ConfigError::EmptyDisplay);
        }
        if self.display.rows > 2 {
            return Err(ConfigError::TooManyRows);
        }

        Ok(())
    }
}
