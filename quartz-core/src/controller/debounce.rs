//! Bounded button-release debounce
//!
//! After a press edge the handler samples the raw pin at a fixed interval
//! and waits for a run of consecutive released readings. If the button is
//! held past the sampling window the handler gives up and returns, so no
//! priority level is blocked for longer than the window.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use quartz_hal::{Delay, InputPin};

use crate::config::{ButtonPolarity, ConfigError};

/// Debounce timing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DebounceConfig {
    /// Time between samples in microseconds
    pub sample_interval_us: u32,
    /// Consecutive released samples required
    pub stable_samples: u8,
    /// Samples taken before giving up
    pub max_samples: u16,
}

impl Default for DebounceConfig {
    fn default() -> Self {
        Self {
            sample_interval_us: 1_000,
            stable_samples: 20, // 20 ms of clean release
            max_samples: 2_000, // 2 s worst-case block
        }
    }
}

impl DebounceConfig {
    /// Longest time a handler can spend debouncing, in microseconds
    pub fn window_us(&self) -> u64 {
        u64::from(self.sample_interval_us) * u64::from(self.max_samples)
    }

    /// Check the window can ever be satisfied
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.sample_interval_us == 0
            || self.stable_samples == 0
            || self.max_samples < u16::from(self.stable_samples)
        {
            return Err(ConfigError::DebounceWindow);
        }
        Ok(())
    }
}

/// How a debounce wait ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DebounceOutcome {
    /// Button settled in the released state
    Released {
        /// Samples taken before settling
        samples: u16,
    },
    /// Window expired with the button still pressed or bouncing
    TimedOut,
}

/// Release-detection state machine
#[derive(Debug, Clone)]
pub struct Debouncer {
    config: DebounceConfig,
    /// Consecutive released samples seen so far
    stable: u8,
    /// Total samples taken
    taken: u16,
}

impl Debouncer {
    /// Create a debouncer for one press
    pub fn new(config: DebounceConfig) -> Self {
        Self {
            config,
            stable: 0,
            taken: 0,
        }
    }

    /// Feed one sample
    ///
    /// Returns `Some` once the outcome is decided.
    pub fn feed(&mut self, released: bool) -> Option<DebounceOutcome> {
        self.taken = self.taken.saturating_add(1);

        if released {
            self.stable = self.stable.saturating_add(1);
        } else {
            self.stable = 0;
        }

        if self.stable >= self.config.stable_samples {
            return Some(DebounceOutcome::Released {
                samples: self.taken,
            });
        }
        if self.taken >= self.config.max_samples {
            return Some(DebounceOutcome::TimedOut);
        }
        None
    }

    /// Samples taken so far
    pub fn samples(&self) -> u16 {
        self.taken
    }
}

/// Sample `pin` until it settles released or the window runs out
pub fn wait_for_release<P, D>(
    pin: &P,
    polarity: ButtonPolarity,
    config: DebounceConfig,
    delay: &mut D,
) -> DebounceOutcome
where
    P: InputPin + ?Sized,
    D: Delay + ?Sized,
{
    let mut debouncer = Debouncer::new(config);

    loop {
        if let Some(outcome) = debouncer.feed(polarity.is_released(pin.is_high())) {
            return outcome;
        }
        delay.delay_us(config.sample_interval_us);
    }
}
