//! Quartz Hardware Abstraction Layer
//!
//! This crate defines the hardware abstraction traits the stopwatch logic
//! and the display driver are written against. A board crate implements
//! them once; everything above stays hardware-agnostic.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Application (quartz-firmware)          │
//! └─────────────────────────────────────────┘
//!           │                     │
//!           ▼                     ▼
//! ┌──────────────────┐  ┌──────────────────┐
//! │   quartz-core    │  │  quartz-drivers  │
//! └──────────────────┘  └──────────────────┘
//!           │                     │
//!           ▼                     ▼
//! ┌─────────────────────────────────────────┐
//! │  quartz-hal (this crate - traits)       │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//!             ┌───────────────┐
//!             │  quartz-hal-  │
//!             │    rp2040     │
//!             └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::OutputPin`], [`gpio::InputPin`], [`gpio::ConfigurablePin`] - Digital I/O
//! - [`delay::Delay`] - Busy-wait delays
//! - [`timer::OverflowTimer`] - Free-running counter with overflow flag
//! - [`exti::EdgeInterrupt`] - Edge-triggered input interrupt configuration
//!
//! [`embedded::EhDelay`] lifts any `embedded-hal` 1.0 delay into [`delay::Delay`].

#![no_std]
#![deny(unsafe_code)]

pub mod delay;
pub mod embedded;
pub mod exti;
pub mod gpio;
pub mod timer;

// Re-export key traits at crate root for convenience
pub use delay::Delay;
pub use exti::{Edge, EdgeInterrupt, LatchedEdge, Priority};
pub use gpio::{ConfigurablePin, InputPin, OutputPin, PinMode};
pub use timer::OverflowTimer;
