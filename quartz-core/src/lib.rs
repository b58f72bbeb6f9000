//! Board-agnostic core logic for the stopwatch firmware
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Timebase math (overflow interval as a compile-time constant)
//! - Elapsed-time engine and its critical-section guarded shared form
//! - Button-edge controller for the high and low priority handlers
//! - Bounded button debounce
//! - Display formatter
//! - Configuration type definitions

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod config;
pub mod controller;
pub mod engine;
pub mod format;
pub mod timebase;
pub mod traits;

pub use controller::{ButtonController, DebounceConfig, DebounceOutcome};
pub use engine::{ElapsedTimeEngine, RunState, Snapshot, Stopwatch};
pub use format::{format_elapsed, render, TimerText};
pub use timebase::{ElapsedTime, Timebase};
pub use traits::TextDisplay;
