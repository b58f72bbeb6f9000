//! Configuration types
//!
//! Board-agnostic configuration for the stopwatch. The firmware fills these
//! from its build-time validated board file.

pub mod types;

pub use types::*;
