//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in quartz-core:
//!
//! - HD44780-compatible character LCD (4-wire and 8-wire framing)

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod lcd;

pub use lcd::{Hd44780, LcdError, Row};
