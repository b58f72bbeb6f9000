//! Hardware abstraction traits used by the core logic

pub mod display;

pub use display::TextDisplay;
