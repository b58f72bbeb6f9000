//! Text display trait
//!
//! Anything that can show a short line of text: the character LCD on
//! hardware, a capture buffer in tests.

/// Text sink for rendered stopwatch values
pub trait TextDisplay {
    /// Replace the visible text with `text`
    ///
    /// Text longer than the display is truncated by the implementation.
    fn show(&mut self, text: &str);
}

impl<T: TextDisplay + ?Sized> TextDisplay for &mut T {
    fn show(&mut self, text: &str) {
        (**self).show(text)
    }
}
