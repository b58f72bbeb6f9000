//! Display formatter
//!
//! Renders elapsed time as `Timer: <seconds>.<hundredths>s`. The buffer
//! holds 16 characters, which is exactly the largest value shown:
//! `Timer: 99999.99s`. Longer runs saturate there.

use core::fmt::Write;

use heapless::String;

use crate::timebase::ElapsedTime;
use crate::traits::TextDisplay;

/// Formatted display line
pub type TimerText = String<16>;

/// Prefix before the number
pub const PREFIX: &str = "Timer: ";

/// Largest value shown, in centiseconds (99999.99 s)
pub const MAX_CENTISECONDS: u64 = 9_999_999;

/// Format elapsed time, rounded to the nearest hundredth
pub fn format_elapsed(elapsed: ElapsedTime) -> TimerText {
    let cs = elapsed.centiseconds().min(MAX_CENTISECONDS);
    let mut text = TimerText::new();

    // Cannot fail: the saturated value fits the buffer exactly
    let _ = write!(text, "{}{}.{:02}s", PREFIX, cs / 100, cs % 100);
    text
}

/// Format `elapsed` and push it to `display`
pub fn render<D: TextDisplay + ?Sized>(display: &mut D, elapsed: ElapsedTime) {
    let text = format_elapsed(elapsed);
    display.show(text.as_str());
}
