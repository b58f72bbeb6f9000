//! Start/stop and reset service routines
//!
//! The controller owns no hardware. Each call is handed the edge source,
//! the raw pin behind it and a delay for debounce sampling, so the same
//! routine runs from an interrupt handler on hardware and from a plain
//! function call in tests.

use quartz_hal::{Delay, EdgeInterrupt, InputPin, OverflowTimer};

use crate::config::ButtonPolarity;
use crate::engine::{RunState, Stopwatch};
use crate::timebase::ElapsedTime;

use super::debounce::{wait_for_release, DebounceConfig, DebounceOutcome};

/// What one high-priority invocation did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct HighPriorityReport {
    /// New run state, if the start/stop edge was serviced
    pub toggled: Option<RunState>,
    /// How the start/stop debounce ended
    pub debounce: Option<DebounceOutcome>,
    /// Value to push to the display, if an overflow advanced the time
    pub render: Option<ElapsedTime>,
}

/// What one low-priority invocation did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LowPriorityReport {
    /// How the reset debounce ended
    pub debounce: Option<DebounceOutcome>,
    /// Value to push to the display (zero after a reset)
    pub render: Option<ElapsedTime>,
}

/// Button-edge controller bound to a shared stopwatch
pub struct ButtonController<'a, T> {
    stopwatch: &'a Stopwatch<T>,
    debounce: DebounceConfig,
    polarity: ButtonPolarity,
}

impl<'a, T: OverflowTimer> ButtonController<'a, T> {
    /// Create a controller
    pub fn new(
        stopwatch: &'a Stopwatch<T>,
        debounce: DebounceConfig,
        polarity: ButtonPolarity,
    ) -> Self {
        Self {
            stopwatch,
            debounce,
            polarity,
        }
    }

    /// Shared stopwatch this controller drives
    pub fn stopwatch(&self) -> &'a Stopwatch<T> {
        self.stopwatch
    }

    /// High-priority handler: start/stop edge, then overflow
    ///
    /// Both sources are checked in one invocation. The edge flag is
    /// cleared only after the button has been released (or the debounce
    /// window ran out), so a held button does not re-trigger.
    pub fn service_high_priority<E, P, D>(
        &self,
        edge: &mut E,
        pin: &P,
        delay: &mut D,
    ) -> HighPriorityReport
    where
        E: EdgeInterrupt + ?Sized,
        P: InputPin + ?Sized,
        D: Delay + ?Sized,
    {
        let mut report = HighPriorityReport::default();

        if edge.fired() {
            report.toggled = Some(self.stopwatch.toggle());
            report.debounce = Some(wait_for_release(pin, self.polarity, self.debounce, delay));
            edge.clear_pending();
        }

        report.render = self.service_overflow();
        report
    }

    /// Overflow half of the high-priority handler on its own
    ///
    /// For boards that watch the start/stop edge and the overflow flag
    /// from separate tasks at the same priority.
    pub fn service_overflow(&self) -> Option<ElapsedTime> {
        self.stopwatch.service_overflow()
    }

    /// Low-priority handler: reset edge
    ///
    /// The running flag is left as it is. A reset while running keeps
    /// counting from zero. As on the high-priority side, the edge flag is
    /// cleared only once the debounce has finished.
    pub fn service_low_priority<E, P, D>(
        &self,
        edge: &mut E,
        pin: &P,
        delay: &mut D,
    ) -> LowPriorityReport
    where
        E: EdgeInterrupt + ?Sized,
        P: InputPin + ?Sized,
        D: Delay + ?Sized,
    {
        if !edge.fired() {
            return LowPriorityReport::default();
        }

        let zero = self.stopwatch.reset();
        let outcome = wait_for_release(pin, self.polarity, self.debounce, delay);
        edge.clear_pending();

        LowPriorityReport {
            debounce: Some(outcome),
            render: Some(zero),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::shared::tests::MockTimer;
    use crate::format::format_elapsed;
    use crate::timebase::PIC18_INTERVAL;
    use quartz_hal::{Edge, Priority};
    use std::cell::RefCell;
    use std::vec::Vec;

    struct MockEdge {
        enabled: bool,
        pending: bool,
        priority: Priority,
        edge: Edge,
    }

    impl MockEdge {
        fn new(priority: Priority) -> Self {
            Self {
                enabled: true,
                pending: false,
                priority,
                edge: Edge::Falling,
            }
        }
    }

    impl EdgeInterrupt for MockEdge {
        fn enable(&mut self) {
            self.enabled = true;
        }

        fn disable(&mut self) {
            self.enabled = false;
        }

        fn is_enabled(&self) -> bool {
            self.enabled
        }

        fn is_pending(&self) -> bool {
            self.pending
        }

        fn clear_pending(&mut self) {
            self.pending = false;
        }

        fn set_priority(&mut self, priority: Priority) {
            self.priority = priority;
        }

        fn priority(&self) -> Priority {
            self.priority
        }

        fn set_edge(&mut self, edge: Edge) {
            self.edge = edge;
        }

        fn edge(&self) -> Edge {
            self.edge
        }
    }

    /// Pin that always reads released (active-low, so high)
    struct ReleasedPin;

    impl InputPin for ReleasedPin {
        fn is_high(&self) -> bool {
            true
        }
    }

    /// Pin stuck pressed
    struct HeldPin;

    impl InputPin for HeldPin {
        fn is_high(&self) -> bool {
            false
        }
    }

    struct NoDelay;

    impl Delay for NoDelay {
        fn delay_us(&mut self, _us: u32) {}
    }

    fn stopwatch() -> Stopwatch<MockTimer> {
        Stopwatch::new(MockTimer::default(), PIC18_INTERVAL)
    }

    fn controller(sw: &Stopwatch<MockTimer>) -> ButtonController<'_, MockTimer> {
        ButtonController::new(sw, DebounceConfig::default(), ButtonPolarity::ActiveLow)
    }

    fn overflow(sw: &Stopwatch<MockTimer>) {
        sw.with_timer(|t| t.pending = true);
    }

    #[test]
    fn test_start_then_overflows_accumulate() {
        let sw = stopwatch();
        let ctl = controller(&sw);
        let mut edge = MockEdge::new(Priority::High);

        edge.pending = true;
        let report = ctl.service_high_priority(&mut edge, &ReleasedPin, &mut NoDelay);
        assert_eq!(report.toggled, Some(RunState::Running));
        assert!(matches!(
            report.debounce,
            Some(DebounceOutcome::Released { .. })
        ));
        assert!(!edge.pending);

        for n in 1..=3u64 {
            overflow(&sw);
            let report = ctl.service_high_priority(&mut edge, &ReleasedPin, &mut NoDelay);
            assert_eq!(report.toggled, None);
            assert_eq!(
                report.render,
                Some(ElapsedTime::from_micros(n * PIC18_INTERVAL.as_micros()))
            );
        }
    }

    #[test]
    fn test_overflow_while_stopped_is_ignored() {
        let sw = stopwatch();
        let ctl = controller(&sw);
        let mut edge = MockEdge::new(Priority::High);

        overflow(&sw);
        let report = ctl.service_high_priority(&mut edge, &ReleasedPin, &mut NoDelay);
        assert_eq!(report, HighPriorityReport::default());
        assert!(sw.snapshot().elapsed.is_zero());
    }

    #[test]
    fn test_stale_overflow_does_not_fire_on_start() {
        let sw = stopwatch();
        let ctl = controller(&sw);
        let mut edge = MockEdge::new(Priority::High);

        overflow(&sw);
        edge.pending = true;
        let report = ctl.service_high_priority(&mut edge, &ReleasedPin, &mut NoDelay);
        assert_eq!(report.toggled, Some(RunState::Running));
        assert_eq!(report.render, None);
    }

    #[test]
    fn test_even_presses_return_to_stopped() {
        let sw = stopwatch();
        let ctl = controller(&sw);
        let mut edge = MockEdge::new(Priority::High);

        for _ in 0..4 {
            edge.pending = true;
            ctl.service_high_priority(&mut edge, &ReleasedPin, &mut NoDelay);
        }
        assert_eq!(sw.snapshot().state, RunState::Stopped);
    }

    #[test]
    fn test_disabled_edge_is_ignored() {
        let sw = stopwatch();
        let ctl = controller(&sw);
        let mut edge = MockEdge::new(Priority::High);

        edge.disable();
        edge.pending = true;
        let report = ctl.service_high_priority(&mut edge, &ReleasedPin, &mut NoDelay);
        assert_eq!(report.toggled, None);
        assert_eq!(sw.snapshot().state, RunState::Stopped);

        let mut reset = MockEdge::new(Priority::Low);
        reset.disable();
        reset.pending = true;
        assert_eq!(
            ctl.service_low_priority(&mut reset, &ReleasedPin, &mut NoDelay),
            LowPriorityReport::default()
        );
    }

    #[test]
    fn test_held_button_times_out_and_clears_edge() {
        let sw = stopwatch();
        let ctl = controller(&sw);
        let mut edge = MockEdge::new(Priority::High);

        edge.pending = true;
        let report = ctl.service_high_priority(&mut edge, &HeldPin, &mut NoDelay);
        assert_eq!(report.debounce, Some(DebounceOutcome::TimedOut));
        assert!(!edge.pending);
    }

    #[test]
    fn test_reset_from_running_shows_zero() {
        let sw = stopwatch();
        let ctl = controller(&sw);
        let mut start = MockEdge::new(Priority::High);
        let mut reset = MockEdge::new(Priority::Low);

        start.pending = true;
        ctl.service_high_priority(&mut start, &ReleasedPin, &mut NoDelay);
        for _ in 0..754 {
            overflow(&sw);
            ctl.service_high_priority(&mut start, &ReleasedPin, &mut NoDelay);
        }
        sw.with_timer(|t| t.counter = 0x42);
        // 754 * 16.384 ms = 12.353536 s
        assert_eq!(format_elapsed(sw.snapshot().elapsed).as_str(), "Timer: 12.35s");

        reset.pending = true;
        let report = ctl.service_low_priority(&mut reset, &ReleasedPin, &mut NoDelay);
        assert_eq!(report.render, Some(ElapsedTime::ZERO));
        assert!(!reset.pending);
        sw.with_timer(|t| assert_eq!(t.counter, 0));

        let text = format_elapsed(ElapsedTime::ZERO);
        assert_eq!(text.as_str(), "Timer: 0.00s");

        // Still running after reset
        overflow(&sw);
        let report = ctl.service_high_priority(&mut start, &ReleasedPin, &mut NoDelay);
        assert_eq!(report.render, Some(PIC18_INTERVAL));
    }

    /// Shared trace of pin samples and flag clears
    type Trace = RefCell<Vec<&'static str>>;

    struct TracedPin<'a> {
        trace: &'a Trace,
    }

    impl InputPin for TracedPin<'_> {
        fn is_high(&self) -> bool {
            self.trace.borrow_mut().push("sample");
            true
        }
    }

    struct TracedEdge<'a> {
        inner: MockEdge,
        trace: &'a Trace,
    }

    impl EdgeInterrupt for TracedEdge<'_> {
        fn enable(&mut self) {
            self.inner.enable();
        }

        fn disable(&mut self) {
            self.inner.disable();
        }

        fn is_enabled(&self) -> bool {
            self.inner.is_enabled()
        }

        fn is_pending(&self) -> bool {
            self.inner.is_pending()
        }

        fn clear_pending(&mut self) {
            self.trace.borrow_mut().push("clear");
            self.inner.clear_pending();
        }

        fn set_priority(&mut self, priority: Priority) {
            self.inner.set_priority(priority);
        }

        fn priority(&self) -> Priority {
            self.inner.priority()
        }

        fn set_edge(&mut self, edge: Edge) {
            self.inner.set_edge(edge);
        }

        fn edge(&self) -> Edge {
            self.inner.edge()
        }
    }

    #[test]
    fn test_both_handlers_clear_edge_after_debounce() {
        let sw = stopwatch();
        let ctl = controller(&sw);

        for priority in [Priority::High, Priority::Low] {
            let trace = Trace::default();
            let pin = TracedPin { trace: &trace };
            let mut edge = TracedEdge {
                inner: MockEdge::new(priority),
                trace: &trace,
            };
            edge.inner.pending = true;

            match priority {
                Priority::High => {
                    ctl.service_high_priority(&mut edge, &pin, &mut NoDelay);
                }
                Priority::Low => {
                    ctl.service_low_priority(&mut edge, &pin, &mut NoDelay);
                }
            }

            assert!(!edge.inner.pending);

            let events = trace.borrow().clone();
            let stable = usize::from(DebounceConfig::default().stable_samples);
            assert_eq!(events.len(), stable + 1);
            assert_eq!(events.last(), Some(&"clear"));
        }
    }

    #[test]
    fn test_service_overflow_alone() {
        let sw = stopwatch();
        let ctl = controller(&sw);
        let mut edge = MockEdge::new(Priority::High);

        assert_eq!(ctl.service_overflow(), None);

        edge.pending = true;
        ctl.service_high_priority(&mut edge, &ReleasedPin, &mut NoDelay);
        overflow(&sw);
        assert_eq!(ctl.service_overflow(), Some(PIC18_INTERVAL));
        assert_eq!(ctl.service_overflow(), None);
    }

    #[test]
    fn test_reset_while_stopped_stays_stopped() {
        let sw = stopwatch();
        let ctl = controller(&sw);
        let mut reset = MockEdge::new(Priority::Low);

        reset.pending = true;
        let report = ctl.service_low_priority(&mut reset, &ReleasedPin, &mut NoDelay);
        assert_eq!(report.render, Some(ElapsedTime::ZERO));
        assert_eq!(sw.snapshot().state, RunState::Stopped);
    }
}
