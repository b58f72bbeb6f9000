//! Edge-triggered input interrupts
//!
//! Each button is wired to an input that latches a pending flag on the
//! configured edge. The flag is consumed and cleared by the handler that
//! owns the button.

/// Preemption level a handler is dispatched at
///
/// `High` always preempts `Low` and the idle loop; `Low` never preempts `High`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Priority {
    /// Low preemption priority
    Low,
    /// High preemption priority
    High,
}

/// Signal edge that latches the interrupt flag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Edge {
    /// Low-to-high transition
    Rising,
    /// High-to-low transition
    Falling,
}

/// Edge interrupt source
pub trait EdgeInterrupt {
    /// Enable the interrupt
    fn enable(&mut self);

    /// Disable the interrupt (flag may still latch)
    fn disable(&mut self);

    /// Check whether the interrupt is enabled
    fn is_enabled(&self) -> bool;

    /// Check the latched edge flag
    fn is_pending(&self) -> bool;

    /// Clear the latched edge flag
    fn clear_pending(&mut self);

    /// Set the preemption level
    fn set_priority(&mut self, priority: Priority);

    /// Current preemption level
    fn priority(&self) -> Priority;

    /// Select which edge latches the flag
    fn set_edge(&mut self, edge: Edge);

    /// Currently selected edge
    fn edge(&self) -> Edge;

    /// Check whether the flag is latched and the interrupt enabled
    fn fired(&self) -> bool {
        self.is_enabled() && self.is_pending()
    }
}

/// Software edge latch
///
/// For boards whose GPIO driver reports edges as events rather than a
/// readable flag: the board code calls [`LatchedEdge::latch`] when it
/// observes a transition and the handler consumes the flag as usual.
/// The flag latches even while disabled, as a hardware flag does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LatchedEdge {
    enabled: bool,
    pending: bool,
    priority: Priority,
    edge: Edge,
}

impl LatchedEdge {
    /// Create a disabled latch with no pending flag
    pub const fn new(edge: Edge, priority: Priority) -> Self {
        Self {
            enabled: false,
            pending: false,
            priority,
            edge,
        }
    }

    /// Record an observed transition
    ///
    /// Only transitions matching the selected edge set the flag.
    pub fn latch(&mut self, observed: Edge) {
        if observed == self.edge {
            self.pending = true;
        }
    }
}

impl EdgeInterrupt for LatchedEdge {
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
