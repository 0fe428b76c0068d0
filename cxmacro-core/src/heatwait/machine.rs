//! Heat-wait state machine
//!
//! One heat wait moves through these phases. `Reached` and `Aborted` end
//! the invocation; the next request starts again from `Idle`.

/// Why a heat wait ended without reaching the target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AbortReason {
    /// The heater owner asserted abort on the signal
    Requested,
    /// The configured wait bound expired
    ///
    /// Only occurs when `heat_timeout_ms` is set; without it a wait has
    /// no bound.
    TimedOut,
}

impl AbortReason {
    /// Short operator-facing description
    pub fn as_str(self) -> &'static str {
        match self {
            AbortReason::Requested => "aborted",
            AbortReason::TimedOut => "timed out",
        }
    }
}

/// Heat-wait phases
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum WaitPhase {
    /// No wait in progress
    Idle,
    /// Heating requested, not yet observing the signal
    Requested,
    /// Suspended on the signal
    Waiting,
    /// Target reached and signal consumed
    Reached,
    /// Wait ended without the target
    Aborted(AbortReason),
}

/// Events that drive the heat-wait phases
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum WaitEvent {
    /// Heating request issued to the heater owner
    HeatRequested,
    /// Started observing the signal
    WaitStarted,
    /// Signal read `Reached`
    TargetReached,
    /// Signal read `AbortRequested`
    AbortObserved,
    /// Wait bound expired
    TimedOut,
    /// Return to idle
    Reset,
}

impl WaitPhase {
    /// Check if this phase ends an invocation
    pub fn is_terminal(&self) -> bool {
        matches!(self, WaitPhase::Reached | WaitPhase::Aborted(_))
    }

    /// Process an event and return the next phase
    ///
    /// Events that make no sense in the current phase leave it unchanged.
    pub fn transition(self, event: WaitEvent) -> Self {
        use WaitEvent::*;
        use WaitPhase::*;

        match (self, event) {
            (_, Reset) => Idle,

            (Idle, HeatRequested) => Requested,

            (Requested, WaitStarted) => Waiting,

            (Waiting, TargetReached) => Reached,
            (Waiting, AbortObserved) => Aborted(AbortReason::Requested),
            (Waiting, TimedOut) => Aborted(AbortReason::TimedOut),

            (state, _) => state,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reached_path() {
        let phase = WaitPhase::Idle
            .transition(WaitEvent::HeatRequested)
            .transition(WaitEvent::WaitStarted);
        assert_eq!(phase, WaitPhase::Waiting);

        let phase = phase.transition(WaitEvent::TargetReached);
        assert_eq!(phase, WaitPhase::Reached);
        assert!(phase.is_terminal());
    }

    #[test]
    fn test_abort_path() {
        let phase = WaitPhase::Waiting.transition(WaitEvent::AbortObserved);
        assert_eq!(phase, WaitPhase::Aborted(AbortReason::Requested));
        assert!(phase.is_terminal());
    }

    #[test]
    fn test_timeout_path() {
        let phase = WaitPhase::Waiting.transition(WaitEvent::TimedOut);
        assert_eq!(phase, WaitPhase::Aborted(AbortReason::TimedOut));
    }

    #[test]
    fn test_invalid_events_ignored() {
        assert_eq!(
            WaitPhase::Idle.transition(WaitEvent::TargetReached),
            WaitPhase::Idle
        );
        assert_eq!(
            WaitPhase::Requested.transition(WaitEvent::AbortObserved),
            WaitPhase::Requested
        );
        assert_eq!(
            WaitPhase::Reached.transition(WaitEvent::AbortObserved),
            WaitPhase::Reached
        );
    }

    #[test]
    fn test_terminal_needs_reset_before_request() {
        let phase = WaitPhase::Aborted(AbortReason::Requested);
        assert_eq!(phase.transition(WaitEvent::HeatRequested), phase);

        let phase = phase.transition(WaitEvent::Reset);
        assert_eq!(phase, WaitPhase::Idle);
        assert!(!phase.is_terminal());
        assert_eq!(
            phase.transition(WaitEvent::HeatRequested),
            WaitPhase::Requested
        );
    }
}
