//! Heat-wait coordinator
//!
//! Issues a heating request and suspends the calling macro until the heat
//! signal reports reached or abort. The suspension is an `await` on the
//! signal's notification; no lock on macro or heater state is held while
//! suspended, so the heater owner can update the signal at any time.

use core::future::pending;

use embassy_futures::select::{select, Either};
use embassy_sync::blocking_mutex::raw::RawMutex;
use embedded_hal_async::delay::DelayNs;

use crate::traits::{HeaterBus, HeaterError, HeaterId};

use super::machine::{AbortReason, WaitEvent, WaitPhase};
use super::signal::{HeatSignal, SignalState};

/// Result of one heat wait
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HeatOutcome {
    /// Target reached; the caller may continue
    Reached,
    /// Wait ended without the target; the caller must not continue
    Aborted(AbortReason),
}

/// Drives one heat wait at a time
#[derive(Debug, Clone)]
pub struct HeatWaitCoordinator {
    phase: WaitPhase,
    timeout_ms: Option<u32>,
}

impl HeatWaitCoordinator {
    /// Create a coordinator
    ///
    /// # Arguments
    /// - `timeout_ms`: Upper bound on a single wait, or None to wait until
    ///   the heater owner reports reached or abort
    pub const fn new(timeout_ms: Option<u32>) -> Self {
        Self {
            phase: WaitPhase::Idle,
            timeout_ms,
        }
    }

    /// Get the current phase
    pub fn phase(&self) -> WaitPhase {
        self.phase
    }

    /// Get the configured wait bound
    pub fn timeout_ms(&self) -> Option<u32> {
        self.timeout_ms
    }

    /// Ask the heater owner to heat `heater` to `target_c`
    ///
    /// Does not block. A finished invocation is reset to `Idle` first; on
    /// error the phase is left unchanged.
    pub fn request(
        &mut self,
        heaters: &mut dyn HeaterBus,
        heater: HeaterId,
        target_c: f32,
    ) -> Result<(), HeaterError> {
        heaters.set_temperature(heater, target_c, true)?;
        if self.phase.is_terminal() {
            self.phase = self.phase.transition(WaitEvent::Reset);
        }
        self.phase = self.phase.transition(WaitEvent::HeatRequested);
        debug!("heat requested: {:?} -> {}", heater, target_c);
        Ok(())
    }

    /// Suspend until the signal reports reached or abort
    ///
    /// A `Reached` value is consumed: the signal is reset to `Running`
    /// before returning. An abort is left on the signal for its owner.
    /// When a wait bound is configured, `delay` measures it.
    pub async fn wait<M: RawMutex, D: DelayNs>(
        &mut self,
        signal: &HeatSignal<M>,
        delay: &mut D,
    ) -> HeatOutcome {
        self.phase = self.phase.transition(WaitEvent::WaitStarted);
        signal.clear_notification();

        let timeout_ms = self.timeout_ms;
        let deadline = async move {
            match timeout_ms {
                Some(ms) => delay.delay_ms(ms).await,
                None => pending::<()>().await,
            }
        };

        let outcome = match select(watch(signal), deadline).await {
            Either::First(outcome) => outcome,
            Either::Second(()) => {
                warn!("heat wait timed out after {} ms", timeout_ms.unwrap_or(0));
                HeatOutcome::Aborted(AbortReason::TimedOut)
            }
        };

        let event = match outcome {
            HeatOutcome::Reached => WaitEvent::TargetReached,
            HeatOutcome::Aborted(AbortReason::Requested) => WaitEvent::AbortObserved,
            HeatOutcome::Aborted(AbortReason::TimedOut) => WaitEvent::TimedOut,
        };
        self.phase = self.phase.transition(event);
        debug!("heat wait finished: {:?}", outcome);

        outcome
    }
}

/// Observe the signal until it leaves `Running`
async fn watch<M: RawMutex>(signal: &HeatSignal<M>) -> HeatOutcome {
    loop {
        match signal.get() {
            SignalState::Reached => {
                signal.reset();
                return HeatOutcome::Reached;
            }
            SignalState::AbortRequested => return HeatOutcome::Aborted(AbortReason::Requested),
            SignalState::Running => signal.changed().await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embassy_futures::join::join;
    use embassy_futures::{block_on, yield_now};
    use embassy_sync::blocking_mutex::raw::NoopRawMutex;
    use std::vec::Vec;

    #[derive(Default)]
    struct MockHeaters {
        requests: Vec<(HeaterId, f32, bool)>,
        reject: bool,
    }

    impl HeaterBus for MockHeaters {
        fn set_temperature(
            &mut self,
            heater: HeaterId,
            target_c: f32,
            wait: bool,
        ) -> Result<(), HeaterError> {
            if self.reject {
                return Err(HeaterError::TargetRejected);
            }
            self.requests.push((heater, target_c, wait));
            Ok(())
        }
    }

    // Delay that never expires
    struct NeverDelay;

    impl DelayNs for NeverDelay {
        async fn delay_ns(&mut self, _ns: u32) {
            pending::<()>().await
        }
    }

    // Delay that expires immediately
    struct InstantDelay;

    impl DelayNs for InstantDelay {
        async fn delay_ns(&mut self, _ns: u32) {}
    }

    #[test]
    fn test_request_issues_waiting_heat() {
        let mut heaters = MockHeaters::default();
        let mut coordinator = HeatWaitCoordinator::new(None);

        coordinator
            .request(&mut heaters, HeaterId::Extruder, 220.0)
            .unwrap();

        assert_eq!(heaters.requests, [(HeaterId::Extruder, 220.0, true)]);
        assert_eq!(coordinator.phase(), WaitPhase::Requested);
    }

    #[test]
    fn test_rejected_request_stays_idle() {
        let mut heaters = MockHeaters {
            reject: true,
            ..MockHeaters::default()
        };
        let mut coordinator = HeatWaitCoordinator::new(None);

        let result = coordinator.request(&mut heaters, HeaterId::Extruder, 220.0);
        assert_eq!(result, Err(HeaterError::TargetRejected));
        assert_eq!(coordinator.phase(), WaitPhase::Idle);
    }

    #[test]
    fn test_running_running_reached() {
        let signal: HeatSignal<NoopRawMutex> = HeatSignal::new();
        let mut heaters = MockHeaters::default();
        let mut coordinator = HeatWaitCoordinator::new(None);
        coordinator
            .request(&mut heaters, HeaterId::Extruder, 220.0)
            .unwrap();

        let (outcome, ()) = block_on(join(
            coordinator.wait(&signal, &mut NeverDelay),
            async {
                signal.set(SignalState::Running);
                yield_now().await;
                signal.set(SignalState::Running);
                yield_now().await;
                signal.set(SignalState::Reached);
            },
        ));

        assert_eq!(outcome, HeatOutcome::Reached);
        // Consumed by the coordinator
        assert_eq!(signal.get(), SignalState::Running);
        assert_eq!(coordinator.phase(), WaitPhase::Reached);
    }

    #[test]
    fn test_running_aborted() {
        let signal: HeatSignal<NoopRawMutex> = HeatSignal::new();
        let mut heaters = MockHeaters::default();
        let mut coordinator = HeatWaitCoordinator::new(None);
        coordinator
            .request(&mut heaters, HeaterId::Extruder, 220.0)
            .unwrap();

        let (outcome, ()) = block_on(join(
            coordinator.wait(&signal, &mut NeverDelay),
            async {
                signal.set(SignalState::Running);
                yield_now().await;
                signal.set(SignalState::AbortRequested);
            },
        ));

        assert_eq!(outcome, HeatOutcome::Aborted(AbortReason::Requested));
        // Abort belongs to the heater owner and is left in place
        assert_eq!(signal.get(), SignalState::AbortRequested);
        assert_eq!(
            coordinator.phase(),
            WaitPhase::Aborted(AbortReason::Requested)
        );
    }

    #[test]
    fn test_already_reached_before_wait() {
        let signal: HeatSignal<NoopRawMutex> = HeatSignal::new();
        let mut heaters = MockHeaters::default();
        let mut coordinator = HeatWaitCoordinator::new(None);
        coordinator
            .request(&mut heaters, HeaterId::Extruder, 200.0)
            .unwrap();

        signal.set(SignalState::Reached);
        let outcome = block_on(coordinator.wait(&signal, &mut NeverDelay));

        assert_eq!(outcome, HeatOutcome::Reached);
        assert_eq!(signal.get(), SignalState::Running);
    }

    #[test]
    fn test_bounded_wait_times_out() {
        let signal: HeatSignal<NoopRawMutex> = HeatSignal::new();
        let mut heaters = MockHeaters::default();
        let mut coordinator = HeatWaitCoordinator::new(Some(5_000));
        coordinator
            .request(&mut heaters, HeaterId::Extruder, 220.0)
            .unwrap();

        let outcome = block_on(coordinator.wait(&signal, &mut InstantDelay));

        assert_eq!(outcome, HeatOutcome::Aborted(AbortReason::TimedOut));
        assert_eq!(
            coordinator.phase(),
            WaitPhase::Aborted(AbortReason::TimedOut)
        );
        assert_eq!(signal.get(), SignalState::Running);
    }

    #[test]
    fn test_reached_wins_over_expired_bound() {
        let signal: HeatSignal<NoopRawMutex> = HeatSignal::new();
        let mut heaters = MockHeaters::default();
        let mut coordinator = HeatWaitCoordinator::new(Some(5_000));
        coordinator
            .request(&mut heaters, HeaterId::Extruder, 220.0)
            .unwrap();

        signal.set(SignalState::Reached);
        let outcome = block_on(coordinator.wait(&signal, &mut InstantDelay));

        assert_eq!(outcome, HeatOutcome::Reached);
    }

    #[test]
    fn test_next_invocation_starts_fresh() {
        let signal: HeatSignal<NoopRawMutex> = HeatSignal::new();
        let mut heaters = MockHeaters::default();
        let mut coordinator = HeatWaitCoordinator::new(None);

        coordinator
            .request(&mut heaters, HeaterId::Extruder, 220.0)
            .unwrap();
        signal.set(SignalState::Reached);
        block_on(coordinator.wait(&signal, &mut NeverDelay));

        assert_eq!(coordinator.phase(), WaitPhase::Reached);

        coordinator
            .request(&mut heaters, HeaterId::Extruder, 230.0)
            .unwrap();
        assert_eq!(coordinator.phase(), WaitPhase::Requested);
    }

    #[test]
    fn test_rejected_request_keeps_finished_phase() {
        let signal: HeatSignal<NoopRawMutex> = HeatSignal::new();
        let mut heaters = MockHeaters::default();
        let mut coordinator = HeatWaitCoordinator::new(None);

        coordinator
            .request(&mut heaters, HeaterId::Extruder, 220.0)
            .unwrap();
        signal.set(SignalState::AbortRequested);
        block_on(coordinator.wait(&signal, &mut NeverDelay));

        heaters.reject = true;
        assert!(coordinator
            .request(&mut heaters, HeaterId::Extruder, 220.0)
            .is_err());
        assert_eq!(
            coordinator.phase(),
            WaitPhase::Aborted(AbortReason::Requested)
        );
    }
}
