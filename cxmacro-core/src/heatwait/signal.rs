//! Tri-state heat signal shared with the heater owner

use core::sync::atomic::{AtomicU8, Ordering};

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::signal::Signal;

/// Value of the heat signal
///
/// The discriminants match the raw flag used by the heater subsystem.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum SignalState {
    /// Still heating, keep waiting
    Running = 0,
    /// The heater owner asked the waiter to give up
    AbortRequested = 1,
    /// Target temperature reached
    Reached = 3,
}

impl SignalState {
    /// Get the raw flag value
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    /// Decode a raw flag value
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(SignalState::Running),
            1 => Some(SignalState::AbortRequested),
            3 => Some(SignalState::Reached),
            _ => None,
        }
    }
}

/// Heat signal with change notification
///
/// The value itself is an atomic so neither side holds a lock while the
/// other runs. Every store also raises a notification that a suspended
/// waiter picks up; the waiter re-reads the value after each wake, so a
/// notification raised before the waiter suspends is never lost.
pub struct HeatSignal<M: RawMutex> {
    state: AtomicU8,
    changed: Signal<M, ()>,
}

impl<M: RawMutex> Default for HeatSignal<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M: RawMutex> HeatSignal<M> {
    /// Create a signal in the `Running` state
    pub const fn new() -> Self {
        Self {
            state: AtomicU8::new(SignalState::Running as u8),
            changed: Signal::new(),
        }
    }

    /// Store a new value and wake the waiter (heater owner side)
    pub fn set(&self, state: SignalState) {
        self.state.store(state.as_u8(), Ordering::Release);
        self.changed.signal(());
    }

    /// Read the current value
    ///
    /// Unknown raw values read as `Running`; only `set` writes the flag.
    pub fn get(&self) -> SignalState {
        SignalState::from_u8(self.state.load(Ordering::Acquire)).unwrap_or(SignalState::Running)
    }

    /// Return the signal to `Running` after consuming a `Reached`
    pub fn reset(&self) {
        self.state.store(SignalState::Running.as_u8(), Ordering::Release);
    }

    /// Drop any notification raised before the waiter started
    pub(crate) fn clear_notification(&self) {
        self.changed.reset();
    }

    /// Suspend until the next store
    pub(crate) async fn changed(&self) {
        self.changed.wait().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embassy_sync::blocking_mutex::raw::NoopRawMutex;

    #[test]
    fn test_raw_values() {
        assert_eq!(SignalState::Running.as_u8(), 0);
        assert_eq!(SignalState::AbortRequested.as_u8(), 1);
        assert_eq!(SignalState::Reached.as_u8(), 3);
        assert_eq!(SignalState::from_u8(2), None);
        assert_eq!(SignalState::from_u8(3), Some(SignalState::Reached));
    }

    #[test]
    fn test_set_and_reset() {
        let signal: HeatSignal<NoopRawMutex> = HeatSignal::new();
        assert_eq!(signal.get(), SignalState::Running);

        signal.set(SignalState::Reached);
        assert_eq!(signal.get(), SignalState::Reached);

        signal.reset();
        assert_eq!(signal.get(), SignalState::Running);
    }
}
