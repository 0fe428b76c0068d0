//! Timer for the heat-wait bound

use std::time::Duration;

use embedded_hal_async::delay::DelayNs;

/// Delay backed by the tokio timer
///
/// Must be awaited inside a tokio runtime with the time driver enabled,
/// which [`crate::MacroHost`] provides.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioDelay;

impl DelayNs for TokioDelay {
    async fn delay_ns(&mut self, ns: u32) {
        tokio::time::sleep(Duration::from_nanos(u64::from(ns))).await
    }

    async fn delay_us(&mut self, us: u32) {
        tokio::time::sleep(Duration::from_micros(u64::from(us))).await
    }

    async fn delay_ms(&mut self, ms: u32) {
        tokio::time::sleep(Duration::from_millis(u64::from(ms))).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    fn runtime() -> tokio::runtime::Runtime {
        tokio::runtime::Builder::new_current_thread()
            .enable_time()
            .build()
            .unwrap()
    }

    #[test]
    fn test_delay_waits_at_least_requested() {
        let start = Instant::now();
        runtime().block_on(TokioDelay.delay_ms(20));
        assert!(start.elapsed() >= Duration::from_millis(20));
    }

    #[test]
    fn test_long_bound_does_not_overflow() {
        // About 49 days
        let rt = runtime();
        let finished = rt.block_on(async {
            tokio::time::timeout(Duration::from_millis(10), TokioDelay.delay_ms(u32::MAX))
                .await
                .is_ok()
        });
        assert!(!finished);
    }
}
