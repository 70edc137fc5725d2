//! Simulated network latency.

use std::time::Duration;

/// Delays every repository operation by a fixed amount before it touches the collection.
///
/// The delay never fails and does not depend on load.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LatencySimulator {
    delay: Duration,
}

impl LatencySimulator {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Resolves once the configured delay has elapsed.
    pub async fn wait(&self) {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::Instant;

    #[tokio::test(start_paused = true)]
    async fn test_wait_elapses_configured_delay() {
        let simulator = LatencySimulator::new(Duration::from_millis(250));
        let started = Instant::now();
        simulator.wait().await;
        assert!(started.elapsed() >= Duration::from_millis(250));
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_delay_does_not_sleep() {
        let simulator = LatencySimulator::default();
        let started = Instant::now();
        simulator.wait().await;
        assert_eq!(started.elapsed(), Duration::ZERO);
    }
}
