use std::time::Duration;

use tracing::warn;

use super::histogram::{LatencyHistogram, LatencyPercentiles};
use super::outcome::RequestOutcome;

/// Accumulators for one engine instance.
///
/// Latencies are kept in request order and only for attempts that got a
/// response; failed attempts bump `failures` and contribute no latency.
#[derive(Debug, Clone, Default)]
pub struct SessionStats {
    latencies: Vec<Duration>,
    failures: u64,
    attempts: u64,
}

impl SessionStats {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, outcome: &RequestOutcome) {
        self.attempts = self.attempts.saturating_add(1);
        match outcome {
            RequestOutcome::Success { latency, .. } => self.latencies.push(*latency),
            RequestOutcome::Failure { .. } => self.failures = self.failures.saturating_add(1),
        }
    }

    pub fn reset(&mut self) {
        self.latencies.clear();
        self.failures = 0;
        self.attempts = 0;
    }

    #[must_use]
    pub fn latencies(&self) -> &[Duration] {
        &self.latencies
    }

    #[must_use]
    pub const fn failures(&self) -> u64 {
        self.failures
    }

    #[must_use]
    pub const fn attempts(&self) -> u64 {
        self.attempts
    }

    /// Arithmetic mean of the recorded latencies, zero when none were recorded.
    #[must_use]
    pub fn mean_latency(&self) -> Duration {
        let count = u128::try_from(self.latencies.len()).unwrap_or(u128::MAX);
        let total_nanos = self
            .latencies
            .iter()
            .fold(0u128, |sum, latency| sum.saturating_add(latency.as_nanos()));
        let mean = total_nanos.checked_div(count).unwrap_or(0);
        Duration::from_nanos(u64::try_from(mean).unwrap_or(u64::MAX))
    }

    #[must_use]
    pub fn percentiles(&self) -> LatencyPercentiles {
        match LatencyHistogram::from_latencies(&self.latencies) {
            Ok(histogram) => histogram.percentiles(),
            Err(err) => {
                warn!("{}", err);
                LatencyPercentiles::default()
            }
        }
    }
}
