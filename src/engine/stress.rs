use std::sync::Arc;

use tokio::time::Instant;

use super::{Behavior, LoadEngine, RunTally};
use crate::args::{ErrorRateBasis, PositiveU64};
use crate::error::EngineError;
use crate::http::Transport;
use crate::metrics::{RunReport, TestKind};
use crate::timing::timed;

impl<T> LoadEngine<T>
where
    T: Transport + 'static,
{
    /// Sends up to `max_requests` requests and stops at the first one that
    /// gets no response.
    ///
    /// With [`ErrorRateBasis::Configured`] the error rate is
    /// `(max_requests - successful) / max_requests`, so stopping at attempt
    /// `k` reports `(max - (k - 1)) / max` rather than `1 / k`.
    /// [`ErrorRateBasis::Attempted`] divides by the attempts made instead.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Hook`] when a behavior hook fails. The run stops
    /// at that point and no report is printed.
    pub async fn run_stress_test(
        &mut self,
        max_requests: PositiveU64,
        behaviors: &[Arc<dyn Behavior>],
    ) -> Result<RunReport, EngineError> {
        let (elapsed, result) = timed(self.drive_stress(max_requests.get(), behaviors)).await;
        self.emit_execution_time(elapsed);
        result
    }

    async fn drive_stress(
        &mut self,
        max_requests: u64,
        behaviors: &[Arc<dyn Behavior>],
    ) -> Result<RunReport, EngineError> {
        self.begin_run(TestKind::Stress);
        let started = Instant::now();
        let mut successful: u64 = 0;
        let mut attempted: u64 = 0;
        let mut failed_at = None;

        for attempt in 1..=max_requests {
            self.run_behaviors(attempt, behaviors).await?;
            attempted = attempt;
            if self.send_one().await.is_success() {
                successful = successful.saturating_add(1);
            } else {
                self.emit_stop(attempt);
                failed_at = Some(attempt);
                break;
            }
        }

        let denominator = match self.options.error_rate_basis {
            ErrorRateBasis::Configured => max_requests,
            ErrorRateBasis::Attempted => attempted,
        };
        let report = self.summarize(&RunTally {
            kind: TestKind::Stress,
            elapsed: started.elapsed(),
            successful,
            attempted,
            total: max_requests,
            errors: denominator.saturating_sub(successful),
            error_denominator: denominator,
            failed_at,
        });
        self.emit_report(&report);
        Ok(report)
    }
}
