use std::sync::Arc;

use tokio::time::Instant;

use super::{Behavior, LoadEngine, RunTally};
use crate::error::EngineError;
use crate::http::Transport;
use crate::metrics::{RunReport, TestKind};
use crate::timing::timed;

impl<T> LoadEngine<T>
where
    T: Transport + 'static,
{
    /// Runs exactly `total_requests` iterations, never stopping early.
    ///
    /// Any HTTP response counts as a successful request; only transport
    /// failures count against the error rate, which is
    /// `failures / total_requests` (zero when `total_requests` is zero).
    /// With [`super::StatsScope::Session`] the failure count and latencies
    /// include earlier drive calls on this engine.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Hook`] when a behavior hook fails. The run stops
    /// at that point and no report is printed.
    pub async fn run_load_test(
        &mut self,
        total_requests: u64,
        behaviors: &[Arc<dyn Behavior>],
    ) -> Result<RunReport, EngineError> {
        let (elapsed, result) = timed(self.drive_load(total_requests, behaviors)).await;
        self.emit_execution_time(elapsed);
        result
    }

    async fn drive_load(
        &mut self,
        total_requests: u64,
        behaviors: &[Arc<dyn Behavior>],
    ) -> Result<RunReport, EngineError> {
        self.begin_run(TestKind::Load);
        let started = Instant::now();
        let mut successful: u64 = 0;

        for iteration in 1..=total_requests {
            self.run_behaviors(iteration, behaviors).await?;
            if self.send_one().await.is_success() {
                successful = successful.saturating_add(1);
            }
        }

        let report = self.summarize(&RunTally {
            kind: TestKind::Load,
            elapsed: started.elapsed(),
            successful,
            attempted: total_requests,
            total: total_requests,
            errors: self.stats.failures(),
            error_denominator: total_requests,
            failed_at: None,
        });
        self.emit_report(&report);
        Ok(report)
    }
}
