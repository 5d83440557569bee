//! Sequential, rate-paced request engine and its two drive strategies.
//!
//! A [`LoadEngine`] is built once per target and rate. Each drive call runs
//! its iterations one after another on the calling task: behavior hooks
//! first, then one timed request through the throttled transport. There is
//! no request overlap and no cancellation; a run ends when its loop does, or
//! when a hook fails.
mod behavior;
mod load;
mod options;
mod stress;


use std::sync::Arc;
use std::time::Duration;

use tracing::{error, info, trace, warn};
use url::Url;

use crate::error::EngineError;
use crate::http::{OutboundRequest, RateLimiter, Throttled, Transport};
use crate::metrics::{RequestOutcome, RunReport, SessionStats, TestKind, rate_x100};

pub use behavior::{Behavior, HookContext};
pub use options::{EngineOptions, Reporting, StatsScope};

/// Endpoint and pacing a [`LoadEngine`] is bound to. Immutable once built.
#[derive(Debug, Clone)]
pub struct Target {
    request: OutboundRequest,
    qps: f64,
}

impl Target {
    /// A plain GET target.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidConfiguration`] when the URL is not a
    /// valid http(s) URL.
    pub fn new(url: &str, qps: f64) -> Result<Self, EngineError> {
        let url = crate::http::parse_target_url(url)
            .map_err(|err| EngineError::invalid(err.to_string()))?;
        Ok(Self::from_request(OutboundRequest::get(url), qps))
    }

    #[must_use]
    pub const fn from_request(request: OutboundRequest, qps: f64) -> Self {
        Self { request, qps }
    }

    #[must_use]
    pub const fn url(&self) -> &Url {
        &self.request.url
    }

    #[must_use]
    pub const fn qps(&self) -> f64 {
        self.qps
    }

    #[must_use]
    pub const fn request(&self) -> &OutboundRequest {
        &self.request
    }
}

/// Issues requests one at a time against a [`Target`] and aggregates the
/// outcomes.
pub struct LoadEngine<T> {
    target: Target,
    transport: Arc<Throttled<T>>,
    stats: SessionStats,
    options: EngineOptions,
}

/// Per-run numbers the drive loops hand to [`LoadEngine::summarize`].
struct RunTally {
    kind: TestKind,
    elapsed: Duration,
    successful: u64,
    attempted: u64,
    total: u64,
    errors: u64,
    error_denominator: u64,
    failed_at: Option<u64>,
}

impl<T> LoadEngine<T>
where
    T: Transport + 'static,
{
    /// Wraps `transport` in a rate limiter for the target's QPS.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidConfiguration`] when the target QPS is
    /// not a finite number greater than zero.
    pub fn new(target: Target, transport: T, options: EngineOptions) -> Result<Self, EngineError> {
        let limiter = RateLimiter::new(target.qps)?;
        Ok(Self {
            target,
            transport: Arc::new(Throttled::new(transport, limiter)),
            stats: SessionStats::new(),
            options,
        })
    }

    #[must_use]
    pub const fn target(&self) -> &Target {
        &self.target
    }

    #[must_use]
    pub const fn stats(&self) -> &SessionStats {
        &self.stats
    }

    #[must_use]
    pub const fn options(&self) -> &EngineOptions {
        &self.options
    }

    /// The rate-limited transport, for callers that need to issue extra
    /// requests paced together with the engine's own.
    #[must_use]
    pub fn session(&self) -> Arc<Throttled<T>> {
        Arc::clone(&self.transport)
    }

    /// Sends the target request once, through the throttle, and records the
    /// outcome. Transport failures are logged and counted, never returned as
    /// errors; there is no retry.
    pub async fn send_one(&mut self) -> RequestOutcome {
        let (latency, result) = self.transport.send_timed(&self.target.request).await;
        let outcome = match result {
            Ok(response) => {
                trace!("response {} in {:?}", response.status, latency);
                RequestOutcome::Success {
                    latency,
                    status: response.status,
                }
            }
            Err(err) => {
                error!("Request failed: {}", err);
                RequestOutcome::Failure {
                    latency: Some(latency),
                    cause: err.to_string(),
                }
            }
        };
        self.stats.record(&outcome);
        outcome
    }

    async fn run_behaviors(
        &self,
        iteration: u64,
        behaviors: &[Arc<dyn Behavior>],
    ) -> Result<(), EngineError> {
        if behaviors.is_empty() {
            return Ok(());
        }
        let ctx = HookContext::new(iteration, &self.target.request.url, &*self.transport);
        for behavior in behaviors {
            behavior.execute(&ctx).await?;
        }
        Ok(())
    }

    fn begin_run(&mut self, kind: TestKind) {
        if self.options.stats_scope == StatsScope::PerRun {
            self.stats.reset();
        }
        match self.options.reporting {
            Reporting::Stdout => println!("\nRunning {} test...", kind.label()),
            Reporting::Silent => info!("Running {} test against {}", kind.label(), self.target.url()),
        }
    }

    fn summarize(&self, tally: &RunTally) -> RunReport {
        RunReport {
            kind: tally.kind,
            elapsed: tally.elapsed,
            average_latency: self.stats.mean_latency(),
            error_rate_x100: rate_x100(tally.errors, tally.error_denominator),
            successful: tally.successful,
            total: tally.total,
            attempted: tally.attempted,
            failed_at: tally.failed_at,
            percentiles: self.stats.percentiles(),
        }
    }

    fn emit_report(&self, report: &RunReport) {
        match self.options.reporting {
            Reporting::Stdout => report.print(),
            Reporting::Silent => {
                let [elapsed, latency, error_rate, count] = report.lines();
                info!("{}; {}; {}; {}", elapsed, latency, error_rate, count);
            }
        }
    }

    fn emit_stop(&self, attempt: u64) {
        match self.options.reporting {
            Reporting::Stdout => println!("Failed at {} requests", attempt),
            Reporting::Silent => warn!("Failed at {} requests", attempt),
        }
    }

    fn emit_execution_time(&self, elapsed: Duration) {
        let line = format!("Execution time: {}s", crate::metrics::format_secs(elapsed));
        match self.options.reporting {
            Reporting::Stdout => println!("{}", line),
            Reporting::Silent => info!("{}", line),
        }
    }
}
