use crate::args::ErrorRateBasis;

/// Whether accumulated latencies and failures survive across drive calls.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatsScope {
    /// Every drive call on an engine adds to the same accumulators, so a
    /// second run's averages and error rate include the first run's samples.
    #[default]
    Session,
    /// Accumulators are cleared at the start of each drive call.
    PerRun,
}

/// Where the engine writes its progress and report lines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Reporting {
    /// Banner, report lines, stop notices and execution time go to stdout.
    #[default]
    Stdout,
    /// Nothing is printed; notices go to the log and the caller renders the
    /// returned report.
    Silent,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EngineOptions {
    pub stats_scope: StatsScope,
    pub error_rate_basis: ErrorRateBasis,
    pub reporting: Reporting,
}
